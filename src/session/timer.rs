//! Once-per-second tick source bound to the Active phase.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use super::state::Status;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One beat of the clock, stamped with the run of the clock that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    generation: u64,
}

/// Spawns tick tasks feeding [`Tick`]s into a channel.
pub struct TickDriver {
    sender: mpsc::UnboundedSender<Tick>,
    period: Duration,
    generation: u64,
    guard: Option<TickGuard>,
}

impl TickDriver {
    pub fn new(sender: mpsc::UnboundedSender<Tick>) -> Self {
        Self::with_period(sender, TICK_PERIOD)
    }

    pub fn with_period(sender: mpsc::UnboundedSender<Tick>, period: Duration) -> Self {
        Self {
            sender,
            period,
            generation: 0,
            guard: None,
        }
    }

    /// Start or stop the clock so it runs exactly while `status` is Active.
    ///
    /// Must be called from within a tokio runtime.
    pub fn sync(&mut self, status: Status) {
        match (status, self.guard.is_some()) {
            (Status::Active, false) => {
                self.generation += 1;
                let tick = Tick {
                    generation: self.generation,
                };
                self.guard = Some(TickGuard::spawn(self.sender.clone(), self.period, tick));
                debug!(generation = self.generation, "tick driver started");
            }
            (Status::Ready | Status::Finished, true) => {
                self.guard = None;
                debug!(generation = self.generation, "tick driver stopped");
            }
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.guard.is_some()
    }

    /// Whether `tick` comes from the clock that is running right now.
    ///
    /// Ticks still queued from a stopped clock are rejected.
    pub fn accepts(&self, tick: Tick) -> bool {
        self.is_running() && tick.generation == self.generation
    }
}

/// Keeps a tick task alive; dropping it cancels the task.
pub struct TickGuard {
    handle: JoinHandle<()>,
}

impl TickGuard {
    fn spawn(sender: mpsc::UnboundedSender<Tick>, period: Duration, tick: Tick) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(tick).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::UnboundedReceiver<Tick>) -> Vec<Tick> {
        let mut ticks = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            ticks.push(tick);
        }
        ticks
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period_while_active() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut driver = TickDriver::new(tx);

        driver.sync(Status::Active);
        assert!(driver.is_running());

        time::sleep(Duration::from_millis(3500)).await;
        let ticks = drain(&mut rx);
        assert_eq!(ticks.len(), 3);
        assert!(ticks.iter().all(|tick| driver.accepts(*tick)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_session_leaves_active() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut driver = TickDriver::new(tx);

        driver.sync(Status::Active);
        time::sleep(Duration::from_millis(1500)).await;
        driver.sync(Status::Finished);
        assert!(!driver.is_running());
        drain(&mut rx);

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_is_level_triggered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut driver = TickDriver::new(tx);

        driver.sync(Status::Ready);
        assert!(!driver.is_running());

        driver.sync(Status::Active);
        driver.sync(Status::Active);
        time::sleep(Duration::from_millis(1500)).await;

        // Repeated syncs must not stack a second tick task.
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_tick_from_previous_run_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut driver = TickDriver::new(tx);

        driver.sync(Status::Active);
        time::sleep(Duration::from_millis(1500)).await;
        let stale = drain(&mut rx);
        assert_eq!(stale.len(), 1);

        driver.sync(Status::Finished);
        assert!(!driver.accepts(stale[0]));

        driver.sync(Status::Active);
        assert!(!driver.accepts(stale[0]));

        time::sleep(Duration::from_millis(1500)).await;
        let fresh = drain(&mut rx);
        assert_eq!(fresh.len(), 1);
        assert!(driver.accepts(fresh[0]));
    }
}
