//! Derived display values: percentage, grade tier and countdown clock.
//!
//! None of these are part of session state; they are recomputed from a
//! snapshot whenever the view needs them.

/// Percentage of `total` reached by `score`, rounded up.
///
/// Returns 0 when `total` is 0 instead of dividing by zero.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = u64::from(score) * 100;
    scaled.div_ceil(u64::from(total)) as u32
}

/// Grade tier shown on the finish screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Perfect,
    Great,
    Fair,
    Poor,
    Zero,
}

impl Grade {
    /// Tier for the exact ratio `score / total`, before any rounding.
    pub fn from_score(score: u32, total: u32) -> Self {
        let scaled = u64::from(score) * 100;
        let at_least = |percent: u64| scaled >= percent * u64::from(total);

        if total > 0 && score >= total {
            Grade::Perfect
        } else if total > 0 && at_least(80) {
            Grade::Great
        } else if total > 0 && at_least(50) {
            Grade::Fair
        } else if score > 0 {
            Grade::Poor
        } else {
            Grade::Zero
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Grade::Perfect => "🥇",
            Grade::Great => "🎉",
            Grade::Fair => "🙃",
            Grade::Poor => "🤨",
            Grade::Zero => "🤦",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Grade::Perfect => "Flawless!",
            Grade::Great => "Great job!",
            Grade::Fair => "Not bad.",
            Grade::Poor => "Room for improvement.",
            Grade::Zero => "Better luck next time.",
        }
    }
}

/// Render a countdown as `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
