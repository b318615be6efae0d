mod quiz;
mod result;
mod welcome;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::session::Status;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let snapshot = app.snapshot();
    if !snapshot.has_questions() {
        welcome::render_empty(frame, area);
        return;
    }

    match snapshot.status {
        Status::Ready => welcome::render(frame, area, snapshot),
        Status::Active => quiz::render(frame, area, app),
        Status::Finished => result::render(frame, area, snapshot),
    }

    if let Some(error) = app.last_error() {
        render_error_line(frame, area, error);
    }
}

fn render_error_line(frame: &mut Frame, area: Rect, message: &str) {
    let line_area = Rect {
        y: area.bottom().saturating_sub(1),
        height: 1.min(area.height),
        ..area
    };
    let widget = Paragraph::new(message)
        .alignment(Alignment::Left)
        .fg(Color::Red);
    frame.render_widget(widget, line_area);
}
