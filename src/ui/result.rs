use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::score::Grade;
use crate::session::Snapshot;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let percentage = snapshot.percentage();
    let grade = snapshot.grade();

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{}  You scored {} out of {} ({}%)",
                grade.emoji(),
                snapshot.score,
                snapshot.total_points,
                percentage
            ),
            Style::default().fg(grade_color(grade)).bold(),
        )),
        Line::from(Span::styled(
            grade.message(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("(Highscore: {} points)", snapshot.high_score),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);

    render_controls(frame, chunks[3]);
}

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Perfect => Color::Green,
        Grade::Great => Color::Cyan,
        Grade::Fair => Color::Yellow,
        Grade::Poor | Grade::Zero => Color::Red,
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
