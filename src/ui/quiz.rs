use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::score::format_clock;
use crate::session::Snapshot;

const OPTION_LABELS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let Some(question) = snapshot.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress_bar(frame, chunks[0], snapshot);
    render_progress_text(frame, chunks[1], snapshot);
    render_question_text(frame, chunks[3], &question.text);
    render_options(frame, chunks[4], snapshot, &question.options, app.cursor());
    render_footer(frame, chunks[5], snapshot);
}

fn render_progress_bar(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let ratio = if snapshot.question_count > 0 {
        snapshot.answered_count() as f64 / snapshot.question_count as f64
    } else {
        0.0
    };
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(widget, area);
}

fn render_progress_text(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let question = Paragraph::new(Line::from(vec![
        Span::styled("Question ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            (snapshot.current_index + 1).to_string(),
            Style::default().fg(Color::White).bold(),
        ),
        Span::styled(
            format!(" / {}", snapshot.question_count),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let points = Paragraph::new(Line::from(vec![
        Span::styled(
            snapshot.score.to_string(),
            Style::default().fg(Color::White).bold(),
        ),
        Span::styled(
            format!(" / {} points", snapshot.total_points),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Right);

    frame.render_widget(question, halves[0]);
    frame.render_widget(points, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    options: &[String],
    cursor: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let style = option_style(snapshot, index, cursor);
        let marker = match snapshot.selected_option {
            Some(selected) if selected == index => "*",
            Some(_) => " ",
            None if index == cursor => ">",
            None => " ",
        };
        let label = OPTION_LABELS.get(index).copied().unwrap_or(' ');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Before answering only the cursor is highlighted; afterwards the right
/// option turns green and a wrong pick turns red.
fn option_style(snapshot: &Snapshot, index: usize, cursor: usize) -> Style {
    match snapshot.selected_option {
        None if index == cursor => Style::default().fg(Color::Cyan).bold(),
        None => Style::default().fg(Color::Gray),
        Some(_) if snapshot.is_correct(index) => Style::default().fg(Color::Green).bold(),
        Some(selected) if selected == index => Style::default().fg(Color::Red).bold(),
        Some(_) => Style::default().fg(Color::DarkGray),
    }
}

fn render_footer(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let halves = Layout::horizontal([Constraint::Length(8), Constraint::Fill(1)]).split(area);

    let seconds = snapshot.seconds_remaining.unwrap_or(0);
    let clock_color = if seconds <= 10 {
        Color::Red
    } else {
        Color::Yellow
    };
    let clock = Paragraph::new(format_clock(seconds)).fg(clock_color).bold();

    let hint = if !snapshot.has_answered() {
        "j/k navigate  ·  enter select  ·  q quit"
    } else if snapshot.is_last_question() {
        "enter finish  ·  q quit"
    } else {
        "enter next  ·  q quit"
    };
    let controls = Paragraph::new(hint)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);

    frame.render_widget(clock, halves[0]);
    frame.render_widget(controls, halves[1]);
}
