//! Terminal panels shown after a submission attempt

use crate::app::App;
use crate::submit::SubmitReceipt;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Panel shown once the record went out
pub fn draw_success(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            "✓",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Application Submitted!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "Thank you for your application. We'll review your information and \
             contact you within 24 hours with a decision.",
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Your information is secure",
            Style::default().fg(Color::Green),
        )),
    ];

    if app.state.receipt == Some(SubmitReceipt::Unconfirmed) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "The server did not confirm this submission.",
            Style::default().fg(Color::Yellow),
        )));
    }

    lines.push(Line::from(""));
    lines.push(hint_line(&[("Enter", "quit"), ("n", "new application")]));

    draw_panel(frame, area, Color::Green, lines);
}

/// Panel shown when the endpoint could not take the record
pub fn draw_failure(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            "✗",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Submission Error",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "We encountered an issue submitting your application. Please try again \
             or contact us directly.",
        ),
    ];

    if let Some(reason) = &app.state.failure {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            reason.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Your answers are saved."));
    lines.push(Line::from(""));
    lines.push(hint_line(&[("r", "try again"), ("q", "quit")]));

    draw_panel(frame, area, Color::Red, lines);
}

fn hint_line(keys: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, (key, action)) in keys.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(": {action}")));
    }
    Line::from(spans)
}

fn draw_panel(frame: &mut Frame, area: Rect, accent: Color, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16 + 4).min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Max(70),
            Constraint::Min(0),
        ])
        .split(chunks[1]);

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent)),
        );
    frame.render_widget(panel, columns[1]);
}
