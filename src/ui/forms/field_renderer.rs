//! Field rendering utilities for wizard steps

use crate::state::{FieldSpec, InputKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Rows taken by one input: bordered box plus the inline error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw one text/select input with its inline error underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &str,
    is_active: bool,
    error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_style = match (error.is_some(), is_active) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let placeholder_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let mut spans = Vec::new();
    match spec.kind {
        InputKind::Select(_) => {
            let arrow_style = if is_active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled("◀ ", arrow_style));
            if value.is_empty() {
                spans.push(Span::styled("Please select", placeholder_style));
            } else {
                spans.push(Span::styled(value.to_string(), value_style));
            }
            spans.push(Span::styled(" ▶", arrow_style));
        }
        InputKind::Text | InputKind::Date => {
            if value.is_empty() && !is_active {
                spans.push(Span::styled(placeholder(spec), placeholder_style));
            } else {
                spans.push(Span::styled(value.to_string(), value_style));
            }
            if is_active {
                spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
            }
        }
    }

    let title_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .title(Span::styled(format!(" {} ", spec.label()), title_style))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[0]);

    if let Some(message) = error {
        let error_line = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error_line, chunks[1]);
    }
}

fn placeholder(spec: &FieldSpec) -> &'static str {
    match spec.kind {
        InputKind::Date => "YYYY-MM-DD",
        _ => "(empty)",
    }
}

/// Draw a one-line help text at the bottom of a step
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
