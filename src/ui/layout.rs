//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{StepKind, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::time::Instant;

/// Rows taken by the header (title line plus progress gauge)
const HEADER_HEIGHT: u16 = 3;

/// Split the screen into header and content, reserving the bottom line for
/// the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the title and the eased progress gauge
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(2)])
        .split(area);

    let wizard = app.state.wizard;
    let title = Line::from(vec![
        Span::styled(
            " MayaLoan ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Loan application", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let label = if wizard.is_submitted() {
        "Complete".to_string()
    } else {
        format!("Step {} of {}", wizard.step(), wizard.total())
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(app.state.progress.ratio(now))
        .label(label);
    frame.render_widget(gauge, chunks[1]);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Endpoint liveness
    let conn_status = if app.state.endpoint_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    spans.push(Span::styled(get_view_hints(app), Style::default().fg(Color::Gray)));

    if app.state.submitting {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Submitting...", Style::default().fg(Color::Yellow)));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view and step
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Wizard => match app.state.wizard.current().kind {
            StepKind::Fields(specs) if specs.iter().any(|s| s.is_select()) => {
                "Tab:field  ←/→:choose  Enter:next  Esc:back".to_string()
            }
            StepKind::Fields(_) => "Tab:field  Enter:next  Esc:back".to_string(),
            StepKind::RadioGroup { .. } => {
                "↑/↓:move  Space/1-9:choose  Enter:next  Esc:back".to_string()
            }
            StepKind::Review => {
                format!("Space:consent  j/k:scroll  Enter/{SUBMIT_SHORTCUT}:submit  Esc:back")
            }
        },
        View::Submitted => "Enter:quit  n:new application".to_string(),
        View::SubmitFailed => "r:try again  q:quit".to_string(),
    }
}
