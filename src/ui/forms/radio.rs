//! Radio group rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

/// Draw a single-choice option list
///
/// `selected` is the recorded answer, `cursor` the highlighted row.
pub fn draw_radio_group(
    frame: &mut Frame,
    area: Rect,
    options: &[&str],
    selected: Option<usize>,
    cursor: usize,
    error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let is_selected = selected == Some(idx);
            let marker = if is_selected { "●" } else { "○" };
            let marker_style = if is_selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}. ", idx + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(marker, marker_style),
                Span::raw(" "),
                Span::raw(option.to_string()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    // Stateful render keeps the highlighted row in view
    let mut list_state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    if let Some(message) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {message}"),
                Style::default().fg(Color::Red),
            )),
            chunks[1],
        );
    }
}
