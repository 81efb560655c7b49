//! Review step: everything entered so far plus the consent checkbox

use crate::app::App;
use crate::state::FieldName;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const CONSENT_TEXT: &str = "I confirm the information above is accurate and agree to be \
     contacted about this application.";

/// Width the labels are padded to
const LABEL_WIDTH: usize = 16;

pub fn draw_review(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Summary
            Constraint::Length(1), // Answered count
            Constraint::Length(2), // Consent
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let half = FieldName::COUNT.div_ceil(2);
    let (left, right) = FieldName::ALL.split_at(half);
    for (fields, column) in [(left, columns[0]), (right, columns[1])] {
        let lines: Vec<Line> = fields
            .iter()
            .map(|field| summary_line(*field, app.state.record.get(*field)))
            .collect();
        let summary = Paragraph::new(lines).scroll((app.state.review_scroll, 0));
        frame.render_widget(summary, column);
    }

    let filled = app.state.record.filled_count();
    let count_style = if filled == FieldName::COUNT {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{filled} of {} answered", FieldName::COUNT),
            count_style,
        )),
        chunks[1],
    );

    let checkbox = if app.state.consent { "[x] " } else { "[ ] " };
    let checkbox_style = if app.state.consent {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let consent = Paragraph::new(Line::from(vec![
        Span::styled(checkbox, checkbox_style),
        Span::raw(CONSENT_TEXT),
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(consent, chunks[2]);
}

fn summary_line(field: FieldName, value: &str) -> Line<'static> {
    let label = Span::styled(
        format!("{:<width$}", field.label(), width = LABEL_WIDTH),
        Style::default().fg(Color::DarkGray),
    );
    let value = if value.trim().is_empty() {
        Span::styled("(missing)", Style::default().fg(Color::Red))
    } else if field.is_sensitive() {
        Span::raw(mask_value(value))
    } else {
        Span::raw(value.to_string())
    };
    Line::from(vec![label, value])
}

/// Hide all but the last four characters; short values are hidden entirely
fn mask_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let hidden = if chars.len() > 4 {
        chars.len() - 4
    } else {
        chars.len()
    };
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < hidden { '•' } else { *c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mask_keeps_last_four() {
        assert_eq!(mask_value("123-45-6789"), "•••••••6789");
        assert_eq!(mask_value("12345678"), "••••5678");
    }

    #[test]
    fn test_mask_short_value_is_fully_hidden() {
        assert_eq!(mask_value("1234"), "••••");
        assert_eq!(mask_value(""), "");
    }

    #[test]
    fn test_summary_line_masks_only_sensitive_fields() {
        let ssn = summary_line(FieldName::Ssn, "123456789");
        assert_eq!(ssn.spans[1].content, "•••••6789");

        let city = summary_line(FieldName::City, "Reno");
        assert_eq!(city.spans[1].content, "Reno");
    }

    #[test]
    fn test_summary_line_flags_missing_values() {
        let line = summary_line(FieldName::Email, "  ");
        assert_eq!(line.spans[1].content, "(missing)");
    }
}
