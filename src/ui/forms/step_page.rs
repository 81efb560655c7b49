//! The active wizard step

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use super::radio::draw_radio_group;
use super::review::draw_review;
use crate::app::App;
use crate::state::{FormatRule, StepKind};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the one visible step with its navigation buttons
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = app.state.wizard;
    let step = wizard.current();

    let block = Block::default()
        .title(format!(" Step {} of {} ", step.ordinal, wizard.total()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Question
            Constraint::Min(0),                // Inputs
            Constraint::Length(1),             // Help
            Constraint::Length(BUTTON_HEIGHT), // Buttons
        ])
        .split(inner.inner(Margin::new(1, 0)));

    let question = Paragraph::new(Line::from(Span::styled(
        step.title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(question, chunks[0]);

    match step.kind {
        StepKind::Fields(specs) => {
            let mut constraints: Vec<Constraint> = specs
                .iter()
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .collect();
            constraints.push(Constraint::Min(0));
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(chunks[1]);

            for (idx, spec) in specs.iter().enumerate() {
                draw_field(
                    frame,
                    rows[idx],
                    spec,
                    app.state.record.get(spec.name),
                    idx == app.state.active_input,
                    app.state.field_errors.message_for(spec.name),
                );
            }

            let hint = specs
                .get(app.state.active_input)
                .and_then(|spec| spec.rule)
                .map(format_hint)
                .unwrap_or("Your information is secure");
            draw_help_text(frame, chunks[2], hint);
        }
        StepKind::RadioGroup { field, options } => {
            draw_radio_group(
                frame,
                chunks[1],
                options,
                app.state.selected_option(),
                app.state.radio_cursor,
                app.state.field_errors.message_for(field),
            );
            draw_help_text(
                frame,
                chunks[2],
                "Choosing an option moves on automatically",
            );
        }
        StepKind::Review => {
            draw_review(frame, chunks[1], app);
        }
    }

    draw_buttons(frame, chunks[3], app);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = app.state.wizard;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Min(0),
            Constraint::Length(22),
        ])
        .split(area);

    render_button(frame, chunks[0], "Esc", "Back", false, wizard.step() > 1);

    if wizard.is_last_step() {
        if app.state.submitting {
            render_button(frame, chunks[2], "", "Processing...", true, false);
        } else {
            render_button(frame, chunks[2], "Enter", "Submit", true, app.state.consent);
        }
    } else {
        render_button(frame, chunks[2], "Enter", "Next", true, true);
    }
}

/// Short guidance for a field with a format rule
fn format_hint(rule: FormatRule) -> &'static str {
    match rule {
        FormatRule::Zip => "5-digit US ZIP code",
        FormatRule::Phone => "10-digit number, formatted as you type",
        FormatRule::RoutingNumber => "9 digits, printed at the bottom left of your checks",
        FormatRule::AccountNumber => "4 to 17 digits",
        FormatRule::Email => "We will send your decision here",
        FormatRule::Date => "Year-month-day, for example 1990-01-31",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftStore;
    use crate::state::{FieldName, REQUIRED_MESSAGE};
    use crate::submit::MockSubmitter;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn app() -> App {
        App::with_parts(
            Box::new(MockSubmitter::new()),
            DraftStore::in_memory(),
            "ua".to_string(),
            true,
        )
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_step(frame, frame.area(), app))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_radio_step_lists_options() {
        let screen = render(&app());
        assert!(screen.contains("Step 1 of 27"));
        assert!(screen.contains("How much would you like to borrow?"));
        assert!(screen.contains("$2,500 - $5,000"));
    }

    #[test]
    fn test_fields_step_shows_inline_error() {
        let mut app = app();
        let step = app.state.wizard.show_step(24);
        app.state.enter_step(step, Instant::now());
        app.go_next(Instant::now());
        let screen = render(&app);
        assert!(screen.contains("Email"));
        assert!(screen.contains(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_review_masks_sensitive_values() {
        let mut app = app();
        app.state.record.set(FieldName::Ssn, "123-45-6789");
        app.state.record.set(FieldName::FirstName, "Jane");
        let step = app.state.wizard.show_step(27);
        app.state.enter_step(step, Instant::now());
        let screen = render(&app);
        assert!(screen.contains("Jane"));
        assert!(!screen.contains("123-45-6789"));
        assert!(screen.contains("6789"));
        assert!(screen.contains("Submit"));
    }
}
