//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod result;

use crate::app::App;
use crate::state::View;
use components::render_alert_dialog;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let now = Instant::now();
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app, now);

    match app.state.current_view {
        View::Wizard => forms::draw_step(frame, main_area, app),
        View::Submitted => result::draw_success(frame, main_area, app),
        View::SubmitFailed => result::draw_failure(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Alerts sit above everything else
    if let Some(message) = app.state.current_error() {
        render_alert_dialog(frame, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftStore;
    use crate::submit::{MockSubmitter, SubmitReceipt};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::with_parts(
            Box::new(MockSubmitter::new()),
            DraftStore::in_memory(),
            "ua".to_string(),
            true,
        )
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_wizard_screen_has_header_and_status_bar() {
        let text = screen(&app());
        assert!(text.contains("MayaLoan"));
        assert!(text.contains("Step 1 of 27"));
        assert!(text.contains("^C^C:quit"));
    }

    #[test]
    fn test_alert_overlays_the_step() {
        let mut app = app();
        app.push_error("Please complete all required fields before submitting.");
        let text = screen(&app);
        assert!(text.contains("Attention"));
        assert!(text.contains("to continue"));
    }

    #[test]
    fn test_success_panel() {
        let mut app = app();
        app.state.current_view = View::Submitted;
        app.state.receipt = Some(SubmitReceipt::Unconfirmed);
        let text = screen(&app);
        assert!(text.contains("Application Submitted!"));
        assert!(text.contains("did not confirm"));
    }

    #[test]
    fn test_failure_panel() {
        let mut app = app();
        app.state.current_view = View::SubmitFailed;
        app.state.failure = Some("logging endpoint answered with HTTP 500".to_string());
        let text = screen(&app);
        assert!(text.contains("Submission Error"));
        assert!(text.contains("HTTP 500"));
    }
}
