//! Application state and core logic

use crate::config::TuiConfig;
use crate::draft::DraftStore;
use crate::platform::SUBMIT_MODIFIER;
use crate::state::{
    is_step_complete, AppState, FieldName, PendingAdvance, StepKind, View, INPUT_ADVANCE_DELAY,
    INPUT_AUTO_ADVANCE_MAX_STEP, RADIO_ADVANCE_DELAY,
};
use crate::submit::{
    ensure_complete, SubmissionClient, SubmissionPayload, SubmitError, SubmitReceipt, Submitter,
};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Furthest review scroll offset; the last row of the longer column stays visible
const REVIEW_MAX_SCROLL: u16 = FieldName::COUNT.div_ceil(2) as u16 - 1;

/// Alert shown when the record still has empty required fields at submit time
pub const INCOMPLETE_ALERT: &str = "Please complete all required fields before submitting.";

/// Window for the second Ctrl+C of a double-tap quit
const CTRL_C_WINDOW: Duration = Duration::from_secs(1);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Logging endpoint client
    submitter: Box<dyn Submitter>,
    /// Write-through draft of every answer
    draft: DraftStore,
    user_agent: String,
    /// Move on automatically after a choice
    auto_advance: bool,
    /// Whether the app should quit
    quit: bool,
    /// Transient message for the status bar
    pub status_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance from user configuration
    pub async fn new(config: &TuiConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        let user_agent = config.user_agent();
        let client = SubmissionClient::new(&endpoint, &user_agent, config.request_timeout())?;
        tracing::info!("Logging endpoint: {}", client.endpoint());

        let draft = match config.draft_path() {
            Some(path) => DraftStore::open(path).unwrap_or_else(|e| {
                tracing::warn!("Draft unavailable, answers will not be kept: {e:#}");
                DraftStore::in_memory()
            }),
            None => DraftStore::in_memory(),
        };
        if let Some(path) = draft.path() {
            tracing::info!("Draft file: {}", path.display());
        }

        let mut app = Self::with_parts(Box::new(client), draft, user_agent, config.auto_advance());

        // Check endpoint liveness
        app.state.endpoint_connected = app.submitter.check_endpoint().await;
        if !app.state.endpoint_connected {
            tracing::warn!("Logging endpoint did not answer the liveness check");
        }

        Ok(app)
    }

    /// Assemble an App from its collaborators, restoring any saved draft
    pub fn with_parts(
        submitter: Box<dyn Submitter>,
        draft: DraftStore,
        user_agent: String,
        auto_advance: bool,
    ) -> Self {
        let mut state = AppState::default();
        if !draft.is_empty() {
            let restored = draft.restore(&mut state.record);
            tracing::info!("Restored {restored} of {} saved answers", draft.len());
        }
        state.radio_cursor = state.selected_option().unwrap_or(0);

        Self {
            state,
            submitter,
            draft,
            user_agent,
            auto_advance,
            quit: false,
            status_message: None,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Whether the loop should redraw at animation speed
    pub fn is_animating(&self, now: Instant) -> bool {
        self.state.progress.is_animating(now) || self.state.pending_advance.is_some()
    }

    /// Fire a scheduled auto-advance once it is due
    pub fn tick(&mut self, now: Instant) {
        let Some(pending) = self.state.pending_advance else {
            return;
        };
        if !pending.is_due(now) {
            return;
        }
        self.state.pending_advance = None;
        if let Some(next) = pending.fire(self.state.wizard, now) {
            tracing::debug!("Auto-advancing from step {}", pending.from_step);
            self.state.enter_step(next, now);
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_key_at(key, Instant::now());
    }

    fn handle_key_at(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c(now);
            return;
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        // Nothing to do while a record is in flight
        if self.state.submitting {
            return;
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Wizard => self.handle_wizard_key(key, now),
            View::Submitted => self.handle_submitted_key(key, now),
            View::SubmitFailed => self.handle_failed_key(key, now),
        }
    }

    fn handle_ctrl_c(&mut self, now: Instant) {
        match self.last_ctrl_c {
            Some(prev) if now.saturating_duration_since(prev) <= CTRL_C_WINDOW => {
                self.quit = true;
            }
            _ => {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    fn handle_wizard_key(&mut self, key: KeyEvent, now: Instant) {
        let step = self.state.wizard.current();
        match step.kind {
            StepKind::Fields(_) => self.handle_fields_key(key, now),
            StepKind::RadioGroup { .. } => self.handle_radio_key(key, now),
            StepKind::Review => self.handle_review_key(key, now),
        }
    }

    fn handle_fields_key(&mut self, key: KeyEvent, now: Instant) {
        let inputs = self.state.wizard.current().inputs();
        let Some(spec) = inputs.get(self.state.active_input).copied() else {
            return;
        };
        let current = self.state.record.get(spec.name).to_string();

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.next_input();
                self.schedule_input_advance(now);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.prev_input();
                self.schedule_input_advance(now);
            }
            KeyCode::Enter => self.go_next(now),
            KeyCode::Esc => self.go_prev(now),
            KeyCode::Left | KeyCode::Right if spec.is_select() => {
                let value = spec.cycle(&current, key.code == KeyCode::Right);
                self.set_field(spec.name, value);
                self.schedule_input_advance(now);
            }
            KeyCode::Backspace => {
                let value = spec.pop_char(&current);
                if value != current {
                    self.set_field(spec.name, value);
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let value = spec.push_char(&current, c);
                if value != current {
                    self.set_field(spec.name, value);
                }
            }
            _ => {}
        }
    }

    fn handle_radio_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_radio_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_radio_cursor_down(),
            KeyCode::Char(' ') => self.choose_option(self.state.radio_cursor, now),
            KeyCode::Char(c @ '1'..='9') => {
                self.choose_option((c as usize) - ('1' as usize), now);
            }
            KeyCode::Enter => {
                let cursor = self.state.radio_cursor;
                if self.state.selected_option() != Some(cursor) {
                    self.choose_option(cursor, now);
                }
                self.go_next(now);
            }
            KeyCode::Esc => self.go_prev(now),
            _ => {}
        }
    }

    fn handle_review_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(SUBMIT_MODIFIER) =>
            {
                self.request_submit();
            }
            KeyCode::Char(' ') | KeyCode::Char('c') => {
                self.state.consent = !self.state.consent;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.review_scroll = self.state.review_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.review_scroll = (self.state.review_scroll + 1).min(REVIEW_MAX_SCROLL);
            }
            KeyCode::Enter => self.request_submit(),
            KeyCode::Esc => self.go_prev(now),
            _ => {}
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('n') => {
                tracing::info!("Starting a new application");
                self.state.reset_wizard(now);
            }
            _ => {}
        }
    }

    fn handle_failed_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Enter => self.restart(now),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Validate the active step and move forward on success
    pub fn go_next(&mut self, now: Instant) {
        match self.state.wizard.go_next(&self.state.record) {
            Ok(next) => self.state.enter_step(next, now),
            Err(errors) => {
                tracing::debug!(
                    "Step {} blocked by {} invalid field(s)",
                    self.state.wizard.step(),
                    errors.errors.len()
                );
                self.state.field_errors = errors;
                self.state.focus_first_error();
            }
        }
    }

    /// Step back, dropping the radio answer of the step returned to
    pub fn go_prev(&mut self, now: Instant) {
        let retreat = self.state.wizard.go_prev();
        if let Some(field) = retreat.cleared {
            self.state.record.remove(field);
            if let Err(e) = self.draft.remove(field) {
                tracing::warn!("Could not update draft for {field}: {e:#}");
            }
        }
        self.state.enter_step(retreat.state, now);
    }

    /// Record a value and mirror it to the draft
    fn set_field(&mut self, field: FieldName, value: String) {
        if let Err(e) = self.draft.save(field, &value) {
            tracing::warn!("Could not save draft for {field}: {e:#}");
        }
        self.state.record.set(field, value);
        self.state.field_errors.errors.retain(|e| e.field != field);
    }

    /// Pick an option on the active radio step and schedule the advance
    fn choose_option(&mut self, index: usize, now: Instant) {
        let StepKind::RadioGroup { field, options } = self.state.wizard.current().kind else {
            return;
        };
        let Some(option) = options.get(index) else {
            return;
        };
        self.state.radio_cursor = index;
        self.set_field(field, option.to_string());
        if self.auto_advance {
            self.state.pending_advance = Some(PendingAdvance::schedule(
                self.state.wizard.step(),
                RADIO_ADVANCE_DELAY,
                now,
            ));
        }
    }

    /// Early steps move on by themselves once every input is filled
    fn schedule_input_advance(&mut self, now: Instant) {
        let step = self.state.wizard.current();
        if !self.auto_advance
            || step.ordinal > INPUT_AUTO_ADVANCE_MAX_STEP
            || !is_step_complete(step, &self.state.record)
        {
            return;
        }
        self.state.pending_advance = Some(PendingAdvance::schedule(
            step.ordinal,
            INPUT_ADVANCE_DELAY,
            now,
        ));
    }

    /// Queue the record for dispatch if consent is given and nothing is missing
    ///
    /// The request itself goes out in [`App::dispatch_submission`] so the
    /// loop can draw the in-flight state first.
    pub fn request_submit(&mut self) {
        if !self.state.wizard.is_last_step()
            || self.state.wizard.is_submitted()
            || self.state.submitting
        {
            return;
        }
        if !self.state.consent {
            self.status_message = Some("Tick the consent box to enable Submit".to_string());
            return;
        }
        if let Err(errors) = self.state.wizard.validate(&self.state.record) {
            self.state.field_errors = errors;
            return;
        }
        if let Err(err) = ensure_complete(&self.state.record) {
            if let SubmitError::Incomplete { missing } = &err {
                let keys: Vec<&str> = missing.iter().map(|f| f.key()).collect();
                tracing::warn!(missing = ?keys, "Submission blocked: {err}");
            }
            self.push_error(INCOMPLETE_ALERT);
            return;
        }
        self.state.submitting = true;
    }

    /// Send a queued record to the logging endpoint
    pub async fn dispatch_submission(&mut self) {
        if !self.state.submitting {
            return;
        }
        let payload =
            SubmissionPayload::from_record(&self.state.record, &self.user_agent, Utc::now());
        tracing::info!("Submitting application");
        let result = self.submitter.submit(&payload).await;
        self.state.submitting = false;

        match result {
            Ok(receipt) => {
                match receipt {
                    SubmitReceipt::Confirmed { columns } => {
                        tracing::info!("Application logged ({columns:?} columns)");
                    }
                    SubmitReceipt::Unconfirmed => {
                        tracing::warn!("Application sent but the endpoint did not confirm it");
                    }
                }
                if let Err(e) = self.draft.clear() {
                    tracing::warn!("Could not clear draft: {e:#}");
                }
                self.state.wizard = self.state.wizard.mark_submitted();
                self.state.receipt = Some(receipt);
                self.state.current_view = View::Submitted;
            }
            Err(e) => {
                tracing::error!("Submission failed: {e}");
                self.state.failure = Some(e.to_string());
                self.state.current_view = View::SubmitFailed;
            }
        }
    }

    /// Start over from step 1, keeping whatever the draft still holds
    fn restart(&mut self, now: Instant) {
        self.state.reset_wizard(now);
        let restored = self.draft.restore(&mut self.state.record);
        self.state.radio_cursor = self.state.selected_option().unwrap_or(0);
        tracing::info!("Restarted with {restored} saved answers");
    }
}
