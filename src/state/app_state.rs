//! Application state definitions

use super::forms::{FieldName, FormRecord, PendingAdvance, StepErrors, StepKind, WizardState};
use super::progress::ProgressAnimation;
use crate::submit::SubmitReceipt;
use std::collections::VecDeque;
use std::time::Instant;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Filling in the wizard, one step at a time
    #[default]
    Wizard,
    /// Application dispatched
    Submitted,
    /// Dispatch failed; `r` starts over from the draft
    SubmitFailed,
}

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,

    // Wizard
    pub wizard: WizardState,
    pub record: FormRecord,
    pub field_errors: StepErrors,
    /// Index of the focused input on a fields step
    pub active_input: usize,
    /// Highlighted option on a radio step
    pub radio_cursor: usize,
    /// Review step consent checkbox
    pub consent: bool,
    pub review_scroll: u16,
    pub pending_advance: Option<PendingAdvance>,

    // Submission
    /// Set while a record is queued for or waiting on the endpoint
    pub submitting: bool,
    pub receipt: Option<SubmitReceipt>,
    pub failure: Option<String>,

    // UI state
    pub endpoint_connected: bool,
    pub progress: ProgressAnimation,
    errors: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let wizard = WizardState::new();
        Self {
            current_view: View::default(),
            wizard,
            record: FormRecord::new(),
            field_errors: StepErrors::default(),
            active_input: 0,
            radio_cursor: 0,
            consent: false,
            review_scroll: 0,
            pending_advance: None,
            submitting: false,
            receipt: None,
            failure: None,
            endpoint_connected: false,
            progress: ProgressAnimation::at(wizard.progress_percent() / 100.0, Instant::now()),
            errors: VecDeque::new(),
        }
    }
}

impl AppState {
    /// Queue an alert for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Alert currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Make `next` the active wizard state and reset per-step UI state
    pub fn enter_step(&mut self, next: WizardState, now: Instant) {
        let moved = next.step() != self.wizard.step();
        self.wizard = next;
        self.field_errors = StepErrors::default();
        if moved {
            self.pending_advance = None;
            self.active_input = 0;
            self.review_scroll = 0;
            self.radio_cursor = self.selected_option().unwrap_or(0);
            self.progress.retarget(next.progress_percent() / 100.0, now);
        }
    }

    /// Index of the chosen option on the active radio step
    pub fn selected_option(&self) -> Option<usize> {
        match self.wizard.current().kind {
            StepKind::RadioGroup { field, options } => {
                let value = self.record.get(field);
                options.iter().position(|o| *o == value)
            }
            _ => None,
        }
    }

    /// Field under the cursor on a fields step
    pub fn active_field(&self) -> Option<FieldName> {
        self.wizard
            .current()
            .inputs()
            .get(self.active_input)
            .map(|spec| spec.name)
    }

    /// Move focus to the next input, wrapping
    pub fn next_input(&mut self) {
        let count = self.wizard.current().inputs().len();
        if count > 0 {
            self.active_input = (self.active_input + 1) % count;
        }
    }

    /// Move focus to the previous input, wrapping
    pub fn prev_input(&mut self) {
        let count = self.wizard.current().inputs().len();
        if count > 0 {
            self.active_input = (self.active_input + count - 1) % count;
        }
    }

    /// Focus the first input that failed validation
    pub fn focus_first_error(&mut self) {
        let failed = self.field_errors.fields();
        if let Some(index) = self
            .wizard
            .current()
            .inputs()
            .iter()
            .position(|spec| failed.contains(&spec.name))
        {
            self.active_input = index;
        }
    }

    pub fn move_radio_cursor_down(&mut self) {
        if let StepKind::RadioGroup { options, .. } = self.wizard.current().kind {
            if self.radio_cursor + 1 < options.len() {
                self.radio_cursor += 1;
            }
        }
    }

    pub fn move_radio_cursor_up(&mut self) {
        self.radio_cursor = self.radio_cursor.saturating_sub(1);
    }

    /// Return to step 1 with an empty record
    pub fn reset_wizard(&mut self, now: Instant) {
        self.current_view = View::Wizard;
        self.record = FormRecord::new();
        self.consent = false;
        self.submitting = false;
        self.receipt = None;
        self.failure = None;
        self.errors.clear();
        self.field_errors = StepErrors::default();
        self.pending_advance = None;
        self.active_input = 0;
        self.radio_cursor = 0;
        self.review_scroll = 0;
        self.wizard = WizardState::new();
        self.progress = ProgressAnimation::at(self.wizard.progress_percent() / 100.0, now);
    }
}
