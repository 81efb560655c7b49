//! Step controller for the application wizard
//!
//! `WizardState` is a small `Copy` value. Every transition consumes the
//! current state and returns the next one, so callers always hold exactly
//! one authoritative step.

use super::field::FieldName;
use super::record::FormRecord;
use super::steps::{StepDefinition, STEPS, TOTAL_STEPS};
use super::validate::{validate_step, StepErrors};
use std::time::{Duration, Instant};

/// Delay before moving on after a radio option is chosen
pub const RADIO_ADVANCE_DELAY: Duration = Duration::from_millis(500);
/// Delay before moving on after a text/select field on steps 1-2 is completed
pub const INPUT_ADVANCE_DELAY: Duration = Duration::from_millis(300);
/// Last step on which completed text/select inputs auto-advance
pub const INPUT_AUTO_ADVANCE_MAX_STEP: usize = 2;

/// Lifecycle of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    #[default]
    Editing,
    /// Terminal: the record was dispatched successfully
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    step: usize,
    phase: WizardPhase,
}

/// Result of stepping back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retreat {
    pub state: WizardState,
    /// Radio field of the step returned to; its value must be dropped
    pub cleared: Option<FieldName>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: 1,
            phase: WizardPhase::Editing,
        }
    }

    /// 1-based ordinal of the active step
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total(&self) -> usize {
        TOTAL_STEPS
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == WizardPhase::Submitted
    }

    pub fn is_last_step(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    /// Definition of the active step
    pub fn current(&self) -> &'static StepDefinition {
        &STEPS[self.step - 1]
    }

    /// Make step `n` the only active step (clamped to the table)
    pub fn show_step(self, n: usize) -> Self {
        Self {
            step: n.clamp(1, TOTAL_STEPS),
            ..self
        }
    }

    /// Progress through the wizard as a percentage
    pub fn progress_percent(&self) -> f64 {
        self.step as f64 / TOTAL_STEPS as f64 * 100.0
    }

    /// Validate the active step against the record
    pub fn validate(&self, record: &FormRecord) -> Result<(), StepErrors> {
        validate_step(self.current(), record)
    }

    /// Advance by one if the active step validates
    ///
    /// On the last step this returns `self`; submitting is a separate action.
    pub fn go_next(self, record: &FormRecord) -> Result<Self, StepErrors> {
        self.validate(record)?;
        Ok(self.advance())
    }

    /// Advance by one without validating (auto-advance after a choice)
    pub fn advance(self) -> Self {
        if self.phase != WizardPhase::Editing || self.step >= TOTAL_STEPS {
            return self;
        }
        self.show_step(self.step + 1)
    }

    /// Retreat by one, naming the radio field of the step returned to
    pub fn go_prev(self) -> Retreat {
        if self.phase != WizardPhase::Editing || self.step <= 1 {
            return Retreat {
                state: self,
                cleared: None,
            };
        }
        let state = self.show_step(self.step - 1);
        Retreat {
            state,
            cleared: state.current().radio_field(),
        }
    }

    /// Enter the terminal phase
    pub fn mark_submitted(self) -> Self {
        Self {
            phase: WizardPhase::Submitted,
            ..self
        }
    }
}

/// A scheduled move to the next step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    /// Step the advance was scheduled from; stale if the wizard moved
    pub from_step: usize,
    pub due: Instant,
}

impl PendingAdvance {
    pub fn schedule(from_step: usize, delay: Duration, now: Instant) -> Self {
        Self {
            from_step,
            due: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Apply the advance if it is due and still refers to the active step
    pub fn fire(self, state: WizardState, now: Instant) -> Option<WizardState> {
        if !self.is_due(now) || state.step() != self.from_step {
            return None;
        }
        Some(state.advance())
    }
}
