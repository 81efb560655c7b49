//! Form domain layer
//!
//! The wizard is described declaratively: a static step table, a flat
//! record of values, a validator over (step, record), and an immutable
//! controller state that moves through the table.

mod field;
mod record;
mod steps;
mod validate;
mod wizard;

pub use field::{FieldName, FieldSpec, FormatRule, InputKind};
pub use record::FormRecord;
pub use steps::StepKind;
pub use validate::{is_step_complete, StepErrors, REQUIRED_MESSAGE};
pub use wizard::{
    PendingAdvance, WizardState, INPUT_ADVANCE_DELAY, INPUT_AUTO_ADVANCE_MAX_STEP,
    RADIO_ADVANCE_DELAY,
};
