//! Per-step validation

use super::field::{FieldName, FieldSpec, FormatRule};
use super::record::FormRecord;
use super::steps::{StepDefinition, StepKind};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex_lite::Regex;

static ZIP_RE: Lazy<Regex> = Lazy::new(|| pattern(r"^\d{5}$"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| pattern(r"^[+]?[1-9][0-9]{0,15}$"));
static PHONE_SEPARATORS_RE: Lazy<Regex> = Lazy::new(|| pattern(r"[\s\-()]"));
static ROUTING_RE: Lazy<Regex> = Lazy::new(|| pattern(r"^\d{9}$"));
static ACCOUNT_RE: Lazy<Regex> = Lazy::new(|| pattern(r"^\d{4,17}$"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Compile one of the fixed patterns above
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("valid field regex")
}

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const SELECT_OPTION_MESSAGE: &str = "Please select an option";

pub fn is_valid_zip(value: &str) -> bool {
    ZIP_RE.is_match(value)
}

/// Spaces, dashes and parentheses are ignored before matching
pub fn is_valid_phone(value: &str) -> bool {
    let stripped = PHONE_SEPARATORS_RE.replace_all(value, "");
    PHONE_RE.is_match(&stripped)
}

pub fn is_valid_routing_number(value: &str) -> bool {
    ROUTING_RE.is_match(value)
}

pub fn is_valid_account_number(value: &str) -> bool {
    ACCOUNT_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

impl FormatRule {
    pub fn check(self, value: &str) -> bool {
        match self {
            FormatRule::Zip => is_valid_zip(value),
            FormatRule::Phone => is_valid_phone(value),
            FormatRule::RoutingNumber => is_valid_routing_number(value),
            FormatRule::AccountNumber => is_valid_account_number(value),
            FormatRule::Email => is_valid_email(value),
            FormatRule::Date => is_valid_date(value),
        }
    }
}

/// An inline error attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldName,
    pub message: &'static str,
}

/// Every problem found on a step, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepErrors {
    pub errors: Vec<FieldError>,
}

impl StepErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_for(&self, field: FieldName) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn fields(&self) -> Vec<FieldName> {
        self.errors.iter().map(|e| e.field).collect()
    }

    fn push(&mut self, field: FieldName, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }
}

fn check_input(spec: &FieldSpec, record: &FormRecord) -> Option<&'static str> {
    let value = record.get(spec.name);
    if value.trim().is_empty() {
        return spec.required.then_some(REQUIRED_MESSAGE);
    }
    // The required message wins over a format message for the same field
    match spec.rule {
        Some(rule) if !rule.check(value) => Some(rule.message()),
        _ => None,
    }
}

/// Validate the inputs of one step against the current record
pub fn validate_step(step: &StepDefinition, record: &FormRecord) -> Result<(), StepErrors> {
    let mut errors = StepErrors::default();
    match step.kind {
        StepKind::RadioGroup { field, .. } => {
            if !record.is_filled(field) {
                errors.push(field, SELECT_OPTION_MESSAGE);
            }
        }
        StepKind::Fields(specs) => {
            for spec in specs {
                if let Some(message) = check_input(spec, record) {
                    errors.push(spec.name, message);
                }
            }
        }
        StepKind::Review => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether every required input on the step holds a value (formats unchecked)
pub fn is_step_complete(step: &StepDefinition, record: &FormRecord) -> bool {
    match step.kind {
        StepKind::RadioGroup { field, .. } => record.is_filled(field),
        StepKind::Fields(specs) => specs
            .iter()
            .filter(|s| s.required)
            .all(|s| record.is_filled(s.name)),
        StepKind::Review => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::steps::{STEPS, TOTAL_STEPS};
    use pretty_assertions::assert_eq;

    /// A record that passes every step
    fn valid_record() -> FormRecord {
        let mut record = FormRecord::new();
        for field in FieldName::ALL {
            record.set(field, "filled");
        }
        record.set(FieldName::Title, "Ms");
        record.set(FieldName::BirthDate, "1990-04-12");
        record.set(FieldName::ZipCode, "90210");
        record.set(FieldName::NextPayDate, "2026-11-01");
        record.set(FieldName::EmployerPhone, "(555) 123-4567");
        record.set(FieldName::RoutingNumber, "123456789");
        record.set(FieldName::AccountNumber, "00012345");
        record.set(FieldName::LicenseState, "CA");
        record.set(FieldName::Email, "jane@example.com");
        record.set(FieldName::Phone, "+1 555 987 6543");
        record
    }

    fn step(n: usize) -> &'static StepDefinition {
        StepDefinition::get(n).expect("step exists")
    }

    mod format_rules {
        use super::*;

        #[test]
        fn test_zip() {
            assert!(!is_valid_zip("1234"));
            assert!(is_valid_zip("12345"));
            assert!(!is_valid_zip("123456"));
            assert!(!is_valid_zip("1234a"));
        }

        #[test]
        fn test_routing_number() {
            assert!(!is_valid_routing_number("12345678"));
            assert!(is_valid_routing_number("123456789"));
            assert!(!is_valid_routing_number("1234567890"));
        }

        #[test]
        fn test_account_number() {
            assert!(!is_valid_account_number("123"));
            assert!(is_valid_account_number("1234"));
            assert!(is_valid_account_number("12345678901234567"));
            assert!(!is_valid_account_number("123456789012345678"));
        }

        #[test]
        fn test_email() {
            assert!(is_valid_email("a@b.com"));
            assert!(!is_valid_email("a@b"));
            assert!(!is_valid_email("a b@c.com"));
            assert!(!is_valid_email("@b.com"));
        }

        #[test]
        fn test_phone_strips_separators() {
            assert!(is_valid_phone("(555) 123-4567"));
            assert!(is_valid_phone("+1 555 123 4567"));
            assert!(!is_valid_phone("0555123456"));
            assert!(!is_valid_phone("555-CALL-NOW"));
            assert!(!is_valid_phone(""));
            // 17 digits is one too many
            assert!(!is_valid_phone("12345678901234567"));
        }

        #[test]
        fn test_date() {
            assert!(is_valid_date("2000-02-29"));
            assert!(!is_valid_date("2001-02-29"));
            assert!(!is_valid_date("02/03/2001"));
        }
    }

    mod steps {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_every_step_passes_with_valid_record() {
            let record = valid_record();
            for def in STEPS.iter() {
                assert_eq!(validate_step(def, &record), Ok(()), "step {}", def.ordinal);
            }
        }

        #[test]
        fn test_every_step_fails_on_empty_record_except_review() {
            let record = FormRecord::new();
            for def in STEPS.iter() {
                let result = validate_step(def, &record);
                if def.ordinal == TOTAL_STEPS {
                    assert!(result.is_ok());
                } else {
                    let errors = result.expect_err("empty step should fail");
                    assert_eq!(errors.fields(), def.field_names());
                }
            }
        }

        #[test]
        fn test_each_field_blocks_its_step_when_cleared() {
            for def in STEPS.iter() {
                for field in def.field_names() {
                    let mut record = valid_record();
                    record.remove(field);
                    let errors = validate_step(def, &record).expect_err("missing field");
                    assert_eq!(errors.fields(), vec![field]);
                }
            }
        }

        #[test]
        fn test_radio_step_message() {
            let errors = validate_step(step(1), &FormRecord::new()).unwrap_err();
            assert_eq!(
                errors.message_for(FieldName::LoanAmount),
                Some(SELECT_OPTION_MESSAGE)
            );
        }

        #[test]
        fn test_required_message_wins_over_format() {
            let mut record = valid_record();
            record.set(FieldName::ZipCode, "  ");
            let errors = validate_step(step(5), &record).unwrap_err();
            assert_eq!(
                errors.message_for(FieldName::ZipCode),
                Some(REQUIRED_MESSAGE)
            );
        }

        #[test]
        fn test_format_failure_on_zip_step() {
            let mut record = valid_record();
            record.set(FieldName::ZipCode, "1234");
            let errors = validate_step(step(5), &record).unwrap_err();
            assert_eq!(
                errors.message_for(FieldName::ZipCode),
                Some("Please enter a valid ZIP code")
            );
        }

        #[test]
        fn test_format_failure_on_email_step() {
            let mut record = valid_record();
            record.set(FieldName::Email, "a@b");
            let errors = validate_step(step(24), &record).unwrap_err();
            assert_eq!(
                errors.message_for(FieldName::Email),
                Some("Please enter a valid email address")
            );
        }

        #[test]
        fn test_format_rules_only_apply_on_their_step() {
            let mut record = valid_record();
            record.set(FieldName::Email, "a@b");
            // Step 23 (SSN) does not look at the email field
            assert!(validate_step(step(23), &record).is_ok());
        }

        #[test]
        fn test_is_step_complete_ignores_format() {
            let mut record = FormRecord::new();
            record.set(FieldName::ZipCode, "12");
            assert!(is_step_complete(step(5), &record));
            assert!(validate_step(step(5), &record).is_err());
        }

        #[test]
        fn test_is_step_complete_multi_field() {
            let mut record = FormRecord::new();
            record.set(FieldName::Address, "1 Main St");
            assert!(!is_step_complete(step(6), &record));
            record.set(FieldName::City, "Springfield");
            assert!(is_step_complete(step(6), &record));
        }
    }
}
