//! Declarative step table for the application wizard

use super::field::{FieldName, FieldSpec, FormatRule, InputMask};

/// Number of steps in the wizard
pub const TOTAL_STEPS: usize = 27;

/// What a step asks the applicant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// One or more text/select inputs
    Fields(&'static [FieldSpec]),
    /// Exactly one choice out of a fixed option list
    RadioGroup {
        field: FieldName,
        options: &'static [&'static str],
    },
    /// Final summary, no inputs of its own
    Review,
}

/// One screen of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    /// 1-based position
    pub ordinal: usize,
    pub title: &'static str,
    pub kind: StepKind,
}

impl StepDefinition {
    /// Look up a step by its 1-based ordinal
    #[cfg(test)]
    pub fn get(ordinal: usize) -> Option<&'static StepDefinition> {
        ordinal.checked_sub(1).and_then(|i| STEPS.get(i))
    }

    /// Fields this step writes to the record
    #[cfg(test)]
    pub fn field_names(&self) -> Vec<FieldName> {
        match self.kind {
            StepKind::Fields(specs) => specs.iter().map(|s| s.name).collect(),
            StepKind::RadioGroup { field, .. } => vec![field],
            StepKind::Review => Vec::new(),
        }
    }

    /// The radio field cleared when the applicant backs onto this step
    pub fn radio_field(&self) -> Option<FieldName> {
        match self.kind {
            StepKind::RadioGroup { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Specs of the text/select inputs on this step
    pub fn inputs(&self) -> &'static [FieldSpec] {
        match self.kind {
            StepKind::Fields(specs) => specs,
            _ => &[],
        }
    }
}

const NAME_TITLES: &[&str] = &["Mr", "Mrs", "Ms", "Miss", "Dr"];

const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

const LEGAL_NAME: &[FieldSpec] = &[
    FieldSpec::select(FieldName::Title, NAME_TITLES),
    FieldSpec::text(FieldName::FirstName),
    FieldSpec::text(FieldName::LastName),
];
const BIRTH_DATE: &[FieldSpec] = &[FieldSpec::date(FieldName::BirthDate)];
const ZIP_CODE: &[FieldSpec] = &[FieldSpec::text(FieldName::ZipCode)
    .with_mask(InputMask::Digits(5))
    .with_rule(FormatRule::Zip)];
const STREET_ADDRESS: &[FieldSpec] = &[
    FieldSpec::text(FieldName::Address),
    FieldSpec::text(FieldName::City),
];
const NEXT_PAY_DATE: &[FieldSpec] = &[FieldSpec::date(FieldName::NextPayDate)];
const EMPLOYER: &[FieldSpec] = &[
    FieldSpec::text(FieldName::Employer),
    FieldSpec::text(FieldName::JobTitle),
];
const EMPLOYER_PHONE: &[FieldSpec] = &[FieldSpec::text(FieldName::EmployerPhone)
    .with_mask(InputMask::Phone)
    .with_rule(FormatRule::Phone)];
const ROUTING_NUMBER: &[FieldSpec] = &[FieldSpec::text(FieldName::RoutingNumber)
    .with_mask(InputMask::Digits(9))
    .with_rule(FormatRule::RoutingNumber)];
const BANK_NAME: &[FieldSpec] = &[FieldSpec::text(FieldName::BankName)];
const ACCOUNT_NUMBER: &[FieldSpec] =
    &[FieldSpec::text(FieldName::AccountNumber).with_rule(FormatRule::AccountNumber)];
const DRIVERS_LICENSE: &[FieldSpec] = &[
    FieldSpec::text(FieldName::DriversLicense),
    FieldSpec::select(FieldName::LicenseState, US_STATES),
];
const SSN: &[FieldSpec] = &[FieldSpec::text(FieldName::Ssn)];
const EMAIL: &[FieldSpec] = &[FieldSpec::text(FieldName::Email).with_rule(FormatRule::Email)];
const MOBILE_PHONE: &[FieldSpec] = &[FieldSpec::text(FieldName::Phone)
    .with_mask(InputMask::Phone)
    .with_rule(FormatRule::Phone)];

const fn radio(
    ordinal: usize,
    title: &'static str,
    field: FieldName,
    options: &'static [&'static str],
) -> StepDefinition {
    StepDefinition {
        ordinal,
        title,
        kind: StepKind::RadioGroup { field, options },
    }
}

const fn fields(
    ordinal: usize,
    title: &'static str,
    specs: &'static [FieldSpec],
) -> StepDefinition {
    StepDefinition {
        ordinal,
        title,
        kind: StepKind::Fields(specs),
    }
}

/// The wizard, in order
pub static STEPS: [StepDefinition; TOTAL_STEPS] = [
    radio(
        1,
        "How much would you like to borrow?",
        FieldName::LoanAmount,
        &[
            "$100 - $500",
            "$500 - $1,000",
            "$1,000 - $2,500",
            "$2,500 - $5,000",
        ],
    ),
    radio(
        2,
        "How would you rate your credit?",
        FieldName::CreditScore,
        &[
            "Excellent (720+)",
            "Good (660-719)",
            "Fair (600-659)",
            "Poor (below 600)",
            "Not sure",
        ],
    ),
    fields(3, "What is your legal name?", LEGAL_NAME),
    fields(4, "What is your date of birth?", BIRTH_DATE),
    fields(5, "What is your ZIP code?", ZIP_CODE),
    fields(6, "What is your street address?", STREET_ADDRESS),
    radio(
        7,
        "How long have you lived at this address?",
        FieldName::ResidenceTime,
        &["Less than 1 year", "1-2 years", "3-4 years", "5+ years"],
    ),
    radio(
        8,
        "Do you rent or own your home?",
        FieldName::ResidenceType,
        &["Rent", "Own", "Other"],
    ),
    radio(
        9,
        "What is your main source of income?",
        FieldName::IncomeSource,
        &[
            "Employment",
            "Self-employed",
            "Benefits",
            "Retirement",
            "Other",
        ],
    ),
    radio(
        10,
        "How long have you been with your employer?",
        FieldName::EmploymentTime,
        &["Less than 6 months", "6-12 months", "1-2 years", "3+ years"],
    ),
    radio(
        11,
        "How often are you paid?",
        FieldName::PayFrequency,
        &["Weekly", "Every two weeks", "Twice a month", "Monthly"],
    ),
    radio(
        12,
        "What is your monthly gross income?",
        FieldName::MonthlyIncome,
        &[
            "Under $1,000",
            "$1,000 - $2,000",
            "$2,000 - $3,000",
            "$3,000 - $5,000",
            "$5,000+",
        ],
    ),
    fields(13, "When is your next pay date?", NEXT_PAY_DATE),
    fields(14, "Who do you work for?", EMPLOYER),
    fields(15, "What is your employer's phone number?", EMPLOYER_PHONE),
    radio(
        16,
        "How do you receive your paycheck?",
        FieldName::PaycheckMethod,
        &["Direct deposit", "Paper check"],
    ),
    fields(17, "What is your ABA routing number?", ROUTING_NUMBER),
    fields(18, "What is the name of your bank?", BANK_NAME),
    radio(
        19,
        "What type of bank account do you have?",
        FieldName::AccountType,
        &["Checking", "Savings"],
    ),
    radio(
        20,
        "How long have you had this account?",
        FieldName::AccountLength,
        &["Less than 3 months", "3-12 months", "1-2 years", "2+ years"],
    ),
    fields(21, "What is your bank account number?", ACCOUNT_NUMBER),
    fields(22, "What is your driver's license number?", DRIVERS_LICENSE),
    fields(23, "What is your Social Security number?", SSN),
    fields(24, "What is your email address?", EMAIL),
    fields(25, "What is your mobile number?", MOBILE_PHONE),
    radio(
        26,
        "Would you like a free credit report trial?",
        FieldName::CreditTrial,
        &["Yes", "No"],
    ),
    StepDefinition {
        ordinal: 27,
        title: "Review and submit",
        kind: StepKind::Review,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn test_ordinals_are_sequential() {
        for (i, step) in STEPS.iter().enumerate() {
            assert_eq!(step.ordinal, i + 1);
        }
    }

    #[test]
    fn test_every_field_appears_exactly_once() {
        let all: Vec<FieldName> = STEPS.iter().flat_map(|s| s.field_names()).collect();
        let unique: BTreeSet<FieldName> = all.iter().copied().collect();
        assert_eq!(all.len(), FieldName::COUNT);
        assert_eq!(unique.len(), FieldName::COUNT);
    }

    #[test]
    fn test_get_is_one_based() {
        assert!(StepDefinition::get(0).is_none());
        assert_eq!(StepDefinition::get(1).map(|s| s.ordinal), Some(1));
        assert_eq!(StepDefinition::get(27).map(|s| s.ordinal), Some(27));
        assert!(StepDefinition::get(28).is_none());
    }

    #[test]
    fn test_only_last_step_is_review() {
        let reviews: Vec<usize> = STEPS
            .iter()
            .filter(|s| matches!(s.kind, StepKind::Review))
            .map(|s| s.ordinal)
            .collect();
        assert_eq!(reviews, vec![TOTAL_STEPS]);
    }

    #[test]
    fn test_radio_step_ordinals() {
        let radios: Vec<(usize, FieldName)> = STEPS
            .iter()
            .filter_map(|s| s.radio_field().map(|f| (s.ordinal, f)))
            .collect();
        assert_eq!(
            radios,
            vec![
                (1, FieldName::LoanAmount),
                (2, FieldName::CreditScore),
                (7, FieldName::ResidenceTime),
                (8, FieldName::ResidenceType),
                (9, FieldName::IncomeSource),
                (10, FieldName::EmploymentTime),
                (11, FieldName::PayFrequency),
                (12, FieldName::MonthlyIncome),
                (16, FieldName::PaycheckMethod),
                (19, FieldName::AccountType),
                (20, FieldName::AccountLength),
                (26, FieldName::CreditTrial),
            ]
        );
    }

    #[test]
    fn test_format_rules_sit_on_expected_steps() {
        let rule_of = |n: usize| -> Vec<FormatRule> {
            StepDefinition::get(n)
                .map(|s| s.inputs().iter().filter_map(|f| f.rule).collect())
                .unwrap_or_default()
        };
        assert_eq!(rule_of(5), vec![FormatRule::Zip]);
        assert_eq!(rule_of(15), vec![FormatRule::Phone]);
        assert_eq!(rule_of(17), vec![FormatRule::RoutingNumber]);
        assert_eq!(rule_of(21), vec![FormatRule::AccountNumber]);
        assert_eq!(rule_of(24), vec![FormatRule::Email]);
        assert_eq!(rule_of(25), vec![FormatRule::Phone]);
    }
}
