//! Form field value objects

use std::fmt;

/// The 31 business fields of a loan application, in submission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    LoanAmount,
    CreditScore,
    Title,
    FirstName,
    LastName,
    BirthDate,
    ZipCode,
    Address,
    City,
    ResidenceTime,
    ResidenceType,
    IncomeSource,
    EmploymentTime,
    PayFrequency,
    MonthlyIncome,
    NextPayDate,
    Employer,
    JobTitle,
    EmployerPhone,
    PaycheckMethod,
    RoutingNumber,
    BankName,
    AccountType,
    AccountLength,
    AccountNumber,
    DriversLicense,
    LicenseState,
    Ssn,
    Email,
    Phone,
    CreditTrial,
}

impl FieldName {
    pub const COUNT: usize = 31;

    /// Every field, in the order the logging endpoint expects them
    pub const ALL: [FieldName; Self::COUNT] = [
        Self::LoanAmount,
        Self::CreditScore,
        Self::Title,
        Self::FirstName,
        Self::LastName,
        Self::BirthDate,
        Self::ZipCode,
        Self::Address,
        Self::City,
        Self::ResidenceTime,
        Self::ResidenceType,
        Self::IncomeSource,
        Self::EmploymentTime,
        Self::PayFrequency,
        Self::MonthlyIncome,
        Self::NextPayDate,
        Self::Employer,
        Self::JobTitle,
        Self::EmployerPhone,
        Self::PaycheckMethod,
        Self::RoutingNumber,
        Self::BankName,
        Self::AccountType,
        Self::AccountLength,
        Self::AccountNumber,
        Self::DriversLicense,
        Self::LicenseState,
        Self::Ssn,
        Self::Email,
        Self::Phone,
        Self::CreditTrial,
    ];

    /// JSON key used on the wire and in the draft file
    pub fn key(self) -> &'static str {
        match self {
            Self::LoanAmount => "loanAmount",
            Self::CreditScore => "creditScore",
            Self::Title => "title",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::BirthDate => "birthDate",
            Self::ZipCode => "zipCode",
            Self::Address => "address",
            Self::City => "city",
            Self::ResidenceTime => "residenceTime",
            Self::ResidenceType => "residenceType",
            Self::IncomeSource => "incomeSource",
            Self::EmploymentTime => "employmentTime",
            Self::PayFrequency => "payFrequency",
            Self::MonthlyIncome => "monthlyIncome",
            Self::NextPayDate => "nextPayDate",
            Self::Employer => "employer",
            Self::JobTitle => "jobTitle",
            Self::EmployerPhone => "employerPhone",
            Self::PaycheckMethod => "paycheckMethod",
            Self::RoutingNumber => "routingNumber",
            Self::BankName => "bankName",
            Self::AccountType => "accountType",
            Self::AccountLength => "accountLength",
            Self::AccountNumber => "accountNumber",
            Self::DriversLicense => "driversLicense",
            Self::LicenseState => "licenseState",
            Self::Ssn => "ssn",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CreditTrial => "creditTrial",
        }
    }

    /// Look up a field by its wire key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::LoanAmount => "Loan Amount",
            Self::CreditScore => "Credit Score",
            Self::Title => "Title",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::BirthDate => "Birth Date",
            Self::ZipCode => "Zip Code",
            Self::Address => "Address",
            Self::City => "City",
            Self::ResidenceTime => "Residence Time",
            Self::ResidenceType => "Residence Type",
            Self::IncomeSource => "Income Source",
            Self::EmploymentTime => "Employment Time",
            Self::PayFrequency => "Pay Frequency",
            Self::MonthlyIncome => "Monthly Income",
            Self::NextPayDate => "Next Pay Date",
            Self::Employer => "Employer",
            Self::JobTitle => "Job Title",
            Self::EmployerPhone => "Employer Phone",
            Self::PaycheckMethod => "Paycheck Method",
            Self::RoutingNumber => "Routing Number",
            Self::BankName => "Bank Name",
            Self::AccountType => "Account Type",
            Self::AccountLength => "Account Length",
            Self::AccountNumber => "Account Number",
            Self::DriversLicense => "Driver License",
            Self::LicenseState => "License State",
            Self::Ssn => "SSN",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::CreditTrial => "Credit Trial",
        }
    }

    /// Whether the value should be masked when echoed back on screen
    pub fn is_sensitive(self) -> bool {
        matches!(self, Self::Ssn | Self::AccountNumber | Self::RoutingNumber)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a field takes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    /// Calendar date typed as YYYY-MM-DD
    Date,
    /// Fixed option list cycled with the arrow keys
    Select(&'static [&'static str]),
}

/// Keystroke filter applied while typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMask {
    /// Digits only, truncated to the given length
    Digits(usize),
    /// Digits only, displayed as (xxx) xxx-xxxx
    Phone,
}

impl InputMask {
    /// Apply the mask to a raw value
    pub fn apply(self, raw: &str) -> String {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        match self {
            InputMask::Digits(max) => digits.chars().take(max).collect(),
            InputMask::Phone => format_phone(&digits),
        }
    }
}

/// Format a run of digits the way a US phone number is written
///
/// The area code is bracketed from the third digit on. Six to nine digits
/// are left as typed until the full ten are present.
pub fn format_phone(digits: &str) -> String {
    match digits.len() {
        10.. => format!(
            "({}) {}-{}{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..10],
            &digits[10..]
        ),
        6.. => digits.to_string(),
        3.. => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => digits.to_string(),
    }
}

/// Format rules checked on top of the required-field check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    Zip,
    Phone,
    RoutingNumber,
    AccountNumber,
    Email,
    Date,
}

impl FormatRule {
    /// Inline message shown when the rule fails
    pub fn message(self) -> &'static str {
        match self {
            FormatRule::Zip => "Please enter a valid ZIP code",
            FormatRule::Phone => "Please enter a valid phone number",
            FormatRule::RoutingNumber => "Please enter a valid 9-digit routing number",
            FormatRule::AccountNumber => "Please enter a valid account number",
            FormatRule::Email => "Please enter a valid email address",
            FormatRule::Date => "Please enter a valid date (YYYY-MM-DD)",
        }
    }
}

/// Static description of one input on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub kind: InputKind,
    pub mask: Option<InputMask>,
    pub rule: Option<FormatRule>,
    pub required: bool,
}

impl FieldSpec {
    /// Required free-text field
    pub const fn text(name: FieldName) -> Self {
        Self {
            name,
            kind: InputKind::Text,
            mask: None,
            rule: None,
            required: true,
        }
    }

    /// Required date field
    pub const fn date(name: FieldName) -> Self {
        Self {
            name,
            kind: InputKind::Date,
            mask: None,
            rule: Some(FormatRule::Date),
            required: true,
        }
    }

    /// Required select field
    pub const fn select(name: FieldName, options: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: InputKind::Select(options),
            mask: None,
            rule: None,
            required: true,
        }
    }

    pub const fn with_mask(mut self, mask: InputMask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub const fn with_rule(mut self, rule: FormatRule) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn label(&self) -> &'static str {
        self.name.label()
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, InputKind::Select(_))
    }

    /// Append a typed character, honouring the input mask
    pub fn push_char(&self, value: &str, c: char) -> String {
        if self.is_select() {
            return value.to_string();
        }
        let mut raw = value.to_string();
        raw.push(c);
        match self.mask {
            Some(mask) => mask.apply(&raw),
            None => raw,
        }
    }

    /// Remove the last meaningful character
    pub fn pop_char(&self, value: &str) -> String {
        if self.is_select() {
            return value.to_string();
        }
        match self.mask {
            Some(mask) => {
                // Drop a digit, not a formatting character
                let mut digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
                digits.pop();
                mask.apply(&digits)
            }
            None => {
                let mut raw = value.to_string();
                raw.pop();
                raw
            }
        }
    }

    /// Cycle a select value forward (or backward) through its options
    pub fn cycle(&self, value: &str, forward: bool) -> String {
        let InputKind::Select(options) = self.kind else {
            return value.to_string();
        };
        if options.is_empty() {
            return String::new();
        }
        let next = match options.iter().position(|o| *o == value) {
            None if forward => 0,
            None => options.len() - 1,
            Some(i) if forward => (i + 1) % options.len(),
            Some(0) => options.len() - 1,
            Some(i) => i - 1,
        };
        options[next].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_has_unique_keys() {
        let mut keys: Vec<_> = FieldName::ALL.iter().map(|f| f.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), FieldName::COUNT);
    }

    #[test]
    fn test_from_key_round_trips() {
        for field in FieldName::ALL {
            assert_eq!(FieldName::from_key(field.key()), Some(field));
        }
        assert_eq!(FieldName::from_key("notAField"), None);
    }

    #[test]
    fn test_all_is_sorted_in_submission_order() {
        let mut sorted = FieldName::ALL;
        sorted.sort();
        assert_eq!(sorted, FieldName::ALL);
    }

    #[test]
    fn test_phone_mask_formats_progressively() {
        assert_eq!(InputMask::Phone.apply("55"), "55");
        assert_eq!(InputMask::Phone.apply("5551"), "(555) 1");
        assert_eq!(InputMask::Phone.apply("555"), "(555) ");
        assert_eq!(InputMask::Phone.apply("555123"), "555123");
        assert_eq!(InputMask::Phone.apply("555123456"), "555123456");
        assert_eq!(InputMask::Phone.apply("5551234567"), "(555) 123-4567");
        assert_eq!(InputMask::Phone.apply("(555) 123-45678"), "(555) 123-45678");
    }

    #[test]
    fn test_digits_mask_truncates() {
        assert_eq!(InputMask::Digits(5).apply("12a34567"), "12345");
    }

    #[test]
    fn test_push_char_applies_mask() {
        let zip = FieldSpec::text(FieldName::ZipCode).with_mask(InputMask::Digits(5));
        assert_eq!(zip.push_char("1234", '5'), "12345");
        assert_eq!(zip.push_char("12345", '6'), "12345");
        assert_eq!(zip.push_char("123", 'x'), "123");
    }

    #[test]
    fn test_pop_char_on_phone_drops_digit() {
        let phone = FieldSpec::text(FieldName::Phone).with_mask(InputMask::Phone);
        assert_eq!(phone.pop_char("(555) 123-4567"), "555123456");
        assert_eq!(phone.pop_char("(555) 12"), "(555) 1");
        assert_eq!(phone.pop_char("(555) 1"), "(555) ");
    }

    #[test]
    fn test_select_ignores_typing() {
        let title = FieldSpec::select(FieldName::Title, &["Mr", "Ms"]);
        assert_eq!(title.push_char("Mr", 'x'), "Mr");
        assert_eq!(title.pop_char("Mr"), "Mr");
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let title = FieldSpec::select(FieldName::Title, &["Mr", "Ms", "Dr"]);
        assert_eq!(title.cycle("", true), "Mr");
        assert_eq!(title.cycle("", false), "Dr");
        assert_eq!(title.cycle("Dr", true), "Mr");
        assert_eq!(title.cycle("Mr", false), "Dr");
        assert_eq!(title.cycle("Mr", true), "Ms");
    }
}
