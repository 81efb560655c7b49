//! Wire types for the spreadsheet logging endpoint

use crate::state::{FieldName, FormRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The flattened record POSTed to the logging endpoint
///
/// Field order matches the spreadsheet columns: 31 business fields followed
/// by three client metadata fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub loan_amount: String,
    pub credit_score: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub zip_code: String,
    pub address: String,
    pub city: String,
    pub residence_time: String,
    pub residence_type: String,
    pub income_source: String,
    pub employment_time: String,
    pub pay_frequency: String,
    pub monthly_income: String,
    pub next_pay_date: String,
    pub employer: String,
    pub job_title: String,
    pub employer_phone: String,
    pub paycheck_method: String,
    pub routing_number: String,
    pub bank_name: String,
    pub account_type: String,
    pub account_length: String,
    pub account_number: String,
    pub drivers_license: String,
    pub license_state: String,
    pub ssn: String,
    pub email: String,
    pub phone: String,
    pub credit_trial: String,
    /// Client clock, ISO-8601 UTC with milliseconds
    pub submission_date: String,
    pub user_agent: String,
    /// Client clock, epoch milliseconds
    pub timestamp: i64,
}

impl SubmissionPayload {
    /// Flatten a record; missing fields become empty strings
    pub fn from_record(record: &FormRecord, user_agent: &str, now: DateTime<Utc>) -> Self {
        let v = |field: FieldName| record.get(field).to_string();
        Self {
            loan_amount: v(FieldName::LoanAmount),
            credit_score: v(FieldName::CreditScore),
            title: v(FieldName::Title),
            first_name: v(FieldName::FirstName),
            last_name: v(FieldName::LastName),
            birth_date: v(FieldName::BirthDate),
            zip_code: v(FieldName::ZipCode),
            address: v(FieldName::Address),
            city: v(FieldName::City),
            residence_time: v(FieldName::ResidenceTime),
            residence_type: v(FieldName::ResidenceType),
            income_source: v(FieldName::IncomeSource),
            employment_time: v(FieldName::EmploymentTime),
            pay_frequency: v(FieldName::PayFrequency),
            monthly_income: v(FieldName::MonthlyIncome),
            next_pay_date: v(FieldName::NextPayDate),
            employer: v(FieldName::Employer),
            job_title: v(FieldName::JobTitle),
            employer_phone: v(FieldName::EmployerPhone),
            paycheck_method: v(FieldName::PaycheckMethod),
            routing_number: v(FieldName::RoutingNumber),
            bank_name: v(FieldName::BankName),
            account_type: v(FieldName::AccountType),
            account_length: v(FieldName::AccountLength),
            account_number: v(FieldName::AccountNumber),
            drivers_license: v(FieldName::DriversLicense),
            license_state: v(FieldName::LicenseState),
            ssn: v(FieldName::Ssn),
            email: v(FieldName::Email),
            phone: v(FieldName::Phone),
            credit_trial: v(FieldName::CreditTrial),
            submission_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: user_agent.to_string(),
            timestamp: now.timestamp_millis(),
        }
    }
}

/// Body returned by the logging endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum EndpointResponse {
    Success {
        #[serde(default)]
        message: String,
        /// Number of columns written
        #[serde(default)]
        row: Option<u64>,
    },
    Error {
        #[serde(default)]
        error: String,
        #[serde(default)]
        message: String,
    },
}

/// What the endpoint told us about a dispatched record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReceipt {
    /// The endpoint reported the row as written
    Confirmed { columns: Option<u64> },
    /// The request went through but the body could not be read as a result
    Unconfirmed,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{} required field(s) are empty", missing.len())]
    Incomplete { missing: Vec<FieldName> },
    #[error("could not reach the logging endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("logging endpoint answered with HTTP {status}")]
    Status { status: u16 },
    #[error("logging endpoint rejected the record: {message} ({error})")]
    Rejected { message: String, error: String },
}

/// Re-check the live record just before dispatch
pub fn ensure_complete(record: &FormRecord) -> Result<(), SubmitError> {
    let missing = record.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SubmitError::Incomplete { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
    }

    fn full_record() -> FormRecord {
        FieldName::ALL
            .iter()
            .map(|f| (*f, format!("{}-value", f.key())))
            .collect()
    }

    #[test]
    fn test_payload_has_34_keys_in_column_order() {
        let payload = SubmissionPayload::from_record(&full_record(), "ua", fixed_now());
        let json = serde_json::to_string(&payload).unwrap();

        let mut expected: Vec<&str> = FieldName::ALL.iter().map(|f| f.key()).collect();
        expected.extend(["submissionDate", "userAgent", "timestamp"]);

        // serde writes struct fields in declaration order
        let mut positions: Vec<usize> = expected
            .iter()
            .map(|k| json.find(&format!("\"{k}\":")).expect("key present"))
            .collect();
        let sorted = {
            let mut p = positions.clone();
            p.sort_unstable();
            p
        };
        assert_eq!(positions, sorted);
        positions.dedup();
        assert_eq!(positions.len(), 34);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 34);
    }

    #[test]
    fn test_payload_copies_values_and_metadata() {
        let payload =
            SubmissionPayload::from_record(&full_record(), "mayaloan-tui/0.1", fixed_now());
        assert_eq!(payload.drivers_license, "driversLicense-value");
        assert_eq!(payload.ssn, "ssn-value");
        assert_eq!(payload.submission_date, "2026-03-04T05:06:07.000Z");
        assert_eq!(payload.timestamp, fixed_now().timestamp_millis());
        assert_eq!(payload.user_agent, "mayaloan-tui/0.1");
    }

    #[test]
    fn test_missing_fields_become_empty_strings() {
        let payload = SubmissionPayload::from_record(&FormRecord::new(), "ua", fixed_now());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["email"], "");
        assert_eq!(value["creditTrial"], "");
    }

    #[test]
    fn test_ensure_complete() {
        assert!(ensure_complete(&full_record()).is_ok());

        let mut record = full_record();
        record.set(FieldName::Email, "");
        match ensure_complete(&record) {
            Err(SubmitError::Incomplete { missing }) => assert_eq!(missing, vec![FieldName::Email]),
            other => panic!("expected Incomplete, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_complete_names_each_missing_field() {
        for field in FieldName::ALL {
            let mut record = full_record();
            record.remove(field);
            match ensure_complete(&record) {
                Err(SubmitError::Incomplete { missing }) => assert_eq!(missing, vec![field]),
                other => panic!("expected Incomplete for {field}, got {other:?}"),
            }
        }
    }

    mod endpoint_response {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_body() {
            let body = r#"{"result":"success","message":"Form submitted successfully","row":35}"#;
            let parsed: EndpointResponse = serde_json::from_str(body).unwrap();
            assert_eq!(
                parsed,
                EndpointResponse::Success {
                    message: "Form submitted successfully".to_string(),
                    row: Some(35),
                }
            );
        }

        #[test]
        fn test_error_body() {
            let body = r#"{"result":"error","error":"SyntaxError: bad json","message":"Failed to process form submission"}"#;
            let parsed: EndpointResponse = serde_json::from_str(body).unwrap();
            assert!(matches!(parsed, EndpointResponse::Error { .. }));
        }

        #[test]
        fn test_unknown_result_does_not_parse() {
            assert!(serde_json::from_str::<EndpointResponse>(r#"{"result":"maybe"}"#).is_err());
            assert!(serde_json::from_str::<EndpointResponse>("<html></html>").is_err());
        }
    }
}
