//! Flat key-value record of everything the applicant has entered

use super::field::FieldName;
use std::collections::BTreeMap;

/// Field values keyed by [`FieldName`]; absent and empty are both "not filled"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRecord {
    values: BTreeMap<FieldName, String>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, empty string when unset
    pub fn get(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn remove(&mut self, field: FieldName) -> Option<String> {
        self.values.remove(&field)
    }

    /// A field counts as filled once it holds something other than whitespace
    pub fn is_filled(&self, field: FieldName) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Fields still empty, in submission order
    pub fn missing_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .iter()
            .copied()
            .filter(|f| !self.is_filled(*f))
            .collect()
    }

    /// Number of non-empty fields
    pub fn filled_count(&self) -> usize {
        FieldName::ALL
            .iter()
            .filter(|f| self.is_filled(**f))
            .count()
    }
}

impl FromIterator<(FieldName, String)> for FormRecord {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
