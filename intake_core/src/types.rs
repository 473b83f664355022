//! Field names and the extracted-field mapping.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the fixed extraction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Company,
    Budget,
    Deadline,
}

impl FieldName {
    /// All fields in canonical order.
    pub const ALL: [Self; 3] = [Self::Company, Self::Budget, Self::Deadline];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Budget => "budget",
            Self::Deadline => "deadline",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError(pub String);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field name: {}", self.0)
    }
}

impl std::error::Error for ParseFieldError {}

impl FromStr for FieldName {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(Self::Company),
            "budget" => Ok(Self::Budget),
            "deadline" => Ok(Self::Deadline),
            other => Err(ParseFieldError(other.to_string())),
        }
    }
}

/// Insertion-ordered mapping from field name to discovered value.
///
/// A field that was not found is absent from the mapping; a present key
/// always carries the string the extractor produced, which may still be
/// blank (the validator treats blank-after-trim as missing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    entries: Vec<(FieldName, String)>,
}

impl ExtractedFields {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a value, replacing any earlier value for the same field
    /// while keeping its original position.
    pub fn insert(&mut self, field: FieldName, value: String) {
        for entry in &mut self.entries {
            if entry.0 == field {
                entry.1 = value;
                return;
            }
        }
        self.entries.push((field, value));
    }

    #[must_use]
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, field: FieldName) -> bool {
        self.entries.iter().any(|(f, _)| *f == field)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_field_name_round_trip() {
        for field in FieldName::ALL {
            let parsed =
                FieldName::from_str(field.as_str()).expect("canonical name should parse back");
            assert_eq!(parsed, field);
        }
        assert!(FieldName::from_str("priority").is_err());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut fields = ExtractedFields::new();
        fields.insert(FieldName::Deadline, "2025-09-01".to_string());
        fields.insert(FieldName::Company, "Acme".to_string());

        let order: Vec<FieldName> = fields.iter().map(|(f, _)| f).collect();
        assert_eq!(order, vec![FieldName::Deadline, FieldName::Company]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut fields = ExtractedFields::new();
        fields.insert(FieldName::Company, "Acme".to_string());
        fields.insert(FieldName::Budget, "$500".to_string());
        fields.insert(FieldName::Company, "Globex".to_string());

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get(FieldName::Company), Some("Globex"));
        let order: Vec<FieldName> = fields.iter().map(|(f, _)| f).collect();
        assert_eq!(order, vec![FieldName::Company, FieldName::Budget]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_serialize_as_ordered_map() {
        let mut fields = ExtractedFields::new();
        fields.insert(FieldName::Company, "Acme".to_string());
        fields.insert(FieldName::Budget, "$10000".to_string());

        let json = serde_json::to_string(&fields).expect("fields should serialize");
        assert_eq!(json, r#"{"company":"Acme","budget":"$10000"}"#);
    }
}
