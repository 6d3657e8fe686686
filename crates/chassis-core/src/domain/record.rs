//! Record
//!
//! A flat JSON object returned by the backend. Records are opaque: fields
//! are rendered when present and shown as a dash otherwise.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::format::{format_label, format_value};

/// Rendered in place of a missing or blank field
pub const PLACEHOLDER: &str = "-";

/// Bookkeeping columns never shown in a detail view
const HIDDEN_KEYS: [&str; 2] = ["timemark", "identitymark"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder used by tests and fixtures
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Keep JSON objects from a backend array, dropping nulls and scalars
    pub fn from_values(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(Record(map)),
                _ => None,
            })
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field as trimmed text; `None` when missing, null, blank or nested
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.0.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Field text or the placeholder dash
    pub fn display(&self, key: &str) -> String {
        self.text(key).unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn has(&self, key: &str) -> bool {
        self.text(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Humanized label/value pairs for a generic detail view
    pub fn display_entries(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter(|(key, _)| !HIDDEN_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (format_label(key), format_value(key, value)))
            .collect()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_and_placeholder() {
        let record = Record::new()
            .with("stock_id", "  HS1234 ")
            .with("wheelbase", 3800)
            .with("customer", Value::Null)
            .with("status", "   ");

        assert_eq!(record.text("stock_id").as_deref(), Some("HS1234"));
        assert_eq!(record.text("wheelbase").as_deref(), Some("3800"));
        assert_eq!(record.display("customer"), "-");
        assert_eq!(record.display("status"), "-");
        assert_eq!(record.display("missing"), "-");
        assert!(!record.has("customer"));
    }

    #[test]
    fn test_from_values_skips_non_objects() {
        let values = vec![json!({"plan_id": "P1"}), Value::Null, json!(5), json!({"plan_id": "P2"})];
        let records = Record::from_values(values);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].display("plan_id"), "P2");
    }

    #[test]
    fn test_display_entries_hides_bookkeeping() {
        let record: Record = serde_json::from_value(json!({
            "so_id": "SO-1",
            "timemark": "x",
            "identitymark": 1,
            "is_paid": true
        }))
        .unwrap();

        let entries = record.display_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&("So Id".to_string(), "SO-1".to_string())));
        assert!(entries.contains(&("Is Paid".to_string(), "TRUE".to_string())));
    }
}
