//! Value Formatting
//!
//! Labels and values for detail views. Dates are rendered in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::record::PLACEHOLDER;

/// `2024-01-31T08:15:00.000Z`, the backend's timestamp shape
static ISO_MILLIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").expect("valid regex"));

/// `body_type` -> `Body Type`
pub fn format_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for c in spaced.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// Render a field value for display
pub fn format_value(key: &str, value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Value::Object(map) if map.get("type").and_then(Value::as_str) == Some("Buffer") => {
            "[Buffer data]".to_string()
        }
        Value::String(s) if s.trim().is_empty() => PLACEHOLDER.to_string(),
        Value::String(s) if ISO_MILLIS.is_match(s) => match parse_datetime(value) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => s.trim().to_string(),
        },
        _ => {
            // Only text is date-sniffed; numeric columns like `owidth` stay numbers
            let lower = key.to_lowercase();
            if value.is_string() && (lower.contains("date") || lower.contains("dt")) {
                if let Some(dt) = parse_datetime(value) {
                    return dt.format("%Y-%m-%d %H:%M:%S").to_string();
                }
            }
            match value {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            }
        }
    }
}

/// `YYYY-MM-DD`, for table cells
pub fn format_date(value: &Value) -> Option<String> {
    parse_datetime(value).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// `YYYY-MM-DD HH:MM`, for list rows
pub fn format_date_time(value: &Value) -> Option<String> {
    parse_datetime(value).map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

/// Best-effort date parsing: RFC 3339, naive date-times, plain dates, epoch millis
pub fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            for pattern in [
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%d %H:%M",
            ] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
                    return Some(naive.and_utc());
                }
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("body_type"), "Body Type");
        assert_eq!(format_label("so_id"), "So Id");
        assert_eq!(format_label("createdt"), "Createdt");
        assert_eq!(format_label("bdm_w"), "Bdm W");
    }

    #[test]
    fn test_format_value_scalars() {
        assert_eq!(format_value("status", &Value::Null), "-");
        assert_eq!(format_value("status", &json!("  ")), "-");
        assert_eq!(format_value("status", &json!(" OPEN ")), "OPEN");
        assert_eq!(format_value("qty", &json!(12)), "12");
        assert_eq!(format_value("paid", &json!(false)), "FALSE");
        assert_eq!(format_value("blob", &json!({"type": "Buffer", "data": [1, 2]})), "[Buffer data]");
    }

    #[test]
    fn test_format_value_dates() {
        assert_eq!(format_value("ddate", &json!("2024-01-31T08:15:42.000Z")), "2024-01-31 08:15");
        assert_eq!(format_value("valid_dt", &json!("2024-01-31 08:15:42")), "2024-01-31 08:15:42");
        assert_eq!(format_value("remark", &json!("2024-01-31 08:15:42")), "2024-01-31 08:15:42");
        assert_eq!(format_value("delivery_date", &json!("not a date")), "not a date");
        assert_eq!(format_value("owidth", &json!(2450)), "2450");
    }

    #[test]
    fn test_format_date_helpers() {
        let value = json!("2023-12-05T23:59:00.000Z");
        assert_eq!(format_date(&value).as_deref(), Some("2023-12-05"));
        assert_eq!(format_date_time(&value).as_deref(), Some("2023-12-05 23:59"));
        assert_eq!(format_date(&json!("2023-12-05")).as_deref(), Some("2023-12-05"));
        assert_eq!(format_date(&json!(0)).as_deref(), Some("1970-01-01"));
        assert_eq!(format_date(&Value::Null), None);
    }
}
