//! Record Filters
//!
//! Client-side predicates used by the listing controller: substring match for
//! text fields, a numeric/range/substring policy for wheelbase, and the
//! logical AND that combines several active fields.

use once_cell::sync::Lazy;
use regex::Regex;

use super::format::format_date;
use super::record::Record;

/// `3800`, `3800mm`, `3800 MM`
static LENGTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*(?:mm)?\s*$").expect("valid regex"));

/// `3500-4000`, `3500 mm - 4000 mm`
static RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*(?:mm)?\s*-\s*(\d+)\s*(?:mm)?\s*$").expect("valid regex")
});

/// How a field compares against a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchKind {
    #[default]
    Substring,
    Wheelbase,
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn parse_length(text: &str) -> Option<u64> {
    LENGTH.captures(text)?.get(1)?.as_str().parse().ok()
}

fn parse_range(text: &str) -> Option<(u64, u64)> {
    let caps = RANGE.captures(text)?;
    let low = caps.get(1)?.as_str().parse().ok()?;
    let high = caps.get(2)?.as_str().parse().ok()?;
    Some((low, high))
}

/// Wheelbase policy.
///
/// With a numeric query: a numeric field value (`3800`, `3800 mm`) must be
/// equal, a range value (`3500-4000`) must contain it, anything else falls
/// back to substring. A non-numeric query is always a substring match.
pub fn wheelbase_matches(value: &str, query: &str) -> bool {
    let Some(target) = parse_length(query) else {
        return contains_ignore_case(value, query);
    };
    if let Some(length) = parse_length(value) {
        return length == target;
    }
    if let Some((low, high)) = parse_range(value) {
        return low <= target && target <= high;
    }
    contains_ignore_case(value, query)
}

/// One active field query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPredicate {
    pub field: String,
    pub query: String,
    pub kind: MatchKind,
}

impl FieldPredicate {
    pub fn new(field: &str, query: &str, kind: MatchKind) -> Self {
        Self {
            field: field.to_string(),
            query: query.trim().to_string(),
            kind,
        }
    }

    /// A record without the field never matches
    pub fn matches(&self, record: &Record) -> bool {
        let Some(value) = record.text(&self.field) else {
            return false;
        };
        match self.kind {
            MatchKind::Substring => contains_ignore_case(&value, &self.query),
            MatchKind::Wheelbase => wheelbase_matches(&value, &self.query),
        }
    }
}

/// Logical AND of field predicates; an empty set keeps everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    predicates: Vec<FieldPredicate>,
}

impl FilterSet {
    pub fn new(predicates: Vec<FieldPredicate>) -> Self {
        Self { predicates }
    }

    pub fn push(&mut self, predicate: FieldPredicate) {
        self.predicates.push(predicate);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Free-text match over several fields (any field may match).
/// Date-like values are also compared in their `YYYY-MM-DD` form.
pub fn matches_any_field(record: &Record, fields: &[&str], query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        if record.text(field).is_some_and(|value| contains_ignore_case(&value, query)) {
            return true;
        }
        record
            .get(field)
            .and_then(format_date)
            .is_some_and(|date| contains_ignore_case(&date, query))
    })
}
