//! Field Table Component
//!
//! Label/value rows used by every detail screen.

use chassis_core::controller::{field_rows, DetailField};
use chassis_core::Record;
use leptos::prelude::*;

/// Rows for a fixed field list
pub fn detail_rows(record: &Record, fields: &[DetailField]) -> Vec<(String, String)> {
    field_rows(record, fields)
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect()
}

#[component]
pub fn FieldTable(rows: Vec<(String, String)>) -> impl IntoView {
    view! {
        <div class="field-table">
            {rows
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="field-row">
                            <span class="field-label">{label}</span>
                            <span class="field-value">{value}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
