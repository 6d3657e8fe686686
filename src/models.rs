//! Frontend Models
//!
//! Screens and per-listing presentation. Records themselves come from
//! `chassis_core`.

use chassis_core::controller::{Attachment, ListingSpec};
use chassis_core::{ClientConfig, Record};

/// Which screen is showing
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    Register,
    Home,
    Listing(ListingKind),
    PlanDetail(Record),
    PlanDocument(Record),
    WeightCertDetail(Record),
    ChassisDetail(Record),
    /// Generic key/value view (sales order, chassis item, file)
    RecordDetail { title: String, record: Record },
    FileViewer(Attachment),
}

impl Screen {
    /// Screens reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Screen::Login | Screen::Register)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Plans,
    WeightCerts,
    ChassisHistory,
}

impl ListingKind {
    pub fn title(&self) -> &'static str {
        match self {
            ListingKind::Plans => "Plan List",
            ListingKind::WeightCerts => "Weight Certificates",
            ListingKind::ChassisHistory => "Chassis Movement History",
        }
    }

    pub fn spec(&self, config: &ClientConfig) -> ListingSpec {
        match self {
            ListingKind::Plans => ListingSpec::plans(config),
            ListingKind::WeightCerts => ListingSpec::weight_certs(config),
            ListingKind::ChassisHistory => ListingSpec::chassis_history(config),
        }
    }

    pub fn empty_text(&self) -> &'static str {
        match self {
            ListingKind::Plans => "No plans found",
            ListingKind::WeightCerts => "No weight certificates found",
            ListingKind::ChassisHistory => "No chassis records found",
        }
    }

    /// Card heading: `(label, value)` plus a badge
    pub fn card_heading(&self, record: &Record) -> (&'static str, String, String) {
        match self {
            ListingKind::Plans => (
                "Plan ID",
                record.display("plan_id"),
                format!("Model ID: {}", record.text("model_id").unwrap_or_else(|| "N/A".into())),
            ),
            ListingKind::WeightCerts => (
                "Model Group",
                record.display("mgroup_id"),
                format!("Make: {}", record.display("make")),
            ),
            ListingKind::ChassisHistory => (
                "Chassis #",
                record.display("stock_id"),
                format!("Status: {}", record.text("status").unwrap_or_else(|| "Unknown".into())),
            ),
        }
    }

    pub fn card_rows(&self, record: &Record) -> Vec<(&'static str, String)> {
        match self {
            ListingKind::Plans => vec![
                ("Body Type", truncate(&record.display("body_type"), BODY_TYPE_MAX)),
                ("BDM", record.display("bdm")),
                ("Wheelbase", record.display("wheelbase")),
            ],
            ListingKind::WeightCerts => vec![
                ("ID", record.display("model_id")),
                ("Wheelbase", record.display("wheelbase")),
                ("BDM/BGK(W)", record.display("bdm_w")),
                ("BDM/BGK(E)", record.display("bdm_e")),
                ("Axle", record.display("axle")),
            ],
            ListingKind::ChassisHistory => vec![
                ("Item ID", record.display("item_id")),
                ("Model Group", record.display("mgroup_id")),
                ("Customer", record.display("bc_if")),
                ("Location", record.display("location")),
                (
                    "Create Date",
                    record
                        .get("createdt")
                        .and_then(chassis_core::domain::format::format_date)
                        .unwrap_or_else(|| record.display("createdt")),
                ),
            ],
        }
    }

    pub fn detail_screen(&self, record: Record) -> Screen {
        match self {
            ListingKind::Plans => Screen::PlanDetail(record),
            ListingKind::WeightCerts => Screen::WeightCertDetail(record),
            ListingKind::ChassisHistory => Screen::ChassisDetail(record),
        }
    }
}

const BODY_TYPE_MAX: usize = 50;

/// Cut to `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 50), "short");
        let long = "x".repeat(60);
        assert_eq!(truncate(&long, 50), format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_plan_card() {
        let record = Record::new().with("plan_id", "P-7").with("wheelbase", "4200");
        let (label, value, badge) = ListingKind::Plans.card_heading(&record);
        assert_eq!((label, value.as_str()), ("Plan ID", "P-7"));
        assert_eq!(badge, "Model ID: N/A");
        let rows = ListingKind::Plans.card_rows(&record);
        assert_eq!(rows[0], ("Body Type", "-".to_string()));
        assert_eq!(rows[2], ("Wheelbase", "4200".to_string()));
    }
}
