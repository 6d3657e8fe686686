//! Detail Screens
//!
//! Field layouts for the plan and weight-certificate screens and the
//! state of a chassis detail, whose four child collections load
//! independently.

use std::fmt::Display;

use crate::config::ClientConfig;
use crate::domain::paths::{is_pdf, normalize_file_path};
use crate::domain::{Record, FETCH_FAILED, PLACEHOLDER};
use crate::repository::{ChildCollection, FILES, MOVEMENTS, QUOTATIONS, SALES_ORDERS};

/// A labelled field on a detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub key: &'static str,
    /// Shown as `-` unless this other field is present
    pub requires: Option<&'static str>,
}

const fn field(label: &'static str, key: &'static str) -> DetailField {
    DetailField { label, key, requires: None }
}

const fn dependent(label: &'static str, key: &'static str, requires: &'static str) -> DetailField {
    DetailField { label, key, requires: Some(requires) }
}

impl DetailField {
    pub fn value(&self, record: &Record) -> String {
        match self.requires {
            Some(other) if !record.has(other) => PLACEHOLDER.to_string(),
            _ => record.display(self.key),
        }
    }
}

/// `(label, value)` rows for a field list
pub fn field_rows(record: &Record, fields: &[DetailField]) -> Vec<(&'static str, String)> {
    fields.iter().map(|f| (f.label, f.value(record))).collect()
}

pub const PLAN_FIELDS: [DetailField; 11] = [
    field("Plan ID", "plan_id"),
    field("Model ID", "model_id"),
    field("Make", "make"),
    field("Body Type", "body_type"),
    field("Cabin Type", "cabin_type"),
    field("Wheelbase", "wheelbase"),
    field("BDM", "bdm"),
    field("Length", "length"),
    field("Overall Length", "olength"),
    field("Overall Width", "owidth"),
    field("Overall Height", "oheight"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CertTab {
    #[default]
    Main,
    Chassis,
    Details,
}

impl CertTab {
    pub const ALL: [CertTab; 3] = [CertTab::Main, CertTab::Chassis, CertTab::Details];

    pub fn label(&self) -> &'static str {
        match self {
            CertTab::Main => "Main",
            CertTab::Chassis => "Chassis",
            CertTab::Details => "Details",
        }
    }

    pub fn fields(&self) -> &'static [DetailField] {
        match self {
            CertTab::Main => &CERT_MAIN,
            CertTab::Chassis => &CERT_CHASSIS,
            CertTab::Details => &CERT_DETAILS,
        }
    }
}

const CERT_MAIN: [DetailField; 13] = [
    field("Model Group", "mgroup_id"),
    field("Make", "make"),
    field("ID", "model_id"),
    field("Wheelbase", "wheelbase"),
    field("BDM/BGK(W)", "bdm_w"),
    field("BDM/BGK(E)", "bdm_e"),
    field("Axle", "axle"),
    field("C.c", "cc"),
    field("Engine Type", "engine_id"),
    field("Engine Desc", "engine_if"),
    field("Power", "power"),
    field("Torque", "torque"),
    field("Bahan Bakar", "fueltype"),
];

const CERT_CHASSIS: [DetailField; 7] = [
    field("Track Width (Front)", "tw_front"),
    field("Track Width (Rear)", "tw_rear"),
    field("Overall (Length)", "olength"),
    field("Overall (Width)", "owidth"),
    field("Overall (Height)", "oheight"),
    field("Overhang (Front)", "oh_front"),
    field("Overhang (Rear)", "oh_rear"),
];

const CERT_DETAILS: [DetailField; 12] = [
    field("Tyre Width", "tyre_width"),
    field("Rim", "tyre_rim"),
    field("Ply", "tyre_ply"),
    field("Tyre Front", "tyre_front"),
    field("Tyre Back", "tyre_back"),
    field("Wheel Front", "wheel_front"),
    field("Wheel Rear", "wheel_rear"),
    field("Option", "tyre_option"),
    dependent("Gandar Depan", "g_front", "wheelbase"),
    dependent("Gandar Belakang", "g_rear", "wheelbase"),
    dependent("GVW/GCW", "gvw", "wheelbase"),
    field("BDM/BGK(W)", "bdm_w"),
];

pub const CHASSIS_FIELDS: [DetailField; 15] = [
    field("Chassis #", "stock_id"),
    field("Internal #", "internal_id"),
    field("Status", "status"),
    field("Item ID", "item_id"),
    field("Sales Code", "allc_id"),
    field("Location", "location"),
    field("ESN #", "eserial_no"),
    field("Customer", "bc_if"),
    field("Make", "make"),
    field("Model Group", "mgroup_id"),
    field("Eng. Model", "engine_id"),
    field("AP Status", "ap_status"),
    field("AP #", "ap_id"),
    field("Pending", "p_status"),
    field("Reg No", "reg_no"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChassisTab {
    #[default]
    Chassis,
    History,
    Picture,
}

impl ChassisTab {
    pub const ALL: [ChassisTab; 3] = [ChassisTab::Chassis, ChassisTab::History, ChassisTab::Picture];

    pub fn label(&self) -> &'static str {
        match self {
            ChassisTab::Chassis => "Chassis",
            ChassisTab::History => "History",
            ChassisTab::Picture => "Picture",
        }
    }
}

/// One independently loaded part of a screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Slot<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Slot::Loaded(value),
            Err(err) => {
                log::warn!("Detail fetch failed: {}", err);
                Slot::Failed(FETCH_FAILED.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Slot::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Slot::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// A chassis file ready to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    /// Path as stored by the backend
    pub stored_path: String,
    pub url: String,
    pub is_pdf: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChassisDetail {
    pub chassis: Record,
    pub movements: Slot<Vec<Record>>,
    pub sales_orders: Slot<Vec<Record>>,
    pub quotations: Slot<Vec<Record>>,
    pub files: Slot<Vec<Record>>,
}

impl ChassisDetail {
    pub fn new(chassis: Record) -> Self {
        Self {
            chassis,
            movements: Slot::Loading,
            sales_orders: Slot::Loading,
            quotations: Slot::Loading,
            files: Slot::Loading,
        }
    }

    pub fn stock_id(&self) -> Option<String> {
        self.chassis.text("stock_id")
    }

    fn slot_mut(&mut self, collection: ChildCollection) -> Option<&mut Slot<Vec<Record>>> {
        match collection.path {
            p if p == MOVEMENTS.path => Some(&mut self.movements),
            p if p == SALES_ORDERS.path => Some(&mut self.sales_orders),
            p if p == QUOTATIONS.path => Some(&mut self.quotations),
            p if p == FILES.path => Some(&mut self.files),
            _ => None,
        }
    }

    pub fn slot(&self, collection: ChildCollection) -> Option<&Slot<Vec<Record>>> {
        match collection.path {
            p if p == MOVEMENTS.path => Some(&self.movements),
            p if p == SALES_ORDERS.path => Some(&self.sales_orders),
            p if p == QUOTATIONS.path => Some(&self.quotations),
            p if p == FILES.path => Some(&self.files),
            _ => None,
        }
    }

    /// Store one child response. Rows missing the collection's key field
    /// are dropped.
    pub fn apply<E: Display>(&mut self, collection: ChildCollection, result: Result<Vec<Record>, E>) {
        let result = result.map(|rows| {
            rows.into_iter()
                .filter(|r| r.has(collection.key_field))
                .collect::<Vec<_>>()
        });
        if let Some(slot) = self.slot_mut(collection) {
            *slot = Slot::from_result(result);
        }
    }

    /// Every slot has an answer
    pub fn is_settled(&self) -> bool {
        [&self.movements, &self.sales_orders, &self.quotations, &self.files]
            .iter()
            .all(|slot| !slot.is_loading())
    }

    /// Files with a usable path, named by `file_name`, `doctype` or position
    pub fn attachments(&self, config: &ClientConfig) -> Vec<Attachment> {
        let Some(files) = self.files.loaded() else {
            return Vec::new();
        };
        files
            .iter()
            .enumerate()
            .filter_map(|(index, file)| {
                let stored_path = file.text("file_path")?;
                let path = normalize_file_path(&stored_path)?;
                let name = file
                    .text("file_name")
                    .or_else(|| file.text("doctype"))
                    .unwrap_or_else(|| format!("PDF {}", index + 1));
                Some(Attachment {
                    name,
                    is_pdf: is_pdf(&path),
                    url: config.asset_url(&path),
                    stored_path,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClientError;

    fn chassis() -> ChassisDetail {
        ChassisDetail::new(Record::new().with("stock_id", "HS1234").with("status", "SOLD"))
    }

    #[test]
    fn test_slots_fill_independently() {
        let mut detail = chassis();
        detail.apply(
            QUOTATIONS,
            Ok::<_, ClientError>(vec![Record::new().with("quot_id", "Q-1"), Record::new().with("remark", "no id")]),
        );
        assert_eq!(detail.quotations.loaded().map(Vec::len), Some(1));
        assert!(detail.movements.is_loading());
        assert!(!detail.is_settled());

        detail.apply(MOVEMENTS, Err(ClientError::Transport("offline".into())));
        assert_eq!(detail.movements, Slot::Failed(FETCH_FAILED.to_string()));

        detail.apply(SALES_ORDERS, Ok::<_, ClientError>(Vec::new()));
        detail.apply(FILES, Ok::<_, ClientError>(Vec::new()));
        assert!(detail.is_settled());
    }

    #[test]
    fn test_attachments() {
        let mut detail = chassis();
        detail.apply(
            FILES,
            Ok::<_, ClientError>(vec![
                Record::new().with("file_path", r"V:\FILE\CHASSIS\HS1234\front.jpg").with("file_name", "Front"),
                Record::new().with("file_path", "V:/FILE/CHASSIS/HS1234/invoice.pdf").with("doctype", "Invoice"),
                Record::new().with("file_path", "chassis/HS1234/misc.PDF"),
                Record::new().with("file_name", "missing path"),
            ]),
        );

        let config = ClientConfig::default().with_asset_base_url("http://files.local");
        let files = detail.attachments(&config);
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].name, "Front");
        assert_eq!(files[0].url, "http://files.local/chassis/HS1234/front.jpg");
        assert!(!files[0].is_pdf);
        assert_eq!(files[1].name, "Invoice");
        assert!(files[1].is_pdf);
        assert_eq!(files[2].name, "PDF 3");
        assert!(files[2].is_pdf);
    }

    #[test]
    fn test_dependent_fields() {
        let cert = Record::new().with("g_front", "2700").with("tyre_width", "7.50");
        let rows = field_rows(&cert, CertTab::Details.fields());
        assert!(rows.contains(&("Gandar Depan", "-".to_string())));
        assert!(rows.contains(&("Tyre Width", "7.50".to_string())));

        let cert = cert.with("wheelbase", "3800");
        let rows = field_rows(&cert, CertTab::Details.fields());
        assert!(rows.contains(&("Gandar Depan", "2700".to_string())));
    }

    #[test]
    fn test_plan_fields_show_placeholder() {
        let plan = Record::new().with("plan_id", "P-100").with("owidth", 2450);
        let rows = field_rows(&plan, &PLAN_FIELDS);
        assert_eq!(rows[0], ("Plan ID", "P-100".to_string()));
        assert_eq!(rows[2], ("Make", "-".to_string()));
        assert_eq!(rows[9], ("Overall Width", "2450".to_string()));
    }
}
