//! UI Components
//!
//! One component per screen plus the small pieces they share.

mod title_bar;
mod tab_bar;
mod field_table;
mod login_screen;
mod register_screen;
mod home_screen;
mod record_listing;
mod plan_detail;
mod plan_document;
mod weight_cert_detail;
mod cmh_detail;
mod record_detail;
mod file_viewer;

pub use title_bar::TitleBar;
pub use tab_bar::TabBar;
pub use field_table::{detail_rows, FieldTable};
pub use login_screen::LoginScreen;
pub use register_screen::RegisterScreen;
pub use home_screen::HomeScreen;
pub use record_listing::RecordListing;
pub use plan_detail::PlanDetail;
pub use plan_document::PlanDocument;
pub use weight_cert_detail::WeightCertDetail;
pub use cmh_detail::CmhDetail;
pub use record_detail::RecordDetail;
pub use file_viewer::FileViewer;
