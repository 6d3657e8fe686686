//! Controller Layer
//!
//! Screen state that outlives a single request: the paged listing with
//! its searches, and the detail screens.

mod detail;
mod lifetime;
mod listing;
mod paged_search;


pub use detail::{
    field_rows, Attachment, CertTab, ChassisDetail, ChassisTab, DetailField, Slot, CHASSIS_FIELDS, PLAN_FIELDS,
};
pub use lifetime::ScreenLifetime;
pub use listing::{ListingSpec, SearchField, CHASSIS_HISTORY, PLANS, WEIGHT_CERTS};
pub use paged_search::{ListSnapshot, Outcome, PagedSearch, SearchMode};
