//! Listing Commands

use chassis_core::controller::PagedSearch;
use chassis_core::repository::ApiClient;

use super::client;
use crate::models::ListingKind;

/// Controller for one listing screen, bound to the shared client
pub fn listing_controller(kind: ListingKind) -> PagedSearch<ApiClient> {
    let api = client();
    let spec = kind.spec(api.config());
    PagedSearch::new(api, spec)
}
