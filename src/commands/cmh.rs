//! Chassis Detail Commands

use chassis_core::repository::ChildCollection;
use chassis_core::Record;

use super::client;

/// Rows of one per-chassis collection
pub async fn list_children(collection: ChildCollection, stock_id: &str) -> Result<Vec<Record>, String> {
    client()
        .children(collection, stock_id)
        .await
        .map_err(|e| e.to_string())
}
