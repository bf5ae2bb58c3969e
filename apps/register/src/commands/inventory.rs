//! Inventory listing.

use quickmart_core::CatalogEntry;
use tracing::debug;

use crate::state::RegisterState;

/// Every product in file order.
pub fn list_inventory(state: &RegisterState) -> Vec<CatalogEntry> {
    debug!(products = state.inventory().len(), "list_inventory command");
    state.inventory().entries().to_vec()
}
