//! # Inventory
//!
//! The in-memory product catalog: an insertion-ordered set of
//! [`CatalogEntry`] values keyed case-insensitively by name.
//!
//! Loading from and saving to the inventory file lives in `quickmart-store`;
//! this type only enforces the stock rules.
//!
//! ## Stock Rule
//! ```text
//! adjust_stock("Widget", -3)   stock 10 → 7    ✅
//! adjust_stock("Widget", -8)   stock  7 → -1   ❌ InsufficientStock (unchanged)
//! adjust_stock("Gadget", -1)   not found       ❌ ProductNotFound
//! ```

use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{catalog_key, CatalogEntry};

/// Product catalog owned by the register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<CatalogEntry>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Inventory::default()
    }

    /// Builds an inventory from entries, in order. Later duplicates replace
    /// earlier ones in place.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut inventory = Inventory::new();
        for entry in entries {
            inventory.upsert(entry);
        }
        inventory
    }

    /// Inserts an entry, or replaces the entry with the same key while keeping
    /// its position.
    pub fn upsert(&mut self, entry: CatalogEntry) {
        let key = entry.key();
        match self.entries.iter_mut().find(|e| e.key() == key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        let key = catalog_key(name);
        self.entries.iter().find(|e| e.key() == key)
    }

    /// Applies a signed stock delta and returns the new stock.
    ///
    /// ## Errors
    /// - `ProductNotFound` if no entry matches `name`
    /// - `InsufficientStock` if the result would be negative; stock is left
    ///   unchanged
    pub fn adjust_stock(&mut self, name: &str, delta: i64) -> CoreResult<u32> {
        let key = catalog_key(name);
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.key() == key)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;

        let updated = i64::from(entry.stock) + delta;
        if updated < 0 {
            return Err(CoreError::InsufficientStock {
                product: entry.name.clone(),
                available: entry.stock,
                requested: -delta,
            });
        }

        entry.stock = u32::try_from(updated).map_err(|_| ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::from(u32::MAX),
        })?;

        debug!(product = %entry.name, delta, stock = entry.stock, "Stock adjusted");
        Ok(entry.stock)
    }

    /// Entries in iteration (file) order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if there are no products.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
