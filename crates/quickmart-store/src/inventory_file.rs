//! # Inventory File
//!
//! Loads and saves the product catalog in the line format of
//! [`quickmart_core::codec`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  start-up          load() ──► ParsedInventory { inventory, skipped }    │
//! │                                   │ skipped lines logged, never fatal   │
//! │                                   ▼                                     │
//! │  each checkout     save(&inventory) ──► tmp sibling ──rename──► file    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use quickmart_core::codec::{self, ParsedInventory};
use quickmart_core::Inventory;
use tracing::{debug, info};

use crate::atomic::write_atomic;
use crate::error::{StoreError, StoreResult};

/// The inventory file on disk.
#[derive(Debug, Clone)]
pub struct InventoryFile {
    path: PathBuf,
}

impl InventoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        InventoryFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the file.
    ///
    /// Malformed lines are dropped and listed in the result; only failing to
    /// read the file at all is an error.
    pub fn load(&self) -> StoreResult<ParsedInventory> {
        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::read(&self.path, e))?;
        let parsed = codec::parse_inventory(&text);

        for skip in &parsed.skipped {
            info!(
                path = %self.path.display(),
                line = skip.line_number,
                reason = %skip.reason,
                "Skipped inventory line"
            );
        }

        info!(
            path = %self.path.display(),
            products = parsed.inventory.len(),
            skipped = parsed.skipped.len(),
            "Inventory loaded"
        );
        Ok(parsed)
    }

    /// Writes every entry in order, replacing the file atomically.
    pub fn save(&self, inventory: &Inventory) -> StoreResult<()> {
        debug!(path = %self.path.display(), products = inventory.len(), "Saving inventory");

        write_atomic(&self.path, &codec::render_inventory(inventory))?;

        info!(path = %self.path.display(), "Inventory saved");
        Ok(())
    }
}
