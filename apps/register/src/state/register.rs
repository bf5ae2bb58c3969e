//! # Register State
//!
//! Everything the register owns between start-up and exit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         RegisterState                                   │
//! │                                                                         │
//! │  config ────────── store name, tax rate, receipts dir (read-only)       │
//! │  inventory ─────── in-memory catalog, mutated only by checkout          │
//! │  inventory_file ── where the catalog is saved after each checkout       │
//! │  receipts ──────── receipt directory                                    │
//! │  counter ───────── next transaction number (recovered at start-up)      │
//! │  clock ─────────── timestamps for receipts                              │
//! │  session ───────── customer tier + cart of the current transaction      │
//! │                                                                         │
//! │  Single-threaded: commands take `&mut RegisterState`, no locks.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use quickmart_core::{Cart, CustomerType, Inventory, SkippedLine, TaxRate};
use quickmart_store::{InventoryFile, ReceiptStore, StoreResult, TransactionCounter};
use tracing::info;

use super::clock::Clock;
use super::config::RegisterConfig;
use super::session::Session;

/// The register engine's state.
pub struct RegisterState {
    pub(crate) config: RegisterConfig,
    pub(crate) inventory: Inventory,
    pub(crate) inventory_file: InventoryFile,
    pub(crate) receipts: ReceiptStore,
    pub(crate) counter: TransactionCounter,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) session: Session,
    skipped: Vec<SkippedLine>,
}

impl RegisterState {
    /// Loads the inventory and recovers the transaction counter.
    ///
    /// ## Startup Sequence
    /// 1. Load the inventory file (malformed lines are reported, not fatal)
    /// 2. Scan the receipt directory for the highest transaction number
    pub fn open(
        config: RegisterConfig,
        inventory_path: impl Into<PathBuf>,
        clock: Box<dyn Clock>,
    ) -> StoreResult<Self> {
        let inventory_file = InventoryFile::new(inventory_path);
        let parsed = inventory_file.load()?;

        let receipts = ReceiptStore::new(&config.receipts_dir);
        let counter = TransactionCounter::recover(&receipts)?;

        info!(
            products = parsed.inventory.len(),
            next_tx = ?counter.peek().ok(),
            "Register opened"
        );

        Ok(RegisterState {
            config,
            inventory: parsed.inventory,
            inventory_file,
            receipts,
            counter,
            clock,
            session: Session::default(),
            skipped: parsed.skipped,
        })
    }

    /// Starts a new transaction, discarding any cart in progress.
    pub fn begin_transaction(&mut self, customer: CustomerType) {
        info!(%customer, "Transaction started");
        self.session = Session::new(customer);
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.config.tax_rate
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn customer(&self) -> CustomerType {
        self.session.customer()
    }

    pub fn cart(&self) -> &Cart {
        self.session.cart()
    }

    /// Lines dropped while loading the inventory file.
    pub fn skipped_lines(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Transaction number the next successful checkout will use.
    pub fn next_transaction_number(&self) -> StoreResult<u64> {
        self.counter.peek()
    }
}
