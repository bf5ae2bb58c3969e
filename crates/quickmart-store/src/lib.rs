//! # quickmart-store: File Persistence for the Quick Mart Register
//!
//! This crate owns every file the register touches: the inventory file and
//! the receipt directory.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Quick Mart Data Flow                                │
//! │                                                                         │
//! │  Register checkout                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 quickmart-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────────┐  ┌─────────────────┐  ┌──────────────┐   │   │
//! │  │   │ InventoryFile   │  │  ReceiptStore   │  │ Transaction  │   │   │
//! │  │   │                 │  │                 │  │ Counter      │   │   │
//! │  │   │ load / save     │  │ write receipt   │  │ recover from │   │   │
//! │  │   │ (tmp + rename)  │  │ (tmp + rename)  │  │ file names   │   │   │
//! │  │   └─────────────────┘  └─────────────────┘  └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  inventory.txt            receipts/tx_000008_20261017_143005.txt       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`inventory_file`] - Inventory load and atomic save
//! - [`receipts`] - Receipt files and transaction number recovery
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quickmart_store::{InventoryFile, ReceiptStore, TransactionCounter};
//!
//! let parsed = InventoryFile::new("inventory.txt").load()?;
//! let receipts = ReceiptStore::new("receipts");
//! let counter = TransactionCounter::recover(&receipts)?;
//! println!("{} products, next transaction {}", parsed.inventory.len(), counter.peek()?);
//! # Ok::<(), quickmart_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod atomic;
pub mod error;
pub mod inventory_file;
pub mod receipts;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use inventory_file::InventoryFile;
pub use receipts::{ReceiptStore, TransactionCounter};
