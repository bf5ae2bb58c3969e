//! # quickmart-core: Pure Business Logic for the Quick Mart Register
//!
//! This crate is the **transaction engine** of the register. It contains the
//! pricing, tax, cart, inventory and receipt rules as pure functions with no
//! I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Quick Mart Register Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shell (stdin/stdout menu)                    │   │
//! │  │   Customer type ──► Add ──► Remove ──► View ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Register Commands                            │   │
//! │  │   add_to_cart, remove_from_cart, checkout, list_inventory       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quickmart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐   │   │
//! │  │  │  money  │ │  types  │ │inventory│ │  cart   │ │ receipt │   │   │
//! │  │  │  Money  │ │ Catalog │ │  stock  │ │  Cart   │ │ render  │   │   │
//! │  │  │ TaxRate │ │LineItem │ │  codec  │ │ totals  │ │  name   │   │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO CLOCK • NO CONSOLE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 quickmart-store (File Layer)                    │   │
//! │  │        inventory file load/save, receipt files, numbering       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogEntry, LineItem, TaxRate, ...)
//! - [`money`] - Exact decimal money and the rounding policy
//! - [`inventory`] - In-memory catalog and stock rules
//! - [`codec`] - Inventory file line format
//! - [`cart`] - Shopping cart and its aggregates
//! - [`receipt`] - Receipt record and rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Operator input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; time is passed in
//! 2. **No I/O**: file system and console access are FORBIDDEN here
//! 3. **Exact Money**: all amounts are decimals, rounded once per aggregate
//! 4. **Explicit Errors**: every failure is a typed error, never a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use quickmart_core::{Cart, CatalogEntry, CustomerType, Money, TaxClass, TaxRate};
//!
//! let widget = CatalogEntry::new(
//!     "Widget",
//!     10,
//!     Money::from_cents(500),
//!     Money::from_cents(400),
//!     TaxClass::Taxable,
//! );
//!
//! let mut cart = Cart::new();
//! cart.add_item(&widget, 3, CustomerType::Regular);
//!
//! let rate = TaxRate::from_bps(650); // 6.5%
//! assert_eq!(cart.subtotal(), Money::from_cents(1500));
//! assert_eq!(cart.tax(rate), Money::from_cents(98));
//! assert_eq!(cart.total(rate).to_string(), "$15.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod codec;
pub mod error;
pub mod inventory;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use codec::{ParsedInventory, SkipReason, SkippedLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use money::Money;
pub use receipt::{Receipt, MAX_TRANSACTION_NUMBER};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax rate applied when nothing else is configured (6.5%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 650;
