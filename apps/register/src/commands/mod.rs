//! # Register Commands
//!
//! Every operation the shell can perform on the register.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── inventory.rs  ◄─── list_inventory
//! ├── cart.rs       ◄─── add_to_cart, view_cart, remove_from_cart,
//! │                      decrement_cart_item, clear_cart
//! └── checkout.rs   ◄─── checkout
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Shell reads "2", then "Widget", then "3"                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  add_to_cart(&mut state, "Widget", 3)                                   │
//! │         │                                                               │
//! │         ├── Ok(AddedItem)  ──► "Added: Widget x3 at $5.00"              │
//! │         │                                                               │
//! │         └── Err(ApiError)  ──► print message, back to the menu          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never print. They return view models and the shell formats them.

pub mod cart;
pub mod checkout;
pub mod inventory;

pub use cart::{
    add_to_cart, clear_cart, decrement_cart_item, remove_from_cart, view_cart, AddedItem,
    CartView, Removal, RemoveQuantity,
};
pub use checkout::{checkout, CheckoutOutcome};
pub use inventory::list_inventory;
