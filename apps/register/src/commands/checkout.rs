//! # Checkout
//!
//! Turns the cart into a sale: stock decrement, inventory save, receipt.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Cart empty?                     ──► EmptyCart            (no-op)    │
//! │  2. Parse cash                      ──► ValidationError      (no-op)    │
//! │  3. cash < total?                   ──► InsufficientCash     (no-op)    │
//! │  4. Next tx number available?       ──► PersistenceFailure   (no-op)    │
//! │  5. Decrement stock per line, remembering each step (undo list)         │
//! │     product gone from catalog       ──► skipped, warn                   │
//! │  6. Save inventory file             ──► fail: undo, error               │
//! │  7. Write receipt                   ──► fail: undo, re-save, error      │
//! │  8. Advance counter, clear cart     ──► CheckoutOutcome                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed checkout leaves memory, the inventory file, the counter and the
//! cart as they were, so the operator can simply try again.

use std::path::PathBuf;

use quickmart_core::validation::parse_cash;
use quickmart_core::{CoreError, Inventory, Money, Receipt};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::RegisterState;

/// Result of a completed checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub tx_number: u64,
    pub receipt_path: PathBuf,
    pub total: Money,
    /// Cash tendered, rounded to cents.
    pub cash: Money,
    pub change: Money,
    pub savings: Money,
}

/// One applied stock decrement, kept so it can be reversed.
struct StockChange {
    key: String,
    quantity: u32,
}

/// Completes the current transaction with `cash` tendered.
///
/// ## Errors
/// - `CartError` if the cart is empty
/// - `ValidationError` if `cash` is not a non-negative amount
/// - `InsufficientCash` if `cash` is below the total; retry with more
/// - `InsufficientStock` if a line no longer fits the stock on hand
/// - `PersistenceFailure` if the inventory or receipt cannot be written
pub fn checkout(state: &mut RegisterState, cash: &str) -> ApiResult<CheckoutOutcome> {
    debug!(cash = %cash, "checkout command");

    if state.cart().is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let tendered = parse_cash(cash)?;
    let total = state.cart().total(state.tax_rate());
    if tendered < total {
        return Err(CoreError::InsufficientCash { total, tendered }.into());
    }

    let tx_number = state.counter.peek()?;

    let applied = decrement_stock(state)?;

    if let Err(e) = state.inventory_file.save(&state.inventory) {
        error!(tx = tx_number, error = %e, "Inventory save failed, checkout rolled back");
        restore_stock(&mut state.inventory, &applied);
        return Err(e.into());
    }

    let receipt = Receipt::for_cart(
        tx_number,
        state.clock.now(),
        state.session.cart(),
        state.tax_rate(),
        state.customer(),
        &state.inventory,
        tendered,
    );

    let receipt_path = match state.receipts.write(&receipt) {
        Ok(path) => path,
        Err(e) => {
            error!(tx = tx_number, error = %e, "Receipt write failed, checkout rolled back");
            restore_stock(&mut state.inventory, &applied);
            if let Err(resave) = state.inventory_file.save(&state.inventory) {
                error!(
                    error = %resave,
                    "Failed to restore inventory file after receipt failure"
                );
            }
            return Err(e.into());
        }
    };

    state.counter.advance();
    state.session.cart_mut().clear();

    info!(
        tx = tx_number,
        total = %receipt.total,
        change = %receipt.change,
        path = %receipt_path.display(),
        "Checkout complete"
    );

    Ok(CheckoutOutcome {
        tx_number,
        receipt_path,
        total: receipt.total,
        cash: receipt.cash,
        change: receipt.change,
        savings: receipt.savings,
    })
}

/// Applies every cart line to the inventory.
///
/// Products no longer in the catalog are skipped. Any other failure undoes
/// the lines already applied.
fn decrement_stock(state: &mut RegisterState) -> ApiResult<Vec<StockChange>> {
    let mut applied = Vec::new();

    for line in state.session.cart().items() {
        match state
            .inventory
            .adjust_stock(&line.catalog_key, -i64::from(line.quantity))
        {
            Ok(_) => applied.push(StockChange {
                key: line.catalog_key.clone(),
                quantity: line.quantity,
            }),
            Err(CoreError::ProductNotFound(_)) => {
                warn!(product = %line.product_name, "Product no longer in inventory, stock not adjusted");
            }
            Err(e) => {
                restore_stock(&mut state.inventory, &applied);
                return Err(ApiError::from(e));
            }
        }
    }

    Ok(applied)
}

/// Reverses applied decrements, newest first.
fn restore_stock(inventory: &mut Inventory, applied: &[StockChange]) {
    for change in applied.iter().rev() {
        if let Err(e) = inventory.adjust_stock(&change.key, i64::from(change.quantity)) {
            error!(product = %change.key, error = %e, "Failed to restore stock");
        }
    }
}
