//! # Session State
//!
//! One customer transaction: the price tier chosen at the start and the cart
//! being built.
//!
//! ```text
//! begin(Member) ──► add / remove / view ──► checkout ok ──► (session ends)
//!                                     └───► cancel ───────► (session ends)
//! ```

use quickmart_core::{Cart, CustomerType};

/// The transaction in progress.
#[derive(Debug, Clone, Default)]
pub struct Session {
    customer: CustomerType,
    cart: Cart,
}

impl Session {
    /// Starts a transaction with an empty cart.
    pub fn new(customer: CustomerType) -> Self {
        Session {
            customer,
            cart: Cart::new(),
        }
    }

    /// Price tier for the whole transaction.
    pub fn customer(&self) -> CustomerType {
        self.customer
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}
