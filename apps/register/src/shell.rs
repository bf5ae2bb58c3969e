//! # Register Shell
//!
//! The interactive menu the operator drives. Generic over its input and
//! output so a whole session can be scripted in tests.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GRAND OPENING banner                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Customer Type (1 REGULAR / 2 MEMBER) ◄──────────────────────────┐      │
//! │       │                                                          │      │
//! │       ▼                                                          │      │
//! │  Menu ──► 1 inventory  2 add  3 remove/adjust  4 empty  5 view   │      │
//! │   ▲  │                                                           │      │
//! │   └──┘    6 checkout ──► cash prompt until enough ──┐            │      │
//! │           7 cancel ─────────────────────────────────┤            │      │
//! │                                                     ▼            │      │
//! │                              Start another transaction (y/n)? ───┘ y    │
//! │                                                     │ n / EOF           │
//! │                                                     ▼                   │
//! │                                                 Goodbye                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! End of input at any prompt ends the session quietly.

use std::io::{self, BufRead, Write};

use quickmart_core::CustomerType;

use crate::commands::{self, RemoveQuantity};
use crate::error::ErrorCode;
use crate::state::RegisterState;

const RULE: &str = "************************";

/// Whether the session goes on after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Transaction finished (checkout or cancel).
    Done,
    /// Input exhausted.
    Quit,
}

/// Interactive register session.
pub struct Shell<'a, R, W> {
    state: &'a mut RegisterState,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(state: &'a mut RegisterState, input: R, output: W) -> Self {
        Shell {
            state,
            input,
            output,
        }
    }

    /// Runs transactions until the operator declines another one or input
    /// ends.
    pub fn run(&mut self) -> io::Result<()> {
        let store = self.state.config().store_name.to_uppercase();
        writeln!(self.output, "\nGRAND OPENING OF {}!\n", store)?;

        loop {
            let Some(customer) = self.choose_customer()? else {
                return Ok(());
            };
            self.state.begin_transaction(customer);

            if self.transaction()? == Flow::Quit {
                return Ok(());
            }

            let another = self.prompt("\nStart another transaction (y/n)? ")?;
            if !matches!(another.as_deref().map(str::to_lowercase).as_deref(), Some("y" | "yes")) {
                writeln!(self.output, "\nThank you and have a good day. Goodbye!\n")?;
                return Ok(());
            }
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Reads one trimmed line; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn choose_customer(&mut self) -> io::Result<Option<CustomerType>> {
        loop {
            writeln!(self.output, "\nCustomer Type:\n 1 - REGULAR\n 2 - MEMBER\n")?;
            match self.read_line()?.as_deref() {
                None => return Ok(None),
                Some("1") => return Ok(Some(CustomerType::Regular)),
                Some("2") => return Ok(Some(CustomerType::Member)),
                Some(_) => writeln!(self.output, "\nInvalid option. Please, try again.\n")?,
            }
        }
    }

    // =========================================================================
    // Menu
    // =========================================================================

    fn transaction(&mut self) -> io::Result<Flow> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                return Ok(Flow::Quit);
            };

            let flow = match choice.as_str() {
                "1" => self.list_inventory()?,
                "2" => self.add_to_cart()?,
                "3" => self.remove_or_adjust()?,
                "4" => self.empty_cart()?,
                "5" => self.view_cart()?,
                "6" => self.checkout()?,
                "7" => {
                    writeln!(self.output, "\nTransaction canceled. Returning to main menu.\n")?;
                    Flow::Done
                }
                _ => {
                    writeln!(self.output, "\nInvalid option. Please, try again.\n")?;
                    Flow::Continue
                }
            };

            if flow != Flow::Continue {
                return Ok(flow);
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nPlease choose an option:\n")?;
        writeln!(self.output, "1 - Check inventory")?;
        writeln!(self.output, "2 - Add to cart")?;
        writeln!(self.output, "3 - Remove/Adjust item from cart")?;
        writeln!(self.output, "4 - Empty cart")?;
        writeln!(self.output, "5 - View cart")?;
        writeln!(self.output, "6 - Checkout")?;
        writeln!(self.output, "7 - Cancel transaction")?;
        write!(self.output, "\nSelect an option: ")?;
        self.output.flush()
    }

    // =========================================================================
    // Options
    // =========================================================================

    fn list_inventory(&mut self) -> io::Result<Flow> {
        let header = format!(
            "{:<20} {:<6} {:<10} {:<10} {:<8}",
            "ITEM", "STOCK", "REGULAR", "MEMBER", "TAX"
        );
        writeln!(self.output, "\n{}", header.trim_end())?;

        for entry in commands::list_inventory(self.state) {
            let row = format!(
                "{:<20} {:<6} ${:<9} ${:<9} {:<8}",
                entry.name,
                entry.stock,
                entry.regular_price.format_plain(),
                entry.member_price.format_plain(),
                entry.tax_class.label()
            );
            writeln!(self.output, "{}", row.trim_end())?;
        }
        Ok(Flow::Continue)
    }

    fn add_to_cart(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("\nProduct name: ")? else {
            return Ok(Flow::Quit);
        };
        if self.state.inventory().find(&name).is_none() {
            writeln!(self.output, "Not found in inventory")?;
            return Ok(Flow::Continue);
        }

        let Some(text) = self.prompt("Quantity: ")? else {
            return Ok(Flow::Quit);
        };
        let Ok(quantity) = text.parse::<i64>() else {
            writeln!(self.output, "\nInvalid quantity.")?;
            return Ok(Flow::Continue);
        };

        match commands::add_to_cart(self.state, &name, quantity) {
            Ok(added) => writeln!(
                self.output,
                "\nAdded: {} x{} at {}",
                added.product_name, added.quantity, added.unit_price
            )?,
            Err(e) => writeln!(self.output, "\n{}.", e.message)?,
        }
        Ok(Flow::Continue)
    }

    fn remove_or_adjust(&mut self) -> io::Result<Flow> {
        if self.state.cart().is_empty() {
            writeln!(self.output, "\nCart is empty.\n")?;
            return Ok(Flow::Continue);
        }

        let name = loop {
            let Some(name) = self.prompt("\nEnter item name to remove or adjust: ")? else {
                return Ok(Flow::Quit);
            };
            if name.eq_ignore_ascii_case("cancel") {
                writeln!(self.output, "\nOperation canceled.\n")?;
                return Ok(Flow::Continue);
            }
            if self.state.cart().find(&name).is_some() {
                break name;
            }
            writeln!(
                self.output,
                "\nItem not found in cart. Please try again or type 'cancel'."
            )?;
        };

        let Some(text) = self.prompt("Enter quantity to remove (or 'all' to remove completely): ")?
        else {
            return Ok(Flow::Quit);
        };

        let result = match text.parse::<RemoveQuantity>() {
            Ok(RemoveQuantity::Units(1)) => commands::decrement_cart_item(self.state, &name),
            Ok(quantity) => commands::remove_from_cart(self.state, &name, quantity),
            Err(quickmart_core::ValidationError::MustBePositive { .. }) => {
                writeln!(self.output, "\nQuantity to remove must be greater than 0.")?;
                return Ok(Flow::Continue);
            }
            Err(_) => {
                writeln!(self.output, "\nInvalid input. Please enter a number or 'all'.")?;
                return Ok(Flow::Continue);
            }
        };

        match result {
            Ok(removal) if removal.remaining == 0 => writeln!(
                self.output,
                "\nAll units of {} removed from cart.",
                removal.product_name
            )?,
            Ok(removal) => writeln!(
                self.output,
                "{} units of {} removed. New quantity is {}.",
                removal.removed, removal.product_name, removal.remaining
            )?,
            Err(e) => writeln!(self.output, "\n{}", e.message)?,
        }
        Ok(Flow::Continue)
    }

    fn empty_cart(&mut self) -> io::Result<Flow> {
        if self.state.cart().is_empty() {
            writeln!(self.output, "\nCart is already empty.\n")?;
            return Ok(Flow::Continue);
        }

        let Some(answer) = self.prompt("\nAre you sure you want to empty the cart (y/n)? ")? else {
            return Ok(Flow::Quit);
        };
        if matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            commands::clear_cart(self.state);
            writeln!(self.output, "\nCart emptied.\n")?;
        } else {
            writeln!(self.output, "\nCart not emptied.\n")?;
        }
        Ok(Flow::Continue)
    }

    fn view_cart(&mut self) -> io::Result<Flow> {
        if self.state.cart().is_empty() {
            writeln!(self.output, "\nCart is empty.\n")?;
            return Ok(Flow::Continue);
        }
        self.print_cart()?;
        Ok(Flow::Continue)
    }

    fn print_cart(&mut self) -> io::Result<()> {
        let view = commands::view_cart(self.state);

        let header = format!("{:<20} {:<6} {:<10} {:<10}", "ITEM", "QTY", "UNIT", "TOTAL");
        writeln!(self.output, "\n{}", header.trim_end())?;
        for item in &view.items {
            let row = format!(
                "{:<20} {:<6} ${:<9} ${:<9}",
                item.product_name,
                item.quantity,
                item.unit_price.format_plain(),
                item.line_total().format_plain()
            );
            writeln!(self.output, "{}", row.trim_end())?;
        }

        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "SUB-TOTAL: {}", view.totals.subtotal)?;
        writeln!(self.output, "TAX: {}", view.totals.tax)?;
        writeln!(self.output, "TOTAL: {}", view.totals.total)?;
        if view.totals.savings.is_positive() {
            writeln!(self.output, "YOU WILL SAVE: {}!", view.totals.savings)?;
        }
        Ok(())
    }

    fn checkout(&mut self) -> io::Result<Flow> {
        if self.state.cart().is_empty() {
            writeln!(self.output, "\nCart is empty.\n")?;
            return Ok(Flow::Continue);
        }
        self.print_cart()?;

        loop {
            let Some(cash) = self.prompt("Cash received: $")? else {
                return Ok(Flow::Quit);
            };

            match commands::checkout(self.state, &cash) {
                Ok(outcome) => {
                    writeln!(self.output, "\nChange: {}", outcome.change)?;
                    writeln!(
                        self.output,
                        "\nReceipt created: {}",
                        outcome.receipt_path.display()
                    )?;
                    return Ok(Flow::Done);
                }
                Err(e) if e.code == ErrorCode::InsufficientCash => {
                    writeln!(self.output, "\nNot enough cash provided. Please try again.")?;
                }
                Err(e) if e.code == ErrorCode::ValidationError => {
                    writeln!(self.output, "\nInvalid amount. Please enter a number.")?;
                }
                Err(e) => {
                    writeln!(self.output, "\nError saving receipt or inventory: {}", e.message)?;
                    return Ok(Flow::Continue);
                }
            }
        }
    }
}
