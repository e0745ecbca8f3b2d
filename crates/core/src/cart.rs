//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s keyed by plant *name*.
//! Adding a name that is already present bumps its quantity and keeps the
//! price captured on the first add; removing a name drops the whole line.
//!
//! Lines are merged by display name rather than by plant id, so two catalog
//! entries that share a name collapse into one line priced at whichever was
//! added first. This mirrors the storefront's established behavior and is
//! pending product-owner confirmation before it changes.
//!
//! The total is never stored. [`Cart::total`] sums `price * quantity` over
//! the current lines on every call.

use serde::{Deserialize, Serialize};

use crate::types::Price;

/// One aggregated cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Plant display name. Acts as the merge key.
    pub name: String,
    /// Unit price captured when the line was created.
    pub price: Price,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// An ordered collection of cart lines, at most one per name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `name` at `price`.
    ///
    /// An existing line with the same name gets its quantity incremented and
    /// keeps its original price. Otherwise a new line is appended with
    /// quantity 1. Inputs are not validated.
    pub fn add(&mut self, name: impl Into<String>, price: Price) {
        let name = name.into();
        if let Some(line) = self.lines.iter_mut().find(|line| line.name == name) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                name,
                price,
                quantity: 1,
            });
        }
    }

    /// Remove every line named `name`.
    ///
    /// Returns `true` if a line was removed. Removing an absent name leaves
    /// the cart untouched.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.name != name);
        self.lines.len() != before
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of `price * quantity` over all lines, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
