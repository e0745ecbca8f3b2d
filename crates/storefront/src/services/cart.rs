//! Visitor cart manager.
//!
//! [`CartManager`] is the single owner of a visitor's [`Cart`]. Every
//! mutation happens under the visitor's lock and is followed by a fresh
//! [`CartView`] render, so the displayed total is always recomputed from the
//! current lines.

use tracing::{debug, instrument};

use green_earth_core::{Cart, CartLine, Price};

use crate::error::add_breadcrumb;
use crate::services::Visitor;

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            line_total: line.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Owns the cart of one visitor.
pub struct CartManager {
    visitor: Visitor,
}

impl CartManager {
    #[must_use]
    pub const fn new(visitor: Visitor) -> Self {
        Self { visitor }
    }

    /// Add one unit of `name`, merging with an existing line of that name.
    #[instrument(skip(self), fields(name = %name, price = %price))]
    pub async fn add_to_cart(&self, name: String, price: Price) -> CartView {
        let mut state = self.visitor.lock().await;
        state.cart.add(name.as_str(), price);
        debug!(lines = state.cart.lines().len(), "Added to cart");
        add_breadcrumb("cart", "Added to cart", Some(&[("name", name.as_str())]));
        CartView::from(&state.cart)
    }

    /// Remove the line named `name`. Missing names are ignored.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn remove_from_cart(&self, name: &str) -> CartView {
        let mut state = self.visitor.lock().await;
        if state.cart.remove(name) {
            debug!(lines = state.cart.lines().len(), "Removed from cart");
            add_breadcrumb("cart", "Removed from cart", Some(&[("name", name)]));
        } else {
            debug!("Nothing to remove");
        }
        CartView::from(&state.cart)
    }

    /// Render the current cart. The total is recomputed on every call.
    pub async fn render_cart(&self) -> CartView {
        CartView::from(&self.visitor.lock().await.cart)
    }
}
