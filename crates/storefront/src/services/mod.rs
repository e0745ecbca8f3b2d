//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Visitor cart manager and cart view rendering
//! - `visitor` - Per-visitor cart, overlay, and render generations

pub mod cart;
pub mod visitor;

pub use cart::{CartLineView, CartManager, CartView};
pub use visitor::{RenderTarget, RenderTicket, Visitor, VisitorState};
