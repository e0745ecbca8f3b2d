//! Green Earth Core - Shared domain types.
//!
//! This crate provides the types used by the Green Earth storefront:
//! - `storefront` - Server-rendered plant shop
//! - `integration-tests` - End-to-end harness
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no
//! HTTP clients, no templates. Everything here can be unit tested without a
//! runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`catalog`] - Plant and category records as served by the catalog API
//! - [`cart`] - Shopping cart lines, merging, and totals
//! - [`overlay`] - Detail overlay open/close state machine
//! - [`generation`] - Request-generation counters for discarding stale renders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod generation;
pub mod overlay;
pub mod types;

pub use cart::{Cart, CartLine};
pub use catalog::{CatalogItem, Category};
pub use generation::{Generation, Generations};
pub use overlay::Overlay;
pub use types::*;
