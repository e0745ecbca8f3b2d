//! Per-visitor storefront state.
//!
//! Each browser session maps to one [`Visitor`]: its cart, its detail
//! overlay, and the render generations of the regions that fetch from the
//! catalog. All of it sits behind a single lock per visitor. The session
//! record itself only carries the id (see [`crate::models::session`]).

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use green_earth_core::{Cart, Generation, Generations, Overlay};

/// Page regions whose fetches can race each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    /// The product grid.
    Products,
    /// The detail overlay.
    Detail,
}

/// Proof that a render was started, checked again once its data arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket {
    target: RenderTarget,
    generation: Generation,
}

/// Everything one visitor can change.
#[derive(Debug, Default)]
pub struct VisitorState {
    pub cart: Cart,
    pub overlay: Overlay,
    generations: Generations<RenderTarget>,
}

impl VisitorState {
    /// Start a render of `target`, superseding any earlier one.
    pub fn begin_render(&mut self, target: RenderTarget) -> RenderTicket {
        let generation = self.generations.begin(target);
        tracing::trace!(?target, generation = generation.get(), "Began render");
        RenderTicket { target, generation }
    }

    /// Whether the render behind `ticket` is still the newest for its target.
    #[must_use]
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.generations.is_current(&ticket.target, ticket.generation)
    }
}

/// Shared handle to one visitor's state.
#[derive(Debug, Clone, Default)]
pub struct Visitor {
    state: Arc<Mutex<VisitorState>>,
}

impl Visitor {
    /// Lock the visitor's state. Never hold the guard across a catalog call.
    pub async fn lock(&self) -> MutexGuard<'_, VisitorState> {
        self.state.lock().await
    }

    /// Start a render of `target`, superseding any earlier one.
    pub async fn begin_render(&self, target: RenderTarget) -> RenderTicket {
        self.lock().await.begin_render(target)
    }

    /// Whether the render behind `ticket` is still the newest for its target.
    pub async fn is_current(&self, ticket: RenderTicket) -> bool {
        self.lock().await.is_current(ticket)
    }

    /// Start over after a full page load.
    ///
    /// Empties the cart, closes the overlay, and supersedes every render
    /// still waiting on the catalog.
    pub async fn reset(&self) {
        let mut state = self.lock().await;
        state.cart = Cart::new();
        state.overlay.close();
        state.begin_render(RenderTarget::Products);
        state.begin_render(RenderTarget::Detail);
    }
}
