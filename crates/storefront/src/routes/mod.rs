//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (resets cart and overlay)
//! GET  /health                 - Health check
//!
//! # Catalog (HTMX fragments)
//! GET  /categories             - Category navigator
//! GET  /plants                 - Product grid, all plants
//! GET  /plants?category=:id    - Product grid, one category
//! GET  /plants/:id             - Detail overlay
//! POST /overlay/close          - Close the detail overlay
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart panel
//! POST /cart/add               - Add one unit (returns cart panel, triggers cart-updated)
//! POST /cart/remove            - Remove a line (returns cart panel, triggers cart-updated)
//! ```

pub mod cart;
pub mod categories;
pub mod home;
pub mod plants;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the plant routes router.
pub fn plant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(plants::index))
        .route("/{id}", get(plants::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog fragments
        .route("/categories", get(categories::index))
        .nest("/plants", plant_routes())
        .route("/overlay/close", post(plants::close_detail))
        // Cart fragments
        .nest("/cart", cart_routes())
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
