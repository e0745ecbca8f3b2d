//! Cart route handlers.
//!
//! Every handler answers with the whole cart panel so the displayed lines and
//! total are always rendered from the same state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use green_earth_core::Price;

use crate::error::Result;
use crate::services::{CartManager, CartView};
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    pub price: Price,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub name: String,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartTemplate {
    pub cart: CartView,
}

/// Render the cart panel (HTMX).
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let manager = CartManager::new(state.visitor(&session).await?);
    Ok(CartTemplate {
        cart: manager.render_cart().await,
    })
}

/// Add one unit of a plant to the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<impl IntoResponse> {
    let manager = CartManager::new(state.visitor(&session).await?);
    let cart = manager.add_to_cart(form.name, form.price).await;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartTemplate { cart },
    ))
}

/// Remove a whole line from the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<impl IntoResponse> {
    let manager = CartManager::new(state.visitor(&session).await?);
    let cart = manager.remove_from_cart(&form.name).await;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartTemplate { cart },
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use green_earth_core::Cart;

    use super::*;

    fn render(cart: &Cart) -> String {
        CartTemplate {
            cart: CartView::from(cart),
        }
        .render()
        .unwrap()
    }

    #[test]
    fn test_add_form_accepts_decimal_price() {
        let form: AddToCartForm =
            serde_json::from_str(r#"{"name":"Mango Tree","price":"500.50"}"#).unwrap();
        assert_eq!(form.name, "Mango Tree");
        assert_eq!(form.price.to_string(), "৳500.5");
    }

    #[test]
    fn test_empty_cart_renders_zero_total() {
        let html = render(&Cart::new());
        assert!(html.contains("Your cart is empty."));
        assert!(html.contains("৳0"));
    }

    #[test]
    fn test_merged_line_shows_quantity_and_total() {
        let mut cart = Cart::new();
        cart.add("Mango Tree", Price::from_whole(500));
        cart.add("Mango Tree", Price::from_whole(500));

        let html = render(&cart);
        assert!(html.contains("Mango Tree x2"));
        assert!(html.contains("৳1000"));
    }

    #[test]
    fn test_each_line_has_remove_action() {
        let mut cart = Cart::new();
        cart.add("Mango Tree", Price::from_whole(500));
        cart.add("Neem Tree", Price::from_whole(300));

        let html = render(&cart);
        assert_eq!(html.matches(r#"hx-post="/cart/remove""#).count(), 2);
        assert!(html.contains(r#"name="name" value="Neem Tree""#));
    }
}
