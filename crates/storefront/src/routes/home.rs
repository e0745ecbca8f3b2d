//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::routes::categories::CategoryNavView;
use crate::routes::plants::ProductGridView;
use crate::services::{CartManager, CartView};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub nav: CategoryNavView,
    pub grid: ProductGridView,
    pub cart: CartView,
}

/// Display the home page.
///
/// A full page load starts the visitor over: the cart is emptied, the
/// detail overlay closed, and fragment requests left over from the previous
/// page load are superseded. Categories and the unfiltered grid are fetched
/// concurrently.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let visitor = state.visitor(&session).await?;
    visitor.reset().await;

    let (categories, plants) = tokio::join!(
        state.catalog().categories(),
        state.catalog().all_plants()
    );

    Ok(HomeTemplate {
        nav: CategoryNavView::from_result(categories),
        grid: ProductGridView::from_result(plants),
        cart: CartManager::new(visitor).render_cart().await,
    })
}
