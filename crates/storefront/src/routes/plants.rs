//! Plant route handlers: the product grid and the detail overlay.
//!
//! Both regions can be requested again before an earlier request for the
//! same region has resolved. Each handler takes a [`RenderTicket`] before
//! calling the catalog and answers `204 No Content` (which HTMX does not
//! swap) if a newer request for the same region started in the meantime.
//!
//! [`RenderTicket`]: crate::services::RenderTicket

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, instrument};

use green_earth_core::{CatalogItem, CategoryId, PlantId};

use crate::catalog::CatalogError;
use crate::error::Result;
use crate::services::RenderTarget;
use crate::state::AppState;

/// Most cards shown in the grid. Extra plants are dropped, not paginated.
pub const MAX_PRODUCT_CARDS: usize = 6;

/// Characters of description shown on a card before the ellipsis.
pub const SNIPPET_CHARS: usize = 60;

/// First [`SNIPPET_CHARS`] characters of `description` followed by `...`.
///
/// Counts characters, not bytes, and does not look for word boundaries.
#[must_use]
pub fn description_snippet(description: &str) -> String {
    let mut snippet: String = description.chars().take(SNIPPET_CHARS).collect();
    snippet.push_str("...");
    snippet
}

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: PlantId,
    pub name: String,
    pub image: String,
    pub snippet: String,
    pub category: String,
    /// Formatted price, e.g. `৳500`.
    pub price: String,
    /// Raw amount posted back by the add-to-cart form.
    pub price_value: String,
}

impl From<&CatalogItem> for ProductCardView {
    fn from(plant: &CatalogItem) -> Self {
        Self {
            id: plant.id,
            name: plant.name.clone(),
            image: plant.image.clone(),
            snippet: description_snippet(&plant.description),
            category: plant.category.clone(),
            price: plant.price.to_string(),
            price_value: plant.price.amount().to_string(),
        }
    }
}

/// Product grid display data for templates.
#[derive(Debug, Clone)]
pub struct ProductGridView {
    pub cards: Vec<ProductCardView>,
    /// The catalog could not be reached or understood.
    pub failed: bool,
}

impl ProductGridView {
    /// Build cards for at most [`MAX_PRODUCT_CARDS`] plants.
    #[must_use]
    pub fn from_plants(plants: &[CatalogItem]) -> Self {
        Self {
            cards: plants
                .iter()
                .take(MAX_PRODUCT_CARDS)
                .map(ProductCardView::from)
                .collect(),
            failed: false,
        }
    }

    /// The "failed to load" placeholder.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            cards: Vec::new(),
            failed: true,
        }
    }

    /// Build the grid from a catalog result, logging failures.
    #[must_use]
    pub fn from_result(result: std::result::Result<Vec<CatalogItem>, CatalogError>) -> Self {
        match result {
            Ok(plants) => Self::from_plants(&plants),
            Err(e) => {
                tracing::error!("Failed to load products: {e}");
                Self::failed()
            }
        }
    }
}

/// Detail overlay display data for templates.
#[derive(Debug, Clone)]
pub struct PlantDetailView {
    pub id: PlantId,
    pub name: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub price_value: String,
}

impl From<&CatalogItem> for PlantDetailView {
    fn from(plant: &CatalogItem) -> Self {
        Self {
            id: plant.id,
            name: plant.name.clone(),
            image: plant.image.clone(),
            description: plant.description.clone(),
            category: plant.category.clone(),
            price: plant.price.to_string(),
            price_value: plant.price.amount().to_string(),
        }
    }
}

/// Product grid filter.
#[derive(Debug, Deserialize)]
pub struct PlantsQuery {
    pub category: Option<CategoryId>,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/products.html")]
pub struct ProductGridTemplate {
    pub grid: ProductGridView,
}

/// Detail overlay fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/plant_detail.html")]
pub struct PlantDetailTemplate {
    pub plant: PlantDetailView,
}

/// Reload the product grid, optionally filtered by category (HTMX).
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PlantsQuery>,
) -> Result<Response> {
    let visitor = state.visitor(&session).await?;
    let ticket = visitor.begin_render(RenderTarget::Products).await;

    let grid = ProductGridView::from_result(state.catalog().plants(query.category).await);

    if !visitor.is_current(ticket).await {
        debug!("Discarding stale product grid");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(ProductGridTemplate { grid }.into_response())
}

/// Open the detail overlay for one plant (HTMX).
///
/// Any overlay already open is closed first; the fragment replaces the whole
/// overlay container, so only one is ever on the page. The overlay state is
/// only written once the catalog has answered and the request is still the
/// newest detail request.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(plant_id): Path<PlantId>,
) -> Result<Response> {
    let visitor = state.visitor(&session).await?;
    let ticket = visitor.begin_render(RenderTarget::Detail).await;

    let result = state.catalog().plant_detail(plant_id).await;

    let mut current = visitor.lock().await;
    if !current.is_current(ticket) {
        debug!("Discarding stale plant detail");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    match result {
        Ok(plant) => {
            if let Some(previous) = current.overlay.open(plant_id) {
                debug!(%previous, "Closed previous overlay");
            }
            Ok(PlantDetailTemplate {
                plant: PlantDetailView::from(&plant),
            }
            .into_response())
        }
        Err(e) => {
            tracing::error!("Failed to load plant detail {plant_id}: {e}");
            current.overlay.close();
            Ok(Html("").into_response())
        }
    }
}

/// Close the detail overlay (HTMX).
///
/// Also supersedes any detail request still in flight, so a slow response
/// cannot reopen the overlay after the user dismissed it.
#[instrument(skip(state, session))]
pub async fn close_detail(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<&'static str>> {
    let visitor = state.visitor(&session).await?;
    let mut current = visitor.lock().await;
    current.begin_render(RenderTarget::Detail);

    if let Some(plant_id) = current.overlay.close() {
        debug!(%plant_id, "Closed overlay");
    }

    Ok(Html(""))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use green_earth_core::Price;

    use super::*;

    fn plant(id: i32, name: &str) -> CatalogItem {
        CatalogItem {
            id: PlantId::new(id),
            name: name.to_string(),
            description: "A hardy tree".to_string(),
            price: Price::from_whole(100),
            category: "Fruit Tree".to_string(),
            image: format!("https://img.example/{id}.jpg"),
        }
    }

    #[test]
    fn test_snippet_cuts_at_sixty_chars() {
        let description = "a".repeat(80);
        let snippet = description_snippet(&description);
        assert_eq!(snippet, format!("{}...", "a".repeat(60)));
    }

    #[test]
    fn test_snippet_short_text_still_gets_ellipsis() {
        assert_eq!(description_snippet("Shade tree"), "Shade tree...");
    }

    #[test]
    fn test_snippet_counts_chars_not_bytes() {
        let description = "আম".repeat(40);
        let snippet = description_snippet(&description);
        assert_eq!(snippet.chars().count(), 63);
    }

    #[test]
    fn test_snippet_cuts_mid_word() {
        let description =
            "Neem is a fast-growing evergreen tree prized for its medicinal leaves and bark";
        assert_eq!(
            description_snippet(description),
            "Neem is a fast-growing evergreen tree prized for its medicin..."
        );
    }

    #[test]
    fn test_grid_caps_at_six_cards() {
        let plants: Vec<_> = (1..=9).map(|i| plant(i, &format!("Plant {i}"))).collect();
        let grid = ProductGridView::from_plants(&plants);

        assert_eq!(grid.cards.len(), MAX_PRODUCT_CARDS);
        assert_eq!(grid.cards[5].name, "Plant 6");
        assert!(!grid.failed);
    }

    #[test]
    fn test_empty_grid_renders_placeholder() {
        let html = ProductGridTemplate {
            grid: ProductGridView::from_plants(&[]),
        }
        .render()
        .unwrap();

        assert!(html.contains("No plants found."));
    }

    #[test]
    fn test_failed_grid_renders_error() {
        let html = ProductGridTemplate {
            grid: ProductGridView::failed(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Failed to load products."));
        assert!(!html.contains("No plants found."));
    }

    #[test]
    fn test_card_markup_has_both_actions() {
        let html = ProductGridTemplate {
            grid: ProductGridView::from_plants(&[plant(7, "Neem Tree")]),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"hx-get="/plants/7""#));
        assert!(html.contains(r#"hx-post="/cart/add""#));
        assert!(html.contains(r#"name="price" value="100""#));
        assert!(html.contains("৳100"));
        assert!(html.contains("A hardy tree..."));
    }

    #[test]
    fn test_card_escapes_markup_in_names() {
        let html = ProductGridTemplate {
            grid: ProductGridView::from_plants(&[plant(1, "<b>Rose</b>")]),
        }
        .render()
        .unwrap();

        assert!(!html.contains("<b>Rose</b>"));
        assert!(html.contains("&lt;b&gt;Rose&lt;/b&gt;"));
    }

    #[test]
    fn test_detail_view_keeps_full_description() {
        let mut mango = plant(1, "Mango Tree");
        mango.description = "x".repeat(200);

        let html = PlantDetailTemplate {
            plant: PlantDetailView::from(&mango),
        }
        .render()
        .unwrap();

        assert!(html.contains(&"x".repeat(200)));
        assert!(html.contains(r#"hx-post="/overlay/close""#));
        assert!(html.contains("Category: Fruit Tree"));
    }

    #[test]
    fn test_empty_detail_record_still_renders() {
        let html = PlantDetailTemplate {
            plant: PlantDetailView::from(&CatalogItem::default()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Price: ৳0"));
    }
}
