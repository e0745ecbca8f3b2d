//! Category navigator.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use green_earth_core::Category;

use crate::catalog::CatalogError;
use crate::state::AppState;

/// Label of the entry that clears the category filter.
pub const ALL_ENTRY_LABEL: &str = "All Trees";

/// One navigator button.
#[derive(Debug, Clone)]
pub struct CategoryEntryView {
    /// `all` for the unfiltered entry, otherwise the category id.
    pub data_id: String,
    pub name: String,
    /// Product grid URL this entry loads.
    pub href: String,
}

impl From<&Category> for CategoryEntryView {
    fn from(category: &Category) -> Self {
        Self {
            data_id: category.id.to_string(),
            name: category.name.clone(),
            href: format!("/plants?category={}", category.id),
        }
    }
}

/// Category navigator display data for templates.
#[derive(Debug, Clone)]
pub struct CategoryNavView {
    pub entries: Vec<CategoryEntryView>,
}

impl CategoryNavView {
    /// The "All Trees" entry followed by one entry per category.
    #[must_use]
    pub fn from_categories(categories: &[Category]) -> Self {
        let all = CategoryEntryView {
            data_id: "all".to_string(),
            name: ALL_ENTRY_LABEL.to_string(),
            href: "/plants".to_string(),
        };

        Self {
            entries: std::iter::once(all)
                .chain(categories.iter().map(CategoryEntryView::from))
                .collect(),
        }
    }

    /// A navigator with no entries, shown when categories fail to load.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build the navigator from a catalog result, logging failures.
    #[must_use]
    pub fn from_result(result: Result<Vec<Category>, CatalogError>) -> Self {
        match result {
            Ok(categories) => Self::from_categories(&categories),
            Err(e) => {
                tracing::error!("Error loading categories: {e}");
                Self::empty()
            }
        }
    }
}

/// Category navigator fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/categories.html")]
pub struct CategoriesTemplate {
    pub nav: CategoryNavView,
}

/// Render the category navigator (HTMX).
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    CategoriesTemplate {
        nav: CategoryNavView::from_result(state.catalog().categories().await),
    }
}
