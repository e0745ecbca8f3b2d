//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tower_sessions::Session;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::middleware::session::SESSION_EXPIRY_SECONDS;
use crate::models::session::visitor_id;
use crate::services::Visitor;

/// Most visitors held at once. The least recently used are dropped first.
const MAX_VISITORS: u64 = 100_000;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog client, configuration, and per-visitor state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    visitors: Cache<String, Visitor>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);

        // Idle visitors expire together with their session cookie
        let visitors = Cache::builder()
            .max_capacity(MAX_VISITORS)
            .time_to_idle(Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs()))
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                visitors,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the plant catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// The state of the visitor behind `session`, created on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn visitor(
        &self,
        session: &Session,
    ) -> Result<Visitor, tower_sessions::session::Error> {
        let id = visitor_id(session).await?;
        Ok(self
            .inner
            .visitors
            .get_with(id, async {
                tracing::debug!("New visitor");
                Visitor::default()
            })
            .await)
    }
}
