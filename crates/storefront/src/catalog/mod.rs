//! Plant catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`, decoded with `serde_json`
//! - One request per call: no retry, no timeout, no caching
//! - Missing payload fields decode as empty (see [`envelope`])
//!
//! # Endpoints
//!
//! | Request                          | Path              | Payload field |
//! |----------------------------------|-------------------|---------------|
//! | [`CatalogRequest::All`]          | `plants`          | `plants`      |
//! | [`CatalogRequest::ByCategory`]   | `category/{id}`   | `plants`      |
//! | [`CatalogRequest::Detail`]       | `plant/{id}`      | `plant`       |
//! | [`CatalogRequest::Categories`]   | `categories`      | `categories`  |
//!
//! # Example
//!
//! ```rust,ignore
//! use green_earth_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let plants = client.plants(None).await?;
//! let detail = client.plant_detail(plants[0].id).await?;
//! ```

pub mod envelope;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use green_earth_core::{CatalogItem, Category, CategoryId, PlantId};

use crate::config::CatalogConfig;
use envelope::{CategoriesEnvelope, PlantDetailEnvelope, PlantsEnvelope};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not a valid envelope.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-success status with a body that could not be decoded.
    #[error("Unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// The four reads the storefront makes against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRequest {
    All,
    ByCategory(CategoryId),
    Detail(PlantId),
    Categories,
}

impl CatalogRequest {
    /// Path relative to the API root.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::All => "plants".to_string(),
            Self::ByCategory(id) => format!("category/{id}"),
            Self::Detail(id) => format!("plant/{id}"),
            Self::Categories => "categories".to_string(),
        }
    }
}

impl fmt::Display for CatalogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the plant catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
            }),
        }
    }

    /// The API root requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Perform one GET and decode the body as `T`.
    ///
    /// The body is decoded regardless of status so that an API answering a
    /// lookup miss with a well-formed envelope still yields (empty) data.
    async fn fetch<T: DeserializeOwned>(&self, request: CatalogRequest) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(&request.path())?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                %request,
                status = %status,
                body = %response_text.chars().take(200).collect::<String>(),
                "Catalog API returned non-success status"
            );
        }

        match serde_json::from_str(&response_text) {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(CatalogError::Status(status)),
            Err(e) => {
                tracing::error!(
                    %request,
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Plant Methods
    // =========================================================================

    /// List every plant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    #[instrument(skip(self))]
    pub async fn all_plants(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let plants = self
            .fetch::<PlantsEnvelope>(CatalogRequest::All)
            .await?
            .into_plants();
        debug!(count = plants.len(), "Fetched plants");
        Ok(plants)
    }

    /// List the plants in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn plants_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let plants = self
            .fetch::<PlantsEnvelope>(CatalogRequest::ByCategory(category_id))
            .await?
            .into_plants();
        debug!(count = plants.len(), "Fetched plants for category");
        Ok(plants)
    }

    /// List plants, filtered by category when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn plants(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        match category_id {
            Some(id) => self.plants_by_category(id).await,
            None => self.all_plants().await,
        }
    }

    /// Get one plant's full record.
    ///
    /// An unknown id yields an empty record rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    #[instrument(skip(self), fields(plant_id = %plant_id))]
    pub async fn plant_detail(&self, plant_id: PlantId) -> Result<CatalogItem, CatalogError> {
        Ok(self
            .fetch::<PlantDetailEnvelope>(CatalogRequest::Detail(plant_id))
            .await?
            .into_plant())
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// List every category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let categories = self
            .fetch::<CategoriesEnvelope>(CatalogRequest::Categories)
            .await?
            .into_categories();
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }
}
