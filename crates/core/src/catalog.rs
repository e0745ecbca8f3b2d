//! Catalog records as served by the plant catalog API.
//!
//! Every field falls back to its default when the API omits it, so a detail
//! lookup for an unknown plant decodes to an empty record instead of failing.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, PlantId, Price};

/// One sellable plant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    /// Catalog-unique identifier.
    pub id: PlantId,
    /// Display name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Category label (not an id).
    pub category: String,
    /// Image URL.
    pub image: String,
}

/// A named grouping of plants, used as a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Identifier accepted by the by-category endpoint.
    pub id: CategoryId,
    /// Display label.
    #[serde(rename = "category_name")]
    pub name: String,
    /// Short blurb, when the API provides one.
    pub small_description: Option<String>,
}
