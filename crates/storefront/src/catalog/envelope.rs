//! Response envelopes returned by the catalog API.
//!
//! Each endpoint wraps its payload in an object alongside `status` and
//! `message` fields the storefront ignores. A missing or `null` payload field
//! is not an error; it decodes as an empty list or an empty record.

use serde::Deserialize;

use green_earth_core::{CatalogItem, Category};

/// Body of the list-all and list-by-category endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PlantsEnvelope {
    #[serde(default)]
    pub plants: Option<Vec<CatalogItem>>,
}

impl PlantsEnvelope {
    pub fn into_plants(self) -> Vec<CatalogItem> {
        self.plants.unwrap_or_default()
    }
}

/// Body of the plant detail endpoint.
///
/// The live API nests the record under `plants` even for a single plant, so
/// both spellings are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct PlantDetailEnvelope {
    #[serde(default, alias = "plants")]
    pub plant: Option<CatalogItem>,
}

impl PlantDetailEnvelope {
    pub fn into_plant(self) -> CatalogItem {
        self.plant.unwrap_or_default()
    }
}

/// Body of the list-categories endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

impl CategoriesEnvelope {
    pub fn into_categories(self) -> Vec<Category> {
        self.categories.unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use green_earth_core::{PlantId, Price};

    use super::*;

    #[test]
    fn test_plants_envelope() {
        let json = r#"{
            "status": true,
            "message": "all plants fetched",
            "plants": [
                {
                    "id": 1, "name": "Mango Tree", "description": "Sweet",
                    "category": "Fruit Tree", "price": 500, "image": "a.jpg"
                },
                {
                    "id": 2, "name": "Neem Tree", "description": "Bitter",
                    "category": "Medicinal Tree", "price": 250, "image": "b.jpg"
                }
            ]
        }"#;

        let plants = serde_json::from_str::<PlantsEnvelope>(json)
            .unwrap()
            .into_plants();
        assert_eq!(plants.len(), 2);
        assert_eq!(plants[1].name, "Neem Tree");
        assert_eq!(plants[1].price, Price::from_whole(250));
    }

    #[test]
    fn test_missing_plants_field_is_empty() {
        let envelope: PlantsEnvelope = serde_json::from_str(r#"{"status": false}"#).unwrap();
        assert!(envelope.into_plants().is_empty());
    }

    #[test]
    fn test_null_plants_field_is_empty() {
        let envelope: PlantsEnvelope = serde_json::from_str(r#"{"plants": null}"#).unwrap();
        assert!(envelope.into_plants().is_empty());
    }

    #[test]
    fn test_detail_under_plant_or_plants() {
        let singular: PlantDetailEnvelope =
            serde_json::from_str(r#"{"plant": {"id": 5, "name": "Tulsi"}}"#).unwrap();
        let plural: PlantDetailEnvelope =
            serde_json::from_str(r#"{"plants": {"id": 5, "name": "Tulsi"}}"#).unwrap();

        assert_eq!(singular.into_plant().id, PlantId::new(5));
        assert_eq!(plural.into_plant().name, "Tulsi");
    }

    #[test]
    fn test_missing_detail_is_empty_record() {
        let envelope: PlantDetailEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.into_plant(), CatalogItem::default());
    }

    #[test]
    fn test_categories_envelope() {
        let json = r#"{"categories": [{"id": 1, "category_name": "Fruit Tree"}]}"#;
        let categories = serde_json::from_str::<CategoriesEnvelope>(json)
            .unwrap()
            .into_categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Fruit Tree");
    }

    #[test]
    fn test_missing_categories_is_empty() {
        let envelope: CategoriesEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.into_categories().is_empty());
    }

    #[test]
    fn test_non_object_body_is_error() {
        assert!(serde_json::from_str::<PlantsEnvelope>("<html>oops</html>").is_err());
    }
}
