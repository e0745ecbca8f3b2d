//! End-to-end test harness for the Green Earth storefront.
//!
//! [`TestContext::new`] serves a [`FakeCatalog`] and the real storefront
//! router on ephemeral local ports, then hands back a cookie-aware client so
//! tests exercise sessions exactly as a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p green-earth-integration-tests
//! ```

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use green_earth_storefront::{
    app,
    config::{CatalogConfig, StorefrontConfig},
    state::AppState,
};

/// In-process stand-in for the remote plant catalog API.
#[derive(Debug, Clone, Default)]
pub struct FakeCatalog {
    /// Plant records in API shape.
    pub plants: Vec<Value>,
    /// Category records in API shape.
    pub categories: Vec<Value>,
    /// Answer every request with `500` and a plain-text body.
    pub broken: bool,
    /// Delay applied to category-filtered plant listings.
    pub category_delay: Duration,
    /// Delay applied to plant detail lookups.
    pub detail_delay: Duration,
}

impl FakeCatalog {
    /// A catalog with `count` plants, all in category 1 ("Fruit Tree").
    #[must_use]
    pub fn with_plants(count: i32) -> Self {
        Self {
            plants: (1..=count)
                .map(|id| {
                    let name = format!("Plant {id}");
                    plant(id, &name, 100 * i64::from(id), "Fruit Tree")
                })
                .collect(),
            categories: vec![category(1, "Fruit Tree")],
            ..Self::default()
        }
    }

    /// A catalog whose every endpoint fails.
    #[must_use]
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    fn router(self) -> Router {
        Router::new()
            .route("/api/plants", get(all_plants))
            .route("/api/category/{id}", get(plants_by_category))
            .route("/api/plant/{id}", get(plant_detail))
            .route("/api/categories", get(categories))
            .with_state(Arc::new(self))
    }

    fn category_name(&self, id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c["id"].as_i64() == Some(id))
            .and_then(|c| c["category_name"].as_str())
    }
}

/// A plant record in API shape.
#[must_use]
pub fn plant(id: i32, name: &str, price: i64, category: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} grows well in full sun and needs watering twice a week."),
        "category": category,
        "price": price,
        "image": format!("https://img.example/{id}.jpg"),
    })
}

/// A category record in API shape.
#[must_use]
pub fn category(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "category_name": name,
        "small_description": format!("All about {name}"),
    })
}

fn upstream_down() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response()
}

async fn all_plants(State(catalog): State<Arc<FakeCatalog>>) -> Response {
    if catalog.broken {
        return upstream_down();
    }
    Json(json!({ "status": true, "plants": catalog.plants })).into_response()
}

async fn plants_by_category(
    State(catalog): State<Arc<FakeCatalog>>,
    Path(id): Path<i64>,
) -> Response {
    if catalog.broken {
        return upstream_down();
    }
    tokio::time::sleep(catalog.category_delay).await;

    let plants: Vec<&Value> = catalog.category_name(id).map_or_else(Vec::new, |name| {
        catalog
            .plants
            .iter()
            .filter(|p| p["category"].as_str() == Some(name))
            .collect()
    });
    Json(json!({ "status": true, "plants": plants })).into_response()
}

async fn plant_detail(State(catalog): State<Arc<FakeCatalog>>, Path(id): Path<i64>) -> Response {
    if catalog.broken {
        return upstream_down();
    }
    tokio::time::sleep(catalog.detail_delay).await;

    // The live API names the detail field `plants`
    catalog
        .plants
        .iter()
        .find(|p| p["id"].as_i64() == Some(id))
        .map_or_else(
            || {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "status": false, "message": "Plant not found" })),
                )
                    .into_response()
            },
            |p| Json(json!({ "status": true, "plants": p })).into_response(),
        )
}

async fn categories(State(catalog): State<Arc<FakeCatalog>>) -> Response {
    if catalog.broken {
        return upstream_down();
    }
    Json(json!({ "status": true, "categories": catalog.categories })).into_response()
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server error");
    });
    addr
}

/// A running storefront wired to a [`FakeCatalog`].
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start the fake catalog and the storefront, returning a fresh
    /// cookie-aware client (one browser session).
    pub async fn new(catalog: FakeCatalog) -> Self {
        let catalog_addr = serve(catalog.router()).await;

        let config = StorefrontConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            catalog: CatalogConfig::new(&format!("http://{catalog_addr}/api/"))
                .expect("Fake catalog URL is valid"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let storefront_addr = serve(app(AppState::new(config))).await;

        Self {
            client: new_client(),
            base_url: format!("http://{storefront_addr}"),
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET` a path, returning status and body.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        read(response).await
    }

    /// `GET` a path in the background, sharing this context's session.
    pub fn spawn_get(&self, path: &str) -> JoinHandle<(StatusCode, String)> {
        let request = self.client.get(self.url(path));
        tokio::spawn(async move { read(request.send().await.expect("GET request failed")).await })
    }

    /// `POST` a form to a path, returning status and body.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed");
        read(response).await
    }
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

async fn read(response: reqwest::Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.text().await.expect("Failed to read response body");
    (status, body)
}

/// Text of the cart total element in a rendered cart panel.
#[must_use]
pub fn cart_total(html: &str) -> Option<&str> {
    let start = html.find(r#"id="cart-total">"#)? + r#"id="cart-total">"#.len();
    let len = html.get(start..)?.find('<')?;
    html.get(start..start + len)
}

/// Number of product cards in a rendered grid.
#[must_use]
pub fn card_count(html: &str) -> usize {
    html.matches("<article").count()
}
