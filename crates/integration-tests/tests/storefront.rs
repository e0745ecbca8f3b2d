//! End-to-end tests for the storefront against a fake catalog API.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use reqwest::StatusCode;

use green_earth_core::Price;
use green_earth_integration_tests::{
    FakeCatalog, TestContext, card_count, cart_total, category, plant,
};

fn price(whole: i64) -> String {
    Price::from_whole(whole).to_string()
}

// ============================================================================
// Page & Catalog
// ============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new(FakeCatalog::default()).await;
    let (status, body) = ctx.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_home_caps_grid_at_six_cards() {
    let ctx = TestContext::new(FakeCatalog::with_plants(9)).await;
    let (status, body) = ctx.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(card_count(&body), 6);
    assert!(body.contains("Plant 6"));
    assert!(!body.contains("Plant 7"));
    assert!(body.contains("All Trees"));
    assert!(body.contains("Fruit Tree"));
}

#[tokio::test]
async fn test_home_sets_security_headers_and_request_id() {
    let ctx = TestContext::new(FakeCatalog::with_plants(1)).await;
    let response = ctx.client.get(ctx.url("/")).send().await.unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get("content-security-policy").is_some());
    assert!(headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn test_category_filter() {
    let mut catalog = FakeCatalog::with_plants(2);
    catalog.categories.push(category(2, "Shade Tree"));
    catalog.plants.push(plant(3, "Banyan Tree", 900, "Shade Tree"));
    let ctx = TestContext::new(catalog).await;

    let (status, body) = ctx.get("/plants?category=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card_count(&body), 1);
    assert!(body.contains("Banyan Tree"));

    let (_, body) = ctx.get("/plants?category=42").await;
    assert!(body.contains("No plants found."));

    let (_, body) = ctx.get("/plants").await;
    assert_eq!(card_count(&body), 3);
}

#[tokio::test]
async fn test_zero_categories_renders_only_all_entry() {
    let ctx = TestContext::new(FakeCatalog::default()).await;
    let (status, body) = ctx.get("/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("data-id=").count(), 1);
    assert!(body.contains("All Trees"));
}

#[tokio::test]
async fn test_catalog_failure_degrades_to_placeholders() {
    let ctx = TestContext::new(FakeCatalog::broken()).await;

    let (status, body) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to load products."));
    assert!(!body.contains("data-id="));

    let (status, body) = ctx.get("/plants").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to load products."));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let ctx = TestContext::new(FakeCatalog::default()).await;
    let (status, _) = ctx.get("/checkout").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_same_name_adds_merge_at_first_price() {
    let ctx = TestContext::new(FakeCatalog::default()).await;
    ctx.get("/").await;

    ctx.post_form("/cart/add", &[("name", "Mango"), ("price", "100")])
        .await;
    let (status, body) = ctx
        .post_form("/cart/add", &[("name", "Mango"), ("price", "150")])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches(r#"name="name" value="Mango""#).count(), 1);
    assert!(body.contains("Mango x2"));
    assert_eq!(cart_total(&body), Some(price(200).as_str()));
}

#[tokio::test]
async fn test_remove_drops_whole_line() {
    let ctx = TestContext::new(FakeCatalog::default()).await;
    ctx.get("/").await;

    ctx.post_form("/cart/add", &[("name", "Mango"), ("price", "100")])
        .await;
    ctx.post_form("/cart/add", &[("name", "Neem"), ("price", "50")])
        .await;
    let (_, body) = ctx.post_form("/cart/remove", &[("name", "Mango")]).await;

    assert!(!body.contains("Mango"));
    assert!(body.contains("Neem"));
    assert_eq!(cart_total(&body), Some(price(50).as_str()));

    let (_, unchanged) = ctx.post_form("/cart/remove", &[("name", "Banyan")]).await;
    assert_eq!(unchanged, body);
}

#[tokio::test]
async fn test_cart_add_triggers_refresh_event() {
    let ctx = TestContext::new(FakeCatalog::default()).await;
    ctx.get("/").await;

    let response = ctx
        .client
        .post(ctx.url("/cart/add"))
        .form(&[("name", "Mango"), ("price", "100")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers().get("hx-trigger").unwrap(), "cart-updated");
}

#[tokio::test]
async fn test_page_load_resets_cart() {
    let ctx = TestContext::new(FakeCatalog::default()).await;
    ctx.get("/").await;
    ctx.post_form("/cart/add", &[("name", "Mango"), ("price", "100")])
        .await;

    let (_, home) = ctx.get("/").await;
    assert!(home.contains("Your cart is empty."));

    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart_total(&cart), Some(price(0).as_str()));
}

// ============================================================================
// Detail Overlay
// ============================================================================

#[tokio::test]
async fn test_detail_overlay_open_and_close() {
    let ctx = TestContext::new(FakeCatalog::with_plants(3)).await;
    ctx.get("/").await;

    let (status, body) = ctx.get("/plants/2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Plant 2"));
    assert!(body.contains("Category: Fruit Tree"));
    assert!(body.contains(r#"hx-post="/overlay/close""#));

    // Opening another replaces the first
    let (_, body) = ctx.get("/plants/3").await;
    assert!(body.contains("Plant 3"));
    assert!(!body.contains("Plant 2"));

    let (status, body) = ctx.post_form("/overlay/close", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    // Closing twice is harmless
    let (status, _) = ctx.post_form("/overlay/close", &[]).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_detail_failure_closes_overlay() {
    let ctx = TestContext::new(FakeCatalog::broken()).await;
    ctx.get("/").await;

    let (status, body) = ctx.get("/plants/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

// ============================================================================
// Request Generations
// ============================================================================

#[tokio::test]
async fn test_slow_stale_grid_response_is_discarded() {
    let mut catalog = FakeCatalog::with_plants(2);
    catalog.category_delay = Duration::from_millis(400);
    let ctx = TestContext::new(catalog).await;
    ctx.get("/").await;

    let slow = ctx.spawn_get("/plants?category=1");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, body) = ctx.get("/plants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card_count(&body), 2);

    assert_eq!(slow.await.unwrap().0, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_newer_detail_supersedes_slow_one() {
    let mut catalog = FakeCatalog::with_plants(3);
    catalog.detail_delay = Duration::from_millis(300);
    let ctx = TestContext::new(catalog).await;
    ctx.get("/").await;

    let slow = ctx.spawn_get("/plants/2");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, body) = ctx.get("/plants/3").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Plant 3"));

    let (status, _) = slow.await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_close_during_slow_detail_keeps_overlay_closed() {
    let mut catalog = FakeCatalog::with_plants(2);
    catalog.detail_delay = Duration::from_millis(300);
    let ctx = TestContext::new(catalog).await;
    ctx.get("/").await;

    let slow = ctx.spawn_get("/plants/1");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, _) = ctx.post_form("/overlay/close", &[]).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = slow.await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_cart_add_during_slow_detail_is_kept() {
    let mut catalog = FakeCatalog::with_plants(1);
    catalog.detail_delay = Duration::from_millis(400);
    let ctx = TestContext::new(catalog).await;
    ctx.get("/").await;

    let slow = ctx.spawn_get("/plants/1");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, _) = ctx
        .post_form("/cart/add", &[("name", "Mango"), ("price", "100")])
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = slow.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Plant 1"));

    let (_, cart) = ctx.get("/cart").await;
    assert!(cart.contains("Mango x1"));
    assert_eq!(cart_total(&cart), Some(price(100).as_str()));
}

#[tokio::test]
async fn test_concurrent_cart_adds_are_all_kept() {
    let ctx = TestContext::new(FakeCatalog::default()).await;
    ctx.get("/").await;

    let adds: Vec<_> = (0..10)
        .map(|_| {
            let client = ctx.client.clone();
            let url = ctx.url("/cart/add");
            tokio::spawn(async move {
                client
                    .post(url)
                    .form(&[("name", "Mango"), ("price", "100")])
                    .send()
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();
    for add in adds {
        assert_eq!(add.await.unwrap(), StatusCode::OK);
    }

    let (_, cart) = ctx.get("/cart").await;
    assert!(cart.contains("Mango x10"));
    assert_eq!(cart_total(&cart), Some(price(1000).as_str()));
}

#[tokio::test]
async fn test_separate_sessions_do_not_supersede_each_other() {
    let mut catalog = FakeCatalog::with_plants(2);
    catalog.category_delay = Duration::from_millis(300);
    let ctx = TestContext::new(catalog).await;
    ctx.get("/").await;

    let other = TestContext {
        client: reqwest::Client::builder().cookie_store(true).build().unwrap(),
        base_url: ctx.base_url.clone(),
    };
    other.get("/").await;

    let slow = ctx.spawn_get("/plants?category=1");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, _) = other.get("/plants").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(slow.await.unwrap().0, StatusCode::OK);
}
