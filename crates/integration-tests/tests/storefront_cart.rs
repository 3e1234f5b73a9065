//! Integration tests for the storefront cart API.
//!
//! These tests require a running storefront (see the crate docs).

use reqwest::StatusCode;
use serde_json::json;

use vibe_commerce_integration_tests::Shopper;

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let shopper = Shopper::new();
    let (status, _) = shopper.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_new_session_has_empty_cart() {
    let shopper = Shopper::new();
    let (status, cart) = shopper.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"].as_f64(), Some(0.0));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_add_and_remove_items() {
    let shopper = Shopper::new();
    shopper.get("/products").await;

    for _ in 0..2 {
        let (status, body) = shopper
            .post("/cart", &json!({ "productId": "5", "qty": 2 }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    let (_, cart) = shopper.get("/cart").await;
    let items = cart["items"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 2, "identical adds must not merge");
    assert_ne!(items[0]["id"], items[1]["id"]);
    assert_eq!(cart["total"].as_f64(), Some(319.96));

    let item_id = items[0]["id"].as_str().unwrap_or_default();
    let (status, _) = shopper.delete(&format!("/cart/{item_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = shopper.delete("/cart/not-a-real-item").await;
    assert_eq!(status, StatusCode::OK);

    let (_, count) = shopper.get("/cart/count").await;
    assert_eq!(count["count"], 1);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_invalid_add_is_rejected() {
    let shopper = Shopper::new();

    let (status, body) = shopper.post("/cart", &json!({ "productId": "1", "qty": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, count) = shopper.get("/cart/count").await;
    assert_eq!(count["count"], 0);
}
