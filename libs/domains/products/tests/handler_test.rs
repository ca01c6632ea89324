//! Handler tests for the Products domain
//!
//! These tests drive the HTTP surface over the in-memory repository and
//! verify request deserialization, response serialization, status codes,
//! the uniform error envelope, and hypermedia links.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let repository = InMemoryProductRepository::new();
    let service = ProductService::new(repository);
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn request_empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_product(app: &Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request_json("POST", "/", body))
        .await
        .unwrap();
    let status = response.status();
    let body = json_body(response.into_body()).await;
    (status, body)
}

#[tokio::test]
async fn test_create_product_returns_201_with_location_and_self_link() {
    let app = app();

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/",
            json!({"name": "Keyboard", "price": 49.99, "description": "Mechanical"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get("location")
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string();

    let product: ProductDto = json_body(response.into_body()).await;
    assert_eq!(product.name, "Keyboard");
    assert_eq!(product.price, Decimal::new(4999, 2));
    assert_eq!(product.description, Some("Mechanical".to_string()));

    let expected_href = format!("{}/{}", handlers::PRODUCTS_PATH, product.id);
    assert_eq!(location, expected_href);
    assert_eq!(product.links, vec![Link::self_link(expected_href)]);
}

#[tokio::test]
async fn test_create_product_validates_blank_name() {
    let app = app();

    let (status, body) = create_product(&app, json!({"name": "  ", "price": 10})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["message"], "Product name cannot be blank");
}

#[tokio::test]
async fn test_create_product_validates_nonpositive_price() {
    let app = app();

    for price in [json!(0), json!(-5.0)] {
        let (status, body) =
            create_product(&app, json!({"name": "Keyboard", "price": price})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["message"], "Price must be greater than zero");
    }
}

#[tokio::test]
async fn test_create_duplicate_name_is_a_conflict() {
    let app = app();

    let (status, _) = create_product(&app, json!({"name": "Keyboard", "price": 49.99})).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same name, different case.
    let (status, body) = create_product(&app, json!({"name": "keyboard", "price": 10})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "Product with the same name already exists");
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();

    let (status, created) =
        create_product(&app, json!({"name": "Keyboard", "price": 49.99})).await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request_empty("GET", &format!("/{}", created["id"].as_str().unwrap())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Value = json_body(response.into_body()).await;
    // Equal up to the hyperlink field, which both carry the same way here.
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let app = app();

    let response = app
        .oneshot(request_empty("GET", &format!("/{}", uuid::Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Resource Not Found");
}

#[tokio::test]
async fn test_get_with_invalid_uuid_returns_400() {
    let app = app();

    let response = app
        .oneshot(request_empty("GET", "/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_id() {
    let app = app();

    let (_, created) = create_product(&app, json!({"name": "Keyboard", "price": 49.99})).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request_json(
            "PUT",
            &format!("/{}", id),
            json!({"name": "New", "price": 9.99, "description": "d"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let updated: ProductDto = json_body(response.into_body()).await;
    assert_eq!(updated.id.to_string(), id);
    assert_eq!(updated.name, "New");
    assert_eq!(updated.price, Decimal::new(999, 2));
    assert_eq!(updated.description, Some("d".to_string()));

    // The update is visible on a subsequent read.
    let response = app
        .oneshot(request_empty("GET", &format!("/{}", id)))
        .await
        .unwrap();
    let fetched: ProductDto = json_body(response.into_body()).await;
    assert_eq!(fetched.name, "New");
    assert_eq!(fetched.price, Decimal::new(999, 2));
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let app = app();

    let response = app
        .oneshot(request_json(
            "PUT",
            &format!("/{}", uuid::Uuid::new_v4()),
            json!({"name": "New", "price": 9.99}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_negative_price() {
    let app = app();

    let (_, created) = create_product(&app, json!({"name": "Keyboard", "price": 49.99})).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(request_json(
            "PUT",
            &format!("/{}", id),
            json!({"price": -1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["message"], "Price must be positive");
}

#[tokio::test]
async fn test_delete_twice_yields_204_then_404() {
    let app = app();

    let (_, created) = create_product(&app, json!({"name": "Keyboard", "price": 49.99})).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request_empty("DELETE", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request_empty("DELETE", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_after_create_scenario() {
    let app = app();

    let (status, created) =
        create_product(&app, json!({"name": "Keyboard", "price": 49.99})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Keyboard");

    let response = app
        .clone()
        .oneshot(request_empty("GET", "/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<ProductDto> = json_body(response.into_body()).await;
    let keyboards: Vec<_> = products.iter().filter(|p| p.name == "Keyboard").collect();
    assert_eq!(keyboards.len(), 1);

    // Every listed representation carries its own self link.
    for product in &products {
        let href = format!("{}/{}", handlers::PRODUCTS_PATH, product.id);
        assert_eq!(product.links, vec![Link::self_link(href)]);
    }

    let (status, _) = create_product(&app, json!({"name": "keyboard", "price": 10})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_returns_400_envelope() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
}
