use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use comanda_core::{backend::DynStoreBackend, document::Document, store::DocumentStore};
use comanda_memory::InMemoryStore;
use comanda_server::{SharedStore, router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app_with(backend: InMemoryStore) -> Router {
    let backend: Box<dyn DynStoreBackend> = Box::new(backend);
    let store: SharedStore = Arc::new(DocumentStore::new(backend));
    router(store)
}

fn seeded_backend() -> InMemoryStore {
    let document = Document::from_value(json!({
        "users": [{ "id": 1, "name": "Ana" }],
        "menu": [{ "id": 1, "name": "Taco", "price": 3 }, { "id": 3, "name": "Tamal", "price": 2 }],
        "orders": [],
        "activeOrders": { "a": 1, "b": 2 }
    }))
    .unwrap();
    InMemoryStore::with_document(&document).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_check() {
    let app = app_with(InMemoryStore::new());

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn list_and_get() {
    let app = app_with(seeded_backend());

    let (status, body) = send(&app, Method::GET, "/api/menu", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::GET, "/api/menu/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tamal");

    let (status, body) = send(&app, Method::GET, "/api/activeOrders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "a": 1, "b": 2 }));
}

#[tokio::test]
async fn unknown_resource_is_404_for_every_verb() {
    let app = app_with(seeded_backend());

    for (method, uri, body) in [
        (Method::GET, "/api/tables", None),
        (Method::GET, "/api/tables/1", None),
        (Method::POST, "/api/tables", Some(json!({}))),
        (Method::PUT, "/api/tables/1", Some(json!({}))),
        (Method::DELETE, "/api/tables/1", None),
        (Method::PUT, "/api/tables", Some(json!({}))),
        (Method::POST, "/api/tables", Some(json!([1, 2]))),
        (Method::PUT, "/api/tables/1", Some(json!([1, 2]))),
        (Method::PUT, "/api/tables", Some(json!([1, 2]))),
    ] {
        let (status, body) = send(&app, method.clone(), uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert!(body["error"].as_str().unwrap().contains("tables"));
    }
}

#[tokio::test]
async fn unknown_item_is_404() {
    let app = app_with(seeded_backend());

    let (status, body) = send(&app, Method::GET, "/api/menu/2", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_update_delete_roundtrip() {
    let app = app_with(seeded_backend());

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/menu",
        Some(json!({ "name": "Pozole", "price": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({ "name": "Pozole", "price": 5, "id": 4 }));

    let (status, updated) = send(&app, Method::PUT, "/api/menu/4", Some(json!({ "price": 6 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "name": "Pozole", "price": 6, "id": 4 }));

    let (status, ack) = send(&app, Method::DELETE, "/api/menu/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({ "success": true, "message": "Item deleted" }));

    let (status, _) = send(&app, Method::GET, "/api/menu/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, ack) = send(&app, Method::DELETE, "/api/menu/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["success"], true);
}

#[tokio::test]
async fn delete_on_singleton_is_404() {
    let app = app_with(seeded_backend());

    let (status, body) = send(&app, Method::DELETE, "/api/activeOrders/1", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not a collection"));
}

#[tokio::test]
async fn put_active_orders_replaces_wholesale() {
    let app = app_with(seeded_backend());

    let (status, body) = send(&app, Method::PUT, "/api/activeOrders", Some(json!({ "b": 3 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "b": 3 }));

    let (_, listed) = send(&app, Method::GET, "/api/activeOrders", None).await;
    assert_eq!(listed, json!({ "b": 3 }));
}

#[tokio::test]
async fn put_active_orders_with_id_merges() {
    let app = app_with(seeded_backend());

    let (status, body) = send(&app, Method::PUT, "/api/activeOrders/0", Some(json!({ "b": 3 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "a": 1, "b": 3 }));
}

#[tokio::test]
async fn put_on_collection_without_id_is_404() {
    let app = app_with(seeded_backend());

    let (status, _) = send(&app, Method::PUT, "/api/menu", Some(json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_object_payload_is_400() {
    let app = app_with(seeded_backend());

    let (status, body) = send(&app, Method::POST, "/api/menu", Some(json!([1, 2, 3]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = app_with(seeded_backend());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/menu")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nope"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn save_failure_is_500() {
    let backend = seeded_backend();
    backend.fail_saves(true);
    let app = app_with(backend);

    let (status, body) = send(&app, Method::POST, "/api/orders", Some(json!({ "table": 1 }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app_with(seeded_backend());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/users")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
