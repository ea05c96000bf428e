//! REST routes over the resource operations.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use comanda_core::{
    backend::DynStoreBackend,
    store::{DeleteAck, DocumentStore},
};

use crate::error::ApiResult;

/// The store every handler shares; the backend is picked at start-up.
pub type SharedStore = Arc<DocumentStore<Box<dyn DynStoreBackend>>>;

/// Builds the API router.
///
/// | Method | Path | Operation |
/// |---|---|---|
/// | GET | `/api/{resource}` | list |
/// | GET | `/api/{resource}/{id}` | get |
/// | POST | `/api/{resource}` | create |
/// | PUT | `/api/{resource}/{id}` | merge update |
/// | DELETE | `/api/{resource}/{id}` | delete |
/// | PUT | `/api/{resource}` | replace a singleton (`activeOrders`) |
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/{resource}",
            get(list_resource).post(create_item).put(replace_singleton),
        )
        .route(
            "/api/{resource}/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_resource(
    State(store): State<SharedStore>,
    Path(resource): Path<String>,
) -> ApiResult<Json<Value>> {
    Ok(Json(store.list(&resource).await?))
}

async fn get_item(
    State(store): State<SharedStore>,
    Path((resource, id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    Ok(Json(store.get(&resource, &id).await?))
}

async fn create_item(
    State(store): State<SharedStore>,
    Path(resource): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    Ok(Json(store.create(&resource, payload).await?))
}

async fn update_item(
    State(store): State<SharedStore>,
    Path((resource, id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    Ok(Json(store.update(&resource, &id, payload).await?))
}

async fn delete_item(
    State(store): State<SharedStore>,
    Path((resource, id)): Path<(String, String)>,
) -> ApiResult<Json<DeleteAck>> {
    Ok(Json(store.delete(&resource, &id).await?))
}

async fn replace_singleton(
    State(store): State<SharedStore>,
    Path(resource): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    Ok(Json(store.replace_singleton(&resource, payload).await?))
}
