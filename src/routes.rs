//! Route tables: product CRUD with per-route validation layers, plus
//! service routes (health, version).

use crate::handlers::product::{
    create_product, delete_product, get_product, list_products, toggle_availability,
    update_product,
};
use crate::state::AppState;
use crate::validation::{validate_create, validate_id, validate_update};
use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

/// Product routes, meant to be nested under `/api/products`. Each route
/// declares its validation middleware ahead of the handler; validation
/// failures never reach handler logic.
pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_products)
                .merge(post(create_product).route_layer(from_fn(validate_create))),
        )
        .route(
            "/:id",
            get(get_product)
                .patch(toggle_availability)
                .delete(delete_product)
                .route_layer(from_fn(validate_id))
                .merge(
                    // Outermost layer runs first: id check, then body rules.
                    put(update_product)
                        .route_layer(from_fn(validate_update))
                        .route_layer(from_fn(validate_id)),
                ),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Service routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}
