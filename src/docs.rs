//! OpenAPI document generated from handler annotations, served as JSON.

use crate::handlers::product;
use crate::model::{NewProduct, Product, ProductChanges};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        description = "REST API for managing a product catalog"
    ),
    paths(
        product::list_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::toggle_availability,
        product::delete_product,
    ),
    components(schemas(Product, NewProduct, ProductChanges))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Documentation route: GET /api/docs/openapi.json.
pub fn docs_routes() -> Router {
    Router::new().route("/api/docs/openapi.json", get(openapi_json))
}
