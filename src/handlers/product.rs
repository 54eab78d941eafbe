//! Product CRUD handlers: thin orchestration between router and store.
//!
//! Input rules have already run as route middleware by the time a handler
//! executes, so extractors here can assume well-formed payloads.

use crate::error::AppError;
use crate::model::{NewProduct, ProductChanges};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "All products, newest id first", body = Vec<crate::model::Product>))
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = state.store.find_all().await?;
    Ok(ok(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = crate::model::Product),
        (status = 404, description = "No product with that id"),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ok(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Created product", body = crate::model::Product),
        (status = 400, description = "Validation failure"),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(new): Json<NewProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.store.insert(new).await?;
    Ok(created(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductChanges,
    responses(
        (status = 200, description = "Updated product", body = crate::model::Product),
        (status = 404, description = "No product with that id"),
        (status = 400, description = "Validation failure"),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<ProductChanges>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .store
        .update(id, changes)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ok(product))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with availability negated", body = crate::model::Product),
        (status = 404, description = "No product with that id"),
    )
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    // Unconditional negation of the stored value; any request body is
    // ignored. No transaction spans the fetch and the write, so two
    // concurrent toggles are last-write-wins.
    let current = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;
    let changes = ProductChanges {
        name: current.name,
        price: current.price,
        availability: !current.availability,
    };
    let product = state
        .store
        .update(id, changes)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ok(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deletion confirmation"),
        (status = 404, description = "No product with that id"),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    Ok(ok("deleted"))
}
