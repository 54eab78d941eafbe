//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Store-level failures. Wraps the driver error so handlers stay
/// backend-agnostic.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("store: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Declared field rules failed; carries every failure message in
    /// declaration order.
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Db(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
            }
            AppError::Db(e) => {
                // Detail stays server-side; clients get a generic body.
                tracing::error!(error = %e, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}
