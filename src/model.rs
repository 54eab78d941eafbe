//! Product entity and request payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog product. The table also carries `created_at`/`updated_at`
/// bookkeeping columns; those never cross the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    /// Store-assigned, immutable after creation.
    pub id: i32,
    pub name: String,
    /// Strictly positive.
    pub price: f64,
    pub availability: bool,
}

/// Create payload. Availability always starts true.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Full-update payload: every mutable column is replaced.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}
