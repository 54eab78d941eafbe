//! Product catalog REST API: CRUD over a single `products` table with
//! declarative route validation and a generated OpenAPI document.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use docs::{docs_routes, ApiDoc};
pub use error::{AppError, StoreError};
pub use model::{NewProduct, Product, ProductChanges};
pub use routes::{common_routes, product_routes};
pub use state::AppState;
pub use store::{ensure_schema, ping, MemoryProductStore, PgProductStore, ProductStore};
pub use validation::BODY_LIMIT;
