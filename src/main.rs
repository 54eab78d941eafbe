//! Server bootstrap: connect the store, mount the router, serve.

use catalog_api::{
    common_routes, docs_routes, ensure_schema, ping, product_routes, AppState, PgProductStore,
    StoreError, BODY_LIMIT,
};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;

async fn verify_store(pool: &PgPool) -> Result<(), StoreError> {
    ping(pool).await?;
    ensure_schema(pool).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("catalog_api=info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/catalog".into());
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(&database_url)?;

    // Startup tolerates an unreachable database: log and keep serving so
    // the store can come back without a restart.
    match verify_store(&pool).await {
        Ok(()) => tracing::info!("database connection verified"),
        Err(e) => tracing::error!(error = %e, "database unavailable at startup; continuing"),
    }

    let state = AppState {
        store: Arc::new(PgProductStore::new(pool)),
    };

    let app = Router::new()
        .merge(common_routes())
        .merge(docs_routes())
        .nest("/api/products", product_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
