//! Route definitions for the Expenso API

mod expense;
mod resources;

pub use expense::expense_routes;
pub use resources::resource_routes;

use axum::{extract::State, routing::get, Json, Router};

use crate::db;
use crate::middleware;
use crate::state::AppState;

/// Assemble the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(expense_routes())
        .merge(resource_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}

async fn root() -> &'static str {
    "Expenso API Server"
}

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    database: String,
    version: &'static str,
}

/// GET /health - liveness and database connectivity
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db::check_health(&state.db_pool).await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let status = if database == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status,
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}
