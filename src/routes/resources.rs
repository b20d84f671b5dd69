//! Static resource routes

use axum::{routing::get, Router};

use crate::handlers::resources;
use crate::state::AppState;

/// Create static resource routes
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/resources/categories", get(resources::get_categories))
        .route("/resources/operations", get(resources::get_operations))
}
