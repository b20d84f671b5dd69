//! Application state shared across handlers
//!
//! All shared handles are constructed once at startup and injected here;
//! there is no lazily-populated global state.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::AuthService;
use crate::expense::ExpenseService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: Arc<AuthService>,
    pub expense_service: Arc<ExpenseService>,
    pub categories_path: PathBuf,
    pub operations_path: PathBuf,
}

impl AppState {
    pub fn new(
        db_pool: PgPool,
        auth_service: Arc<AuthService>,
        expense_service: Arc<ExpenseService>,
        categories_path: PathBuf,
        operations_path: PathBuf,
    ) -> Self {
        Self {
            db_pool,
            auth_service,
            expense_service,
            categories_path,
            operations_path,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<ExpenseService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.expense_service.clone()
    }
}
