//! Expense operation routes

use axum::{
    routing::{get, patch},
    Router,
};

use crate::handlers::expense;
use crate::state::AppState;

/// Create expense operation routes
pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expenses",
            get(expense::list_expenses).post(expense::add_expense),
        )
        .route("/expenses/summary", get(expense::summarize_expense))
        .route(
            "/expenses/:expense_id",
            patch(expense::edit_expense).delete(expense::delete_expense),
        )
}
