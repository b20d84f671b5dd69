//! Expense operation HTTP handlers
//!
//! Thin shims over the expense service. Each handler authenticates through
//! the `AuthenticatedAccount` extractor before its body runs; the resolved
//! account is the only ownership input the service ever sees.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::expense::{
    AddExpenseRequest, CategoryTotal, DateRangeQuery, EditExpenseRequest, ExpenseAck,
    ExpenseError, ExpenseResponse, SummarizeQuery,
};
use crate::error::ApiError;
use crate::middleware::AuthenticatedAccount;
use crate::state::AppState;

/// POST /expenses - Record a new expense
pub async fn add_expense(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Json(req): Json<AddExpenseRequest>,
) -> Result<Json<ExpenseAck>, Response> {
    let ack = state
        .expense_service
        .add_expense(account.account_id, req)
        .await
        .map_err(expense_failure)?;

    Ok(Json(ack))
}

/// GET /expenses - List expenses within an inclusive date range
pub async fn list_expenses(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, Response> {
    let expenses = state
        .expense_service
        .list_expenses(account.account_id, query)
        .await
        .map_err(expense_failure)?;

    Ok(Json(expenses))
}

/// GET /expenses/summary - Per-category totals within a date range
pub async fn summarize_expense(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Query(query): Query<SummarizeQuery>,
) -> Result<Json<Vec<CategoryTotal>>, Response> {
    let totals = state
        .expense_service
        .summarize_expense(account.account_id, query)
        .await
        .map_err(expense_failure)?;

    Ok(Json(totals))
}

/// PATCH /expenses/:expense_id - Partially update an owned expense
pub async fn edit_expense(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Path(expense_id): Path<String>,
    Json(req): Json<EditExpenseRequest>,
) -> Result<Json<ExpenseAck>, Response> {
    let ack = state
        .expense_service
        .edit_expense(account.account_id, &expense_id, req)
        .await
        .map_err(expense_failure)?;

    Ok(Json(ack))
}

/// DELETE /expenses/:expense_id - Delete an owned expense
pub async fn delete_expense(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Path(expense_id): Path<String>,
) -> Result<Json<ExpenseAck>, Response> {
    let ack = state
        .expense_service
        .delete_expense(account.account_id, &expense_id)
        .await
        .map_err(expense_failure)?;

    Ok(Json(ack))
}

/// Shape a domain failure into the operation result contract.
///
/// Recoverable domain failures are data, not transport failures: they come
/// back to the caller as a structured `{"error": ...}` payload. Store
/// failures stay hard and are normalized by `ApiError`.
fn expense_failure(err: ExpenseError) -> Response {
    match err {
        ExpenseError::Database(msg) => ApiError::DatabaseError(msg).into_response(),
        other => (StatusCode::OK, Json(json!({ "error": other.to_string() }))).into_response(),
    }
}
