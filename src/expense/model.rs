//! Expense record model and operation DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Expense record as persisted.
///
/// `id` is assigned by the store on creation and immutable afterwards;
/// `owner_id` is set once from the resolved identity and never
/// client-editable.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-category aggregation row.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: f64,
}

/// Validated input for an insert.
#[derive(Debug)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

/// Validated field set for a partial update. Absent fields stay untouched.
#[derive(Debug, Default)]
pub struct ExpenseChanges {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Request to record a new expense.
#[derive(Debug, Deserialize, Validate)]
pub struct AddExpenseRequest {
    pub date: String,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub note: String,
}

/// Inclusive date range for list_expenses. Both bounds are required.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: String,
    pub end_date: String,
}

/// Query for summarize_expense: range plus optional category narrowing.
#[derive(Debug, Deserialize)]
pub struct SummarizeQuery {
    pub start_date: String,
    pub end_date: String,
    pub category: Option<String>,
}

/// Partial update request; only present fields are applied.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditExpenseRequest {
    pub date: Option<String>,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

impl EditExpenseRequest {
    /// True when the caller supplied no field at all.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.note.is_none()
    }
}

/// Expense projection returned by list_expenses.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub expense_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

impl From<ExpenseRecord> for ExpenseResponse {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            expense_id: record.id,
            date: record.date,
            amount: record.amount,
            category: record.category,
            subcategory: record.subcategory,
            note: record.note,
        }
    }
}

/// Success acknowledgment for write operations.
#[derive(Debug, Serialize)]
pub struct ExpenseAck {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<Uuid>,
}
