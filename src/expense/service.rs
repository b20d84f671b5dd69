//! Expense operation layer
//!
//! The five account-scoped operations. Each call validates its input, then
//! performs exactly one store operation bound to the resolved account.
//! Ownership comes from the authenticated identity alone; caller-supplied
//! fields never influence which records an operation can touch.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use super::model::{
    AddExpenseRequest, CategoryTotal, DateRangeQuery, EditExpenseRequest, ExpenseAck,
    ExpenseChanges, ExpenseResponse, NewExpense, SummarizeQuery,
};
use super::store::ExpenseStore;

/// Domain errors for expense operations.
///
/// Everything except `Database` is a recoverable domain failure that is
/// returned to the caller as a structured result. Zero matched rows on a
/// write is reported as `NotFoundOrUnauthorized` so a non-owner cannot learn
/// whether a record exists.
#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Invalid expense_id format")]
    InvalidIdFormat,

    #[error("No fields provided to update")]
    NoFieldsToUpdate,

    #[error("Expense not found or not authorized")]
    NotFoundOrUnauthorized,

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid amount: must be a non-negative number")]
    InvalidAmount,

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for ExpenseError {
    fn from(e: sqlx::Error) -> Self {
        ExpenseError::Database(e.to_string())
    }
}

/// Expense operation service.
#[derive(Clone)]
pub struct ExpenseService {
    store: ExpenseStore,
}

impl ExpenseService {
    /// Create a new ExpenseService
    pub fn new(store: ExpenseStore) -> Self {
        Self { store }
    }

    /// Record a new expense owned by `owner`.
    pub async fn add_expense(
        &self,
        owner: Uuid,
        req: AddExpenseRequest,
    ) -> Result<ExpenseAck, ExpenseError> {
        if !req.amount.is_finite() {
            return Err(ExpenseError::InvalidAmount);
        }
        req.validate().map_err(validation_error)?;
        let date = parse_date(&req.date)?;

        let record = self
            .store
            .insert(
                owner,
                NewExpense {
                    date,
                    amount: req.amount,
                    category: req.category,
                    subcategory: req.subcategory,
                    note: req.note,
                },
            )
            .await?;

        Ok(ExpenseAck {
            status: "ok",
            message: "Item added successfully",
            expense_id: Some(record.id),
        })
    }

    /// Expenses owned by `owner` within the inclusive date range, newest
    /// first.
    pub async fn list_expenses(
        &self,
        owner: Uuid,
        query: DateRangeQuery,
    ) -> Result<Vec<ExpenseResponse>, ExpenseError> {
        let start = parse_date(&query.start_date)?;
        let end = parse_date(&query.end_date)?;

        let records = self
            .store
            .find_by_owner_and_date_range(owner, start, end)
            .await?;

        Ok(records.into_iter().map(ExpenseResponse::from).collect())
    }

    /// Per-category totals for `owner` within the inclusive date range,
    /// ascending by category. Individual record identifiers are never
    /// included.
    pub async fn summarize_expense(
        &self,
        owner: Uuid,
        query: SummarizeQuery,
    ) -> Result<Vec<CategoryTotal>, ExpenseError> {
        let start = parse_date(&query.start_date)?;
        let end = parse_date(&query.end_date)?;

        // An empty category string means "no narrowing".
        let category = query.category.as_deref().filter(|c| !c.is_empty());

        self.store
            .aggregate_by_category(owner, start, end, category)
            .await
            .map_err(Into::into)
    }

    /// Apply a set-only partial update to an owned expense.
    ///
    /// The id is parsed before the store's write path is contacted. A record
    /// that does not exist and a record owned by someone else produce the
    /// same error.
    pub async fn edit_expense(
        &self,
        owner: Uuid,
        expense_id: &str,
        req: EditExpenseRequest,
    ) -> Result<ExpenseAck, ExpenseError> {
        let id = parse_expense_id(expense_id)?;

        if req.is_empty() {
            return Err(ExpenseError::NoFieldsToUpdate);
        }
        if let Some(amount) = req.amount {
            if !amount.is_finite() {
                return Err(ExpenseError::InvalidAmount);
            }
        }
        req.validate().map_err(validation_error)?;

        let changes = ExpenseChanges {
            date: req.date.as_deref().map(parse_date).transpose()?,
            amount: req.amount,
            category: req.category,
            subcategory: req.subcategory,
            note: req.note,
        };

        let matched = self.store.update_fields(id, owner, changes).await?;
        if matched == 0 {
            return Err(ExpenseError::NotFoundOrUnauthorized);
        }

        Ok(ExpenseAck {
            status: "updated",
            message: "Item updated successfully",
            expense_id: None,
        })
    }

    /// Delete an owned expense.
    pub async fn delete_expense(
        &self,
        owner: Uuid,
        expense_id: &str,
    ) -> Result<ExpenseAck, ExpenseError> {
        let id = parse_expense_id(expense_id)?;

        let deleted = self.store.delete(id, owner).await?;
        if deleted == 0 {
            return Err(ExpenseError::NotFoundOrUnauthorized);
        }

        Ok(ExpenseAck {
            status: "success",
            message: "Item deleted successfully",
            expense_id: None,
        })
    }
}

/// Parse a client-supplied expense id into the store's identifier shape.
fn parse_expense_id(raw: &str) -> Result<Uuid, ExpenseError> {
    Uuid::parse_str(raw).map_err(|_| ExpenseError::InvalidIdFormat)
}

/// Dates are zero-padded ISO `YYYY-MM-DD`.
fn parse_date(raw: &str) -> Result<NaiveDate, ExpenseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ExpenseError::InvalidDate(raw.to_string()))
}

/// Map field validation failures onto the domain error taxonomy.
fn validation_error(errors: validator::ValidationErrors) -> ExpenseError {
    if errors.field_errors().contains_key("amount") {
        ExpenseError::InvalidAmount
    } else {
        ExpenseError::EmptyCategory
    }
}
