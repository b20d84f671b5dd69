//! Record store gateway
//!
//! Pure data access for expense records, no business rules. Every statement
//! carries the owner in its predicate; ownership is never applied as a
//! post-filter, so a partial failure can only surface as zero matched rows.

use chrono::NaiveDate;
use sqlx::types::chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::{CategoryTotal, ExpenseChanges, ExpenseRecord, NewExpense};

/// Data access for the expenses table.
#[derive(Clone)]
pub struct ExpenseStore {
    db_pool: PgPool,
}

impl ExpenseStore {
    /// Create a new ExpenseStore
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Insert a record owned by `owner` and return it with its assigned id.
    pub async fn insert(
        &self,
        owner: Uuid,
        new: NewExpense,
    ) -> Result<ExpenseRecord, sqlx::Error> {
        sqlx::query_as::<_, ExpenseRecord>(
            r#"
            INSERT INTO expenses (
                id, owner_id, date, amount, category, subcategory, note,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(new.date)
        .bind(new.amount)
        .bind(&new.category)
        .bind(&new.subcategory)
        .bind(&new.note)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await
    }

    /// Records owned by `owner` dated within `[start, end]`, newest first.
    ///
    /// Both bounds are inclusive. Id breaks ties so paging over same-day
    /// records stays deterministic.
    pub async fn find_by_owner_and_date_range(
        &self,
        owner: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExpenseRecord>, sqlx::Error> {
        sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT * FROM expenses
            WHERE owner_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(owner)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db_pool)
        .await
    }

    /// Per-category totals for `owner` within `[start, end]`, ascending by
    /// category, optionally narrowed to a single category before grouping.
    pub async fn aggregate_by_category(
        &self,
        owner: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        category: Option<&str>,
    ) -> Result<Vec<CategoryTotal>, sqlx::Error> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> = sqlx::QueryBuilder::new(
            "SELECT category, SUM(amount) AS total_amount FROM expenses WHERE owner_id = ",
        );
        query_builder.push_bind(owner);
        query_builder.push(" AND date >= ");
        query_builder.push_bind(start);
        query_builder.push(" AND date <= ");
        query_builder.push_bind(end);
        if let Some(category) = category {
            query_builder.push(" AND category = ");
            query_builder.push_bind(category);
        }
        query_builder.push(" GROUP BY category ORDER BY category ASC");

        query_builder
            .build_query_as::<CategoryTotal>()
            .fetch_all(&self.db_pool)
            .await
    }

    /// Apply a set-only partial update to the record with `id` owned by
    /// `owner`.
    ///
    /// Returns the matched-row count; zero means the record does not exist
    /// or belongs to another owner, and nothing was written.
    pub async fn update_fields(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: ExpenseChanges,
    ) -> Result<u64, sqlx::Error> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new("UPDATE expenses SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(date) = changes.date {
            query_builder.push(", date = ");
            query_builder.push_bind(date);
        }
        if let Some(amount) = changes.amount {
            query_builder.push(", amount = ");
            query_builder.push_bind(amount);
        }
        if let Some(category) = changes.category {
            query_builder.push(", category = ");
            query_builder.push_bind(category);
        }
        if let Some(subcategory) = changes.subcategory {
            query_builder.push(", subcategory = ");
            query_builder.push_bind(subcategory);
        }
        if let Some(note) = changes.note {
            query_builder.push(", note = ");
            query_builder.push_bind(note);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id);
        query_builder.push(" AND owner_id = ");
        query_builder.push_bind(owner);

        let result = query_builder.build().execute(&self.db_pool).await?;

        Ok(result.rows_affected())
    }

    /// Delete the record with `id` owned by `owner`. Returns the deleted
    /// count.
    pub async fn delete(&self, id: Uuid, owner: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected())
    }
}
