//! Database-backed tests for the account-scoped expense operations.
//!
//! These run against a real PostgreSQL instance and are ignored by default:
//!
//! ```sh
//! TEST_DATABASE_URL=postgresql://localhost/expenso_test cargo test -- --ignored
//! ```

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use expenso_server::auth::{hash_api_key, AuthError, AuthService};
use expenso_server::expense::{
    AddExpenseRequest, DateRangeQuery, EditExpenseRequest, ExpenseError, ExpenseService,
    ExpenseStore, SummarizeQuery,
};

/// Helper to create a test database pool
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/expenso_test".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Insert an active account with a unique API key; returns (id, token).
async fn create_account(pool: &PgPool) -> (Uuid, String) {
    let id = Uuid::new_v4();
    let token = format!("test-key-{}", id);

    sqlx::query("INSERT INTO accounts (id, api_key_hash, is_active) VALUES ($1, $2, TRUE)")
        .bind(id)
        .bind(hash_api_key(&token))
        .execute(pool)
        .await
        .expect("Failed to insert account");

    (id, token)
}

fn expense_service(pool: &PgPool) -> ExpenseService {
    ExpenseService::new(ExpenseStore::new(pool.clone()))
}

fn add_request(date: &str, amount: f64, category: &str) -> AddExpenseRequest {
    AddExpenseRequest {
        date: date.to_string(),
        amount,
        category: category.to_string(),
        subcategory: String::new(),
        note: String::new(),
    }
}

fn range(start: &str, end: &str) -> DateRangeQuery {
    DateRangeQuery {
        start_date: start.to_string(),
        end_date: end.to_string(),
    }
}

fn summary_range(start: &str, end: &str, category: Option<&str>) -> SummarizeQuery {
    SummarizeQuery {
        start_date: start.to_string(),
        end_date: end.to_string(),
        category: category.map(str::to_string),
    }
}

#[tokio::test]
#[ignore] // Requires database setup
async fn resolve_account_accepts_active_rejects_inactive_and_unknown() {
    let pool = setup_test_db().await;
    let auth = AuthService::new(pool.clone());

    let (active_id, active_token) = create_account(&pool).await;

    let inactive_id = Uuid::new_v4();
    let inactive_token = format!("inactive-key-{}", inactive_id);
    sqlx::query("INSERT INTO accounts (id, api_key_hash, is_active) VALUES ($1, $2, FALSE)")
        .bind(inactive_id)
        .bind(hash_api_key(&inactive_token))
        .execute(&pool)
        .await
        .expect("Failed to insert inactive account");

    assert_eq!(auth.resolve_account(&active_token).await.unwrap(), active_id);

    assert!(matches!(
        auth.resolve_account(&inactive_token).await,
        Err(AuthError::InvalidCredential)
    ));
    assert!(matches!(
        auth.resolve_account("no-such-key").await,
        Err(AuthError::InvalidCredential)
    ));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn cross_owner_records_are_invisible() {
    let pool = setup_test_db().await;
    let service = expense_service(&pool);
    let (owner_a, _) = create_account(&pool).await;
    let (owner_b, _) = create_account(&pool).await;

    service
        .add_expense(owner_a, add_request("2025-06-02", 10.0, "Food"))
        .await
        .unwrap();
    service
        .add_expense(owner_a, add_request("2025-06-03", 5.5, "Travel"))
        .await
        .unwrap();
    service
        .add_expense(owner_b, add_request("2025-06-02", 99.0, "Shopping"))
        .await
        .unwrap();

    let a_list = service
        .list_expenses(owner_a, range("2025-01-01", "2025-12-31"))
        .await
        .unwrap();
    assert_eq!(a_list.len(), 2);
    assert!(a_list.iter().all(|e| e.category != "Shopping"));

    let b_list = service
        .list_expenses(owner_b, range("2025-01-01", "2025-12-31"))
        .await
        .unwrap();
    assert_eq!(b_list.len(), 1);
    assert_eq!(b_list[0].category, "Shopping");

    let b_summary = service
        .summarize_expense(owner_b, summary_range("2025-01-01", "2025-12-31", None))
        .await
        .unwrap();
    assert_eq!(b_summary.len(), 1);
    assert_eq!(b_summary[0].category, "Shopping");
}

#[tokio::test]
#[ignore] // Requires database setup
async fn list_range_is_inclusive_and_newest_first() {
    let pool = setup_test_db().await;
    let service = expense_service(&pool);
    let (owner, _) = create_account(&pool).await;

    for date in ["2025-05-31", "2025-06-01", "2025-06-15", "2025-06-30", "2025-07-01"] {
        service
            .add_expense(owner, add_request(date, 1.0, "Food"))
            .await
            .unwrap();
    }

    let list = service
        .list_expenses(owner, range("2025-06-01", "2025-06-30"))
        .await
        .unwrap();

    let dates: Vec<NaiveDate> = list.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        ]
    );
}

#[tokio::test]
#[ignore] // Requires database setup
async fn delete_acknowledges_once_then_reports_ambiguous_absence() {
    let pool = setup_test_db().await;
    let service = expense_service(&pool);
    let (owner, _) = create_account(&pool).await;

    let ack = service
        .add_expense(owner, add_request("2025-06-10", 12.0, "Food"))
        .await
        .unwrap();
    let id = ack.expense_id.expect("new id echoed").to_string();

    let first = service.delete_expense(owner, &id).await.unwrap();
    assert_eq!(first.status, "success");

    let second = service.delete_expense(owner, &id).await.unwrap_err();
    assert!(matches!(second, ExpenseError::NotFoundOrUnauthorized));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn edit_with_only_note_touches_only_the_note() {
    let pool = setup_test_db().await;
    let service = expense_service(&pool);
    let (owner, _) = create_account(&pool).await;

    let ack = service
        .add_expense(
            owner,
            AddExpenseRequest {
                date: "2025-06-10".to_string(),
                amount: 42.0,
                category: "Travel".to_string(),
                subcategory: "Flights".to_string(),
                note: "outbound".to_string(),
            },
        )
        .await
        .unwrap();
    let id = ack.expense_id.unwrap();

    service
        .edit_expense(
            owner,
            &id.to_string(),
            EditExpenseRequest {
                note: Some("rebooked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let list = service
        .list_expenses(owner, range("2025-06-01", "2025-06-30"))
        .await
        .unwrap();
    let record = list.iter().find(|e| e.expense_id == id).expect("record");

    assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
    assert_eq!(record.amount, 42.0);
    assert_eq!(record.category, "Travel");
    assert_eq!(record.subcategory, "Flights");
    assert_eq!(record.note, "rebooked");
}

#[tokio::test]
#[ignore] // Requires database setup
async fn edit_of_foreign_record_is_denied_and_writes_nothing() {
    let pool = setup_test_db().await;
    let service = expense_service(&pool);
    let (owner, _) = create_account(&pool).await;
    let (intruder, _) = create_account(&pool).await;

    let ack = service
        .add_expense(owner, add_request("2025-06-10", 42.0, "Travel"))
        .await
        .unwrap();
    let id = ack.expense_id.unwrap();

    let err = service
        .edit_expense(
            intruder,
            &id.to_string(),
            EditExpenseRequest {
                amount: Some(0.0),
                note: Some("hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ExpenseError::NotFoundOrUnauthorized));

    let list = service
        .list_expenses(owner, range("2025-06-01", "2025-06-30"))
        .await
        .unwrap();
    let record = list.iter().find(|e| e.expense_id == id).expect("record");
    assert_eq!(record.amount, 42.0);
    assert_eq!(record.note, "");
}

#[tokio::test]
#[ignore] // Requires database setup
async fn summarize_groups_totals_ascending_by_category() {
    let pool = setup_test_db().await;
    let service = expense_service(&pool);
    let (owner, _) = create_account(&pool).await;

    service
        .add_expense(owner, add_request("2025-06-02", 10.0, "Food"))
        .await
        .unwrap();
    service
        .add_expense(owner, add_request("2025-06-05", 5.0, "Food"))
        .await
        .unwrap();
    service
        .add_expense(owner, add_request("2025-06-09", 20.0, "Travel"))
        .await
        .unwrap();

    let summary = service
        .summarize_expense(owner, summary_range("2025-06-01", "2025-06-30", None))
        .await
        .unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].category, "Food");
    assert_eq!(summary[0].total_amount, 15.0);
    assert_eq!(summary[1].category, "Travel");
    assert_eq!(summary[1].total_amount, 20.0);

    // Category narrows the predicate before grouping.
    let travel_only = service
        .summarize_expense(
            owner,
            summary_range("2025-06-01", "2025-06-30", Some("Travel")),
        )
        .await
        .unwrap();
    assert_eq!(travel_only.len(), 1);
    assert_eq!(travel_only[0].category, "Travel");

    // An empty category string means "no narrowing".
    let unfiltered = service
        .summarize_expense(owner, summary_range("2025-06-01", "2025-06-30", Some("")))
        .await
        .unwrap();
    assert_eq!(unfiltered.len(), 2);
}
