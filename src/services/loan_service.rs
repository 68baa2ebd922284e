//! Loan service - payment recording with its balance propagation write.
//!
//! A payment insert and the decrement of the referenced loan's `balance`
//! run inside one database transaction, mirroring the inventory side: the
//! payment is never visible without its balance adjustment, and the
//! adjustment is an in-database decrement so concurrent payments against
//! the same loan cannot lose an update.

use chrono::Utc;

use crate::{
    db::DbPool,
    error::AppError,
    models::payment::{CreatePaymentRequest, Payment},
};

/// Payment mode recorded when the caller does not name one.
const DEFAULT_PAYMENT_MODE: &str = "Cash";

/// Record a loan payment and subtract it from the loan's balance.
///
/// # Process
///
/// 1. Start database transaction
/// 2. Decrement the loan's `balance` (0 rows updated means the loan does
///    not exist - roll back)
/// 3. Insert the payment row, defaulting `mode` to `"Cash"` and `date`
///    to today
/// 4. Commit (or rollback on error)
///
/// The balance is allowed to go negative - an overpayment is recorded as
/// observed, not rejected.
///
/// # Errors
///
/// - `InvalidRequest`: `pay_id` is blank or `amount_paid` is zero/negative
/// - `NotFound`: the referenced loan does not exist
/// - `Integrity`: duplicate `pay_id`
/// - `Database`: any other database error
pub async fn record_loan_payment(
    pool: &DbPool,
    request: CreatePaymentRequest,
) -> Result<Payment, AppError> {
    if request.pay_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "pay_id must not be empty".to_string(),
        ));
    }

    if request.amount_paid <= 0.0 {
        return Err(AppError::InvalidRequest(
            "amount_paid must be positive".to_string(),
        ));
    }

    let mode = request
        .mode
        .unwrap_or_else(|| DEFAULT_PAYMENT_MODE.to_string());
    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());

    // Start db transaction
    let mut tx = pool.begin().await?;

    let updated_count =
        sqlx::query("UPDATE loans SET balance = balance - ?1 WHERE loan_id = ?2")
            .bind(request.amount_paid)
            .bind(&request.loan_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

    if updated_count == 0 {
        tx.rollback().await?;
        return Err(AppError::NotFound("loan"));
    }

    // Record the payment
    let payment = sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (pay_id, loan_id, amount_paid, mode, date)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING pay_id, loan_id, amount_paid, mode, date
        "#,
    )
    .bind(&request.pay_id)
    .bind(&request.loan_id)
    .bind(request.amount_paid)
    .bind(&mode)
    .bind(date)
    .fetch_one(&mut *tx)
    .await?;

    // Commit all changes atomically
    tx.commit().await?;

    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    async fn test_pool() -> DbPool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    async fn seed_loan(pool: &DbPool, loan_id: &str, amount: f64) {
        sqlx::query("INSERT INTO customers (cust_id, name) VALUES ('C1', 'Borrower')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO loans (loan_id, cust_id, loan_amount, balance) VALUES (?1, 'C1', ?2, ?2)",
        )
        .bind(loan_id)
        .bind(amount)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn balance_of(pool: &DbPool, loan_id: &str) -> f64 {
        sqlx::query_scalar("SELECT balance FROM loans WHERE loan_id = ?1")
            .bind(loan_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn payment(pay_id: &str, loan_id: &str, amount_paid: f64) -> CreatePaymentRequest {
        CreatePaymentRequest {
            pay_id: pay_id.to_string(),
            loan_id: loan_id.to_string(),
            amount_paid,
            mode: None,
            date: None,
        }
    }

    #[tokio::test]
    async fn payment_decrements_loan_balance() {
        let pool = test_pool().await;
        seed_loan(&pool, "L1", 8000.0).await;

        let recorded = record_loan_payment(&pool, payment("PAY1", "L1", 500.0))
            .await
            .unwrap();

        assert_eq!(recorded.mode, "Cash");
        assert!(recorded.date.is_some());
        assert_eq!(balance_of(&pool, "L1").await, 7500.0);
    }

    #[tokio::test]
    async fn balance_equals_amount_minus_payments() {
        let pool = test_pool().await;
        seed_loan(&pool, "L1", 8000.0).await;

        for (pay_id, amount) in [("PAY1", 500.0), ("PAY2", 1250.0), ("PAY3", 300.0)] {
            record_loan_payment(&pool, payment(pay_id, "L1", amount))
                .await
                .unwrap();
        }

        assert_eq!(balance_of(&pool, "L1").await, 8000.0 - 500.0 - 1250.0 - 300.0);
    }

    #[tokio::test]
    async fn payment_against_missing_loan_leaves_no_trace() {
        let pool = test_pool().await;
        seed_loan(&pool, "L1", 8000.0).await;

        let err = record_loan_payment(&pool, payment("PAY1", "NOPE", 500.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("loan")));

        let payments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(payments, 0);
        assert_eq!(balance_of(&pool, "L1").await, 8000.0);
    }

    #[tokio::test]
    async fn duplicate_payment_id_rolls_back_the_decrement() {
        let pool = test_pool().await;
        seed_loan(&pool, "L1", 8000.0).await;

        record_loan_payment(&pool, payment("PAY1", "L1", 500.0))
            .await
            .unwrap();
        let err = record_loan_payment(&pool, payment("PAY1", "L1", 500.0))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Integrity(_)));
        assert_eq!(balance_of(&pool, "L1").await, 7500.0);
    }

    #[tokio::test]
    async fn overpayment_drives_balance_negative() {
        let pool = test_pool().await;
        seed_loan(&pool, "L1", 400.0).await;

        record_loan_payment(&pool, payment("PAY1", "L1", 600.0))
            .await
            .unwrap();

        assert_eq!(balance_of(&pool, "L1").await, -200.0);
    }

    #[tokio::test]
    async fn nonpositive_amount_is_rejected() {
        let pool = test_pool().await;
        seed_loan(&pool, "L1", 8000.0).await;

        let err = record_loan_payment(&pool, payment("PAY1", "L1", 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(balance_of(&pool, "L1").await, 8000.0);
    }
}
