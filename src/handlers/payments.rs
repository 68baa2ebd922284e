//! Loan payment HTTP handlers.
//!
//! POST goes through the loan service so the payment and the loan's
//! balance decrement commit together.

use crate::{
    db::DbPool,
    error::AppError,
    models::payment::{CreatePaymentRequest, Payment, UpdatePaymentRequest},
    services::loan_service,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all payments, newest first.
pub async fn list_payments(State(pool): State<DbPool>) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = sqlx::query_as::<_, Payment>(
        r#"
        SELECT pay_id, loan_id, amount_paid, mode, date
        FROM payments
        ORDER BY date DESC, pay_id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(payments))
}

/// Record a loan payment.
///
/// # Endpoint
///
/// `POST /payments`
///
/// # Request Body
///
/// ```json
/// {
///   "pay_id": "PAY010",
///   "loan_id": "L010",
///   "amount_paid": 500
/// }
/// ```
///
/// Inserts the payment AND decrements the referenced loan's `balance` in
/// one database transaction (see [`loan_service::record_loan_payment`]).
pub async fn create_payment(
    State(pool): State<DbPool>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    let payment = loan_service::record_loan_payment(&pool, request).await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// Get a specific payment by ID.
pub async fn get_payment(
    State(pool): State<DbPool>,
    Path(pay_id): Path<String>,
) -> Result<Json<Payment>, AppError> {
    let payment = sqlx::query_as::<_, Payment>(
        r#"
        SELECT pay_id, loan_id, amount_paid, mode, date
        FROM payments
        WHERE pay_id = ?1
        "#,
    )
    .bind(&pay_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("payment"))?;

    Ok(Json(payment))
}

/// Partially update a payment's bookkeeping fields.
///
/// Only `mode` and `date` can change; the amount is fixed once recorded
/// because it has already been folded into the loan's balance.
pub async fn update_payment(
    State(pool): State<DbPool>,
    Path(pay_id): Path<String>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<Payment>, AppError> {
    let payment = sqlx::query_as::<_, Payment>(
        r#"
        UPDATE payments
        SET mode = COALESCE(?2, mode),
            date = COALESCE(?3, date)
        WHERE pay_id = ?1
        RETURNING pay_id, loan_id, amount_paid, mode, date
        "#,
    )
    .bind(&pay_id)
    .bind(&request.mode)
    .bind(request.date)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("payment"))?;

    Ok(Json(payment))
}

/// Delete a payment.
///
/// Removes the log row only; the loan's balance keeps the decrement that
/// was applied when the payment was recorded.
pub async fn delete_payment(
    State(pool): State<DbPool>,
    Path(pay_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM payments WHERE pay_id = ?1")
        .bind(&pay_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("payment"));
    }

    Ok(StatusCode::NO_CONTENT)
}
