//! Loan management HTTP handlers.

use crate::{
    db::DbPool,
    error::AppError,
    models::loan::{CreateLoanRequest, Loan, UpdateLoanRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all loans, newest first.
pub async fn list_loans(State(pool): State<DbPool>) -> Result<Json<Vec<Loan>>, AppError> {
    let loans = sqlx::query_as::<_, Loan>(
        r#"
        SELECT loan_id, cust_id, loan_amount, interest_rate, balance, date
        FROM loans
        ORDER BY date DESC, loan_id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(loans))
}

/// Create a new loan.
///
/// # Request Body
///
/// ```json
/// {
///   "loan_id": "L010",
///   "cust_id": "C010",
///   "loan_amount": 8000,
///   "interest_rate": 2.5
/// }
/// ```
///
/// `balance` defaults to `loan_amount` when omitted - a fresh loan has no
/// payments against it yet.
pub async fn create_loan(
    State(pool): State<DbPool>,
    Json(request): Json<CreateLoanRequest>,
) -> Result<(StatusCode, Json<Loan>), AppError> {
    if request.loan_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "loan_id must not be empty".to_string(),
        ));
    }
    if request.cust_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "cust_id must not be empty".to_string(),
        ));
    }

    let balance = request.balance.unwrap_or(request.loan_amount);

    let loan = sqlx::query_as::<_, Loan>(
        r#"
        INSERT INTO loans (loan_id, cust_id, loan_amount, interest_rate, balance, date)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING loan_id, cust_id, loan_amount, interest_rate, balance, date
        "#,
    )
    .bind(&request.loan_id)
    .bind(&request.cust_id)
    .bind(request.loan_amount)
    .bind(request.interest_rate)
    .bind(balance)
    .bind(request.date)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// Get a specific loan by ID.
pub async fn get_loan(
    State(pool): State<DbPool>,
    Path(loan_id): Path<String>,
) -> Result<Json<Loan>, AppError> {
    let loan = sqlx::query_as::<_, Loan>(
        r#"
        SELECT loan_id, cust_id, loan_amount, interest_rate, balance, date
        FROM loans
        WHERE loan_id = ?1
        "#,
    )
    .bind(&loan_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("loan"))?;

    Ok(Json(loan))
}

/// Partially update a loan; omitted fields keep their stored values.
///
/// Setting `balance` here is a direct field edit (e.g. a manual
/// adjustment), distinct from recording a payment.
pub async fn update_loan(
    State(pool): State<DbPool>,
    Path(loan_id): Path<String>,
    Json(request): Json<UpdateLoanRequest>,
) -> Result<Json<Loan>, AppError> {
    let loan = sqlx::query_as::<_, Loan>(
        r#"
        UPDATE loans
        SET cust_id       = COALESCE(?2, cust_id),
            loan_amount   = COALESCE(?3, loan_amount),
            interest_rate = COALESCE(?4, interest_rate),
            balance       = COALESCE(?5, balance),
            date          = COALESCE(?6, date)
        WHERE loan_id = ?1
        RETURNING loan_id, cust_id, loan_amount, interest_rate, balance, date
        "#,
    )
    .bind(&loan_id)
    .bind(&request.cust_id)
    .bind(request.loan_amount)
    .bind(request.interest_rate)
    .bind(request.balance)
    .bind(request.date)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("loan"))?;

    Ok(Json(loan))
}

/// Delete a loan.
///
/// Fails with 409 when a payment still references it.
pub async fn delete_loan(
    State(pool): State<DbPool>,
    Path(loan_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM loans WHERE loan_id = ?1")
        .bind(&loan_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("loan"));
    }

    Ok(StatusCode::NO_CONTENT)
}
