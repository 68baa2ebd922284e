//! Invoice management HTTP handlers.

use crate::{
    db::DbPool,
    error::AppError,
    models::invoice::{CreateInvoiceRequest, Invoice, UpdateInvoiceRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all invoices, newest first.
pub async fn list_invoices(State(pool): State<DbPool>) -> Result<Json<Vec<Invoice>>, AppError> {
    let invoices = sqlx::query_as::<_, Invoice>(
        r#"
        SELECT invoice_id, cust_id, date, total_amt
        FROM invoices
        ORDER BY date DESC, invoice_id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(invoices))
}

/// Create a new invoice.
///
/// `cust_id` must reference an existing customer; a missing target is an
/// integrity error (409), not a silent insert.
pub async fn create_invoice(
    State(pool): State<DbPool>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    if request.invoice_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "invoice_id must not be empty".to_string(),
        ));
    }
    if request.cust_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "cust_id must not be empty".to_string(),
        ));
    }

    let invoice = sqlx::query_as::<_, Invoice>(
        r#"
        INSERT INTO invoices (invoice_id, cust_id, date, total_amt)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING invoice_id, cust_id, date, total_amt
        "#,
    )
    .bind(&request.invoice_id)
    .bind(&request.cust_id)
    .bind(request.date)
    .bind(request.total_amt)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Get a specific invoice by ID.
pub async fn get_invoice(
    State(pool): State<DbPool>,
    Path(invoice_id): Path<String>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = sqlx::query_as::<_, Invoice>(
        r#"
        SELECT invoice_id, cust_id, date, total_amt
        FROM invoices
        WHERE invoice_id = ?1
        "#,
    )
    .bind(&invoice_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("invoice"))?;

    Ok(Json(invoice))
}

/// Partially update an invoice; omitted fields keep their stored values.
pub async fn update_invoice(
    State(pool): State<DbPool>,
    Path(invoice_id): Path<String>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = sqlx::query_as::<_, Invoice>(
        r#"
        UPDATE invoices
        SET cust_id   = COALESCE(?2, cust_id),
            date      = COALESCE(?3, date),
            total_amt = COALESCE(?4, total_amt)
        WHERE invoice_id = ?1
        RETURNING invoice_id, cust_id, date, total_amt
        "#,
    )
    .bind(&invoice_id)
    .bind(&request.cust_id)
    .bind(request.date)
    .bind(request.total_amt)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("invoice"))?;

    Ok(Json(invoice))
}

/// Delete an invoice.
///
/// Fails with 409 when a sale still references it.
pub async fn delete_invoice(
    State(pool): State<DbPool>,
    Path(invoice_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM invoices WHERE invoice_id = ?1")
        .bind(&invoice_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("invoice"));
    }

    Ok(StatusCode::NO_CONTENT)
}
