//! Sales HTTP handlers.
//!
//! POST goes through the inventory service so the sale and the product's
//! stock-total decrement commit together.

use crate::{
    db::DbPool,
    error::AppError,
    models::sale::{CreateSaleRequest, Sale, UpdateSaleRequest},
    services::inventory_service,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all sales, newest first.
pub async fn list_sales(State(pool): State<DbPool>) -> Result<Json<Vec<Sale>>, AppError> {
    let sales = sqlx::query_as::<_, Sale>(
        r#"
        SELECT sales_id, product_id, invoice_id, quantity_sold, price_total, date
        FROM sales
        ORDER BY date DESC, sales_id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(sales))
}

/// Record a sale.
///
/// # Endpoint
///
/// `POST /sales`
///
/// # Request Body
///
/// ```json
/// {
///   "sales_id": "SL010",
///   "product_id": "P010",
///   "quantity_sold": 3,
///   "price_total": 1650
/// }
/// ```
///
/// Inserts the sale AND decrements the referenced product's
/// `quantity_stock` in one database transaction (see
/// [`inventory_service::record_sale`]).
pub async fn create_sale(
    State(pool): State<DbPool>,
    Json(request): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<Sale>), AppError> {
    let sale = inventory_service::record_sale(&pool, request).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

/// Get a specific sale by ID.
pub async fn get_sale(
    State(pool): State<DbPool>,
    Path(sales_id): Path<String>,
) -> Result<Json<Sale>, AppError> {
    let sale = sqlx::query_as::<_, Sale>(
        r#"
        SELECT sales_id, product_id, invoice_id, quantity_sold, price_total, date
        FROM sales
        WHERE sales_id = ?1
        "#,
    )
    .bind(&sales_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("sale"))?;

    Ok(Json(sale))
}

/// Partially update a sale's bookkeeping fields.
///
/// Only `invoice_id`, `price_total`, and `date` can change; the quantity
/// is fixed once recorded because it has already been folded into the
/// product's total.
pub async fn update_sale(
    State(pool): State<DbPool>,
    Path(sales_id): Path<String>,
    Json(request): Json<UpdateSaleRequest>,
) -> Result<Json<Sale>, AppError> {
    let sale = sqlx::query_as::<_, Sale>(
        r#"
        UPDATE sales
        SET invoice_id  = COALESCE(?2, invoice_id),
            price_total = COALESCE(?3, price_total),
            date        = COALESCE(?4, date)
        WHERE sales_id = ?1
        RETURNING sales_id, product_id, invoice_id, quantity_sold, price_total, date
        "#,
    )
    .bind(&sales_id)
    .bind(&request.invoice_id)
    .bind(request.price_total)
    .bind(request.date)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("sale"))?;

    Ok(Json(sale))
}

/// Delete a sale.
///
/// Removes the log row only; the product's stock total keeps the
/// decrement that was applied when the sale was recorded.
pub async fn delete_sale(
    State(pool): State<DbPool>,
    Path(sales_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM sales WHERE sales_id = ?1")
        .bind(&sales_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("sale"));
    }

    Ok(StatusCode::NO_CONTENT)
}
