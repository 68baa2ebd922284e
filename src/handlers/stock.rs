//! Stock receipt HTTP handlers.
//!
//! POST goes through the inventory service so the receipt and the
//! product's stock-total increment commit together.

use crate::{
    db::DbPool,
    error::AppError,
    models::stock::{
        CreateStockRequest, StockEntry, StockEntryWithProduct, UpdateStockRequest,
    },
    services::inventory_service,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all stock receipts, newest first.
///
/// Each row carries `product_name` via a left join against the products
/// table.
pub async fn list_stock_entries(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<StockEntryWithProduct>>, AppError> {
    let entries = sqlx::query_as::<_, StockEntryWithProduct>(
        r#"
        SELECT st.stock_id, st.product_id, st.supplier_id, st.quantity, st.date,
               p.name AS product_name
        FROM stock st
        LEFT JOIN products p ON p.product_id = st.product_id
        ORDER BY st.date DESC, st.stock_id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(entries))
}

/// Record a stock receipt.
///
/// # Endpoint
///
/// `POST /stock`
///
/// Inserts the receipt AND increments the referenced product's
/// `quantity_stock` in one database transaction (see
/// [`inventory_service::record_stock_receipt`]).
pub async fn create_stock_entry(
    State(pool): State<DbPool>,
    Json(request): Json<CreateStockRequest>,
) -> Result<(StatusCode, Json<StockEntry>), AppError> {
    let entry = inventory_service::record_stock_receipt(&pool, request).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Get a specific stock receipt by ID.
pub async fn get_stock_entry(
    State(pool): State<DbPool>,
    Path(stock_id): Path<String>,
) -> Result<Json<StockEntry>, AppError> {
    let entry = sqlx::query_as::<_, StockEntry>(
        r#"
        SELECT stock_id, product_id, supplier_id, quantity, date
        FROM stock
        WHERE stock_id = ?1
        "#,
    )
    .bind(&stock_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("stock entry"))?;

    Ok(Json(entry))
}

/// Partially update a stock receipt's bookkeeping fields.
///
/// Only `supplier_id` and `date` can change; the quantity is fixed once
/// recorded because it has already been folded into the product's total.
pub async fn update_stock_entry(
    State(pool): State<DbPool>,
    Path(stock_id): Path<String>,
    Json(request): Json<UpdateStockRequest>,
) -> Result<Json<StockEntry>, AppError> {
    let entry = sqlx::query_as::<_, StockEntry>(
        r#"
        UPDATE stock
        SET supplier_id = COALESCE(?2, supplier_id),
            date        = COALESCE(?3, date)
        WHERE stock_id = ?1
        RETURNING stock_id, product_id, supplier_id, quantity, date
        "#,
    )
    .bind(&stock_id)
    .bind(&request.supplier_id)
    .bind(request.date)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("stock entry"))?;

    Ok(Json(entry))
}

/// Delete a stock receipt.
///
/// Removes the log row only; the product's stock total keeps the quantity
/// that was folded in when the receipt was recorded.
pub async fn delete_stock_entry(
    State(pool): State<DbPool>,
    Path(stock_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM stock WHERE stock_id = ?1")
        .bind(&stock_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("stock entry"));
    }

    Ok(StatusCode::NO_CONTENT)
}
