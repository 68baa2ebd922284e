//! Inventory service - stock receipts and sales with their propagation writes.
//!
//! Recording a stock receipt or a sale touches two tables: the log row
//! itself and the running `quantity_stock` total on the referenced
//! product.
//!
//! # Atomicity Guarantees
//!
//! Both writes happen within one SQLite transaction, so neither is ever
//! visible without the other. The adjustment is an in-database
//! `SET quantity_stock = quantity_stock ± ?` rather than a read-modify-write
//! round trip, so two concurrent writers against the same product cannot
//! lose an update.

use chrono::Utc;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        sale::{CreateSaleRequest, Sale},
        stock::{CreateStockRequest, StockEntry},
    },
};

/// Record a stock receipt and add its quantity to the product's stock total.
///
/// # Process
///
/// 1. Start database transaction
/// 2. Increment the product's `quantity_stock` (0 rows updated means the
///    product does not exist - roll back)
/// 3. Insert the stock entry, defaulting `date` to today
/// 4. Commit (or rollback on error)
///
/// # Errors
///
/// - `InvalidRequest`: `stock_id` is blank or `quantity` is zero/negative
/// - `NotFound`: the referenced product does not exist
/// - `Integrity`: duplicate `stock_id` or missing supplier
/// - `Database`: any other database error
pub async fn record_stock_receipt(
    pool: &DbPool,
    request: CreateStockRequest,
) -> Result<StockEntry, AppError> {
    if request.stock_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "stock_id must not be empty".to_string(),
        ));
    }

    // Validate quantity
    if request.quantity <= 0 {
        return Err(AppError::InvalidRequest(
            "quantity must be positive".to_string(),
        ));
    }

    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());

    // Start db transaction
    let mut tx = pool.begin().await?;

    // Fold the delta into the product's running total
    let updated_count = sqlx::query(
        "UPDATE products SET quantity_stock = quantity_stock + ?1 WHERE product_id = ?2",
    )
    .bind(request.quantity)
    .bind(&request.product_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated_count == 0 {
        tx.rollback().await?;
        return Err(AppError::NotFound("product"));
    }

    // Record the receipt itself
    let entry = sqlx::query_as::<_, StockEntry>(
        r#"
        INSERT INTO stock (stock_id, product_id, supplier_id, quantity, date)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING stock_id, product_id, supplier_id, quantity, date
        "#,
    )
    .bind(&request.stock_id)
    .bind(&request.product_id)
    .bind(&request.supplier_id)
    .bind(request.quantity)
    .bind(date)
    .fetch_one(&mut *tx)
    .await?;

    // Commit all changes atomically
    tx.commit().await?;

    Ok(entry)
}

/// Record a sale and subtract its quantity from the product's stock total.
///
/// The invoice reference is optional; when present the store checks it
/// against the invoices table. The stock total is allowed to go negative -
/// an oversold product is recorded as observed, not rejected.
///
/// # Errors
///
/// - `InvalidRequest`: `sales_id` is blank or `quantity_sold` is zero/negative
/// - `NotFound`: the referenced product does not exist
/// - `Integrity`: duplicate `sales_id` or missing invoice
/// - `Database`: any other database error
pub async fn record_sale(pool: &DbPool, request: CreateSaleRequest) -> Result<Sale, AppError> {
    if request.sales_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "sales_id must not be empty".to_string(),
        ));
    }

    if request.quantity_sold <= 0 {
        return Err(AppError::InvalidRequest(
            "quantity_sold must be positive".to_string(),
        ));
    }

    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());

    // Start database transaction
    let mut tx = pool.begin().await?;

    let updated_count = sqlx::query(
        "UPDATE products SET quantity_stock = quantity_stock - ?1 WHERE product_id = ?2",
    )
    .bind(request.quantity_sold)
    .bind(&request.product_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated_count == 0 {
        tx.rollback().await?;
        return Err(AppError::NotFound("product"));
    }

    // Record the sale
    let sale = sqlx::query_as::<_, Sale>(
        r#"
        INSERT INTO sales (sales_id, product_id, invoice_id, quantity_sold, price_total, date)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING sales_id, product_id, invoice_id, quantity_sold, price_total, date
        "#,
    )
    .bind(&request.sales_id)
    .bind(&request.product_id)
    .bind(&request.invoice_id)
    .bind(request.quantity_sold)
    .bind(request.price_total)
    .bind(date)
    .fetch_one(&mut *tx)
    .await?;

    // Commit atomically
    tx.commit().await?;

    Ok(sale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    async fn test_pool() -> DbPool {
        // Single connection so the in-memory database is shared
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

    async fn seed_product(pool: &DbPool, product_id: &str, quantity_stock: i64) {
        sqlx::query(
            "INSERT INTO products (product_id, name, price, quantity_stock) VALUES (?1, ?2, 100, ?3)",
        )
        .bind(product_id)
        .bind(format!("product {product_id}"))
        .bind(quantity_stock)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn stock_of(pool: &DbPool, product_id: &str) -> i64 {
        sqlx::query_scalar("SELECT quantity_stock FROM products WHERE product_id = ?1")
            .bind(product_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn receipt(stock_id: &str, product_id: &str, quantity: i64) -> CreateStockRequest {
        CreateStockRequest {
            stock_id: stock_id.to_string(),
            product_id: product_id.to_string(),
            supplier_id: None,
            quantity,
            date: None,
        }
    }

    fn sale(sales_id: &str, product_id: &str, quantity_sold: i64) -> CreateSaleRequest {
        CreateSaleRequest {
            sales_id: sales_id.to_string(),
            product_id: product_id.to_string(),
            invoice_id: None,
            quantity_sold,
            price_total: 0.0,
            date: None,
        }
    }

    #[tokio::test]
    async fn receipt_increments_product_stock() {
        let pool = test_pool().await;
        seed_product(&pool, "P1", 20).await;

        let entry = record_stock_receipt(&pool, receipt("ST1", "P1", 15))
            .await
            .unwrap();

        assert_eq!(entry.quantity, 15);
        assert!(entry.date.is_some());
        assert_eq!(stock_of(&pool, "P1").await, 35);
    }

    #[tokio::test]
    async fn sale_decrements_product_stock() {
        let pool = test_pool().await;
        seed_product(&pool, "P1", 20).await;

        record_sale(&pool, sale("SL1", "P1", 3)).await.unwrap();

        assert_eq!(stock_of(&pool, "P1").await, 17);
    }

    #[tokio::test]
    async fn interleaved_receipts_and_sales_sum_up() {
        let pool = test_pool().await;
        seed_product(&pool, "P1", 10).await;

        record_stock_receipt(&pool, receipt("ST1", "P1", 5))
            .await
            .unwrap();
        record_sale(&pool, sale("SL1", "P1", 4)).await.unwrap();
        record_stock_receipt(&pool, receipt("ST2", "P1", 7))
            .await
            .unwrap();
        record_sale(&pool, sale("SL2", "P1", 2)).await.unwrap();

        // 10 + 5 - 4 + 7 - 2
        assert_eq!(stock_of(&pool, "P1").await, 16);
    }

    #[tokio::test]
    async fn sale_may_drive_stock_negative() {
        let pool = test_pool().await;
        seed_product(&pool, "P1", 2).await;

        record_sale(&pool, sale("SL1", "P1", 5)).await.unwrap();

        assert_eq!(stock_of(&pool, "P1").await, -3);
    }

    #[tokio::test]
    async fn sale_against_missing_product_leaves_no_trace() {
        let pool = test_pool().await;
        seed_product(&pool, "P1", 20).await;

        let err = record_sale(&pool, sale("SL1", "NOPE", 3)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("product")));

        let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sales, 0);
        assert_eq!(stock_of(&pool, "P1").await, 20);
    }

    #[tokio::test]
    async fn duplicate_receipt_id_rolls_back_the_increment() {
        let pool = test_pool().await;
        seed_product(&pool, "P1", 20).await;

        record_stock_receipt(&pool, receipt("ST1", "P1", 5))
            .await
            .unwrap();
        let err = record_stock_receipt(&pool, receipt("ST1", "P1", 5))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Integrity(_)));
        // Only the first receipt counted
        assert_eq!(stock_of(&pool, "P1").await, 25);
    }

    #[tokio::test]
    async fn nonpositive_quantities_are_rejected() {
        let pool = test_pool().await;
        seed_product(&pool, "P1", 20).await;

        let err = record_sale(&pool, sale("SL1", "P1", 0)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        let err = record_stock_receipt(&pool, receipt("ST1", "P1", -4))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        assert_eq!(stock_of(&pool, "P1").await, 20);
    }
}
