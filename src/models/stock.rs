//! Stock receipt data models and API request types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a stock receipt record from the database.
///
/// Maps to the `stock` table. Each row is an immutable delta that has
/// already been folded into the referenced product's `quantity_stock`
/// when it was recorded.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct StockEntry {
    pub stock_id: String,
    pub product_id: String,
    pub supplier_id: Option<String>,

    /// Units received; always positive
    pub quantity: i64,

    pub date: Option<NaiveDate>,
}

/// Stock entry joined with its product's display name, as returned by the
/// list endpoint.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct StockEntryWithProduct {
    pub stock_id: String,
    pub product_id: String,
    pub supplier_id: Option<String>,
    pub quantity: i64,
    pub date: Option<NaiveDate>,
    pub product_name: Option<String>,
}

/// Request body for recording a stock receipt.
///
/// # JSON Example
///
/// ```json
/// {
///   "stock_id": "ST010",
///   "product_id": "P010",
///   "supplier_id": "S001",
///   "quantity": 15
/// }
/// ```
///
/// `date` defaults to the current date when omitted. Recording the receipt
/// also increments the product's `quantity_stock` by `quantity`; both
/// writes commit together.
#[derive(Debug, Deserialize)]
pub struct CreateStockRequest {
    pub stock_id: String,
    pub product_id: String,
    pub supplier_id: Option<String>,
    pub quantity: i64,
    pub date: Option<NaiveDate>,
}

/// Request body for partially updating a stock entry.
///
/// `quantity` and `product_id` are fixed once recorded - the delta has
/// already been folded into the product's running total. Only the
/// bookkeeping fields can change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStockRequest {
    pub supplier_id: Option<String>,
    pub date: Option<NaiveDate>,
}
