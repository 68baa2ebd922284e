//! Sale data models and API request types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a sale record from the database.
///
/// # Database Table
///
/// Maps to the `sales` table. Each sale:
/// - References the product sold (required)
/// - Optionally references the invoice it was billed under
/// - Has already been subtracted from the product's `quantity_stock`
///   when it was recorded
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Sale {
    pub sales_id: String,
    pub product_id: String,
    pub invoice_id: Option<String>,

    /// Units sold; always positive
    pub quantity_sold: i64,

    /// Total sale price for this line
    pub price_total: f64,

    pub date: Option<NaiveDate>,
}

/// Request body for recording a sale.
///
/// # JSON Example
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
/// `invoice_id` is optional; when present it must reference an existing
/// invoice. `date` defaults to the current date. Recording the sale also
/// decrements the product's `quantity_stock` by `quantity_sold`; both
/// writes commit together.
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub sales_id: String,
    pub product_id: String,
    pub invoice_id: Option<String>,
    pub quantity_sold: i64,

    #[serde(default)]
    pub price_total: f64,

    pub date: Option<NaiveDate>,
}

/// Request body for partially updating a sale.
///
/// `quantity_sold` and `product_id` are fixed once recorded - the delta
/// has already been folded into the product's running total.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSaleRequest {
    pub invoice_id: Option<String>,
    pub price_total: Option<f64>,
    pub date: Option<NaiveDate>,
}
