//! Product data models and API request types.
//!
//! This module defines:
//! - `Product`: Database entity representing a product
//! - `ProductWithSupplier`: Product joined with its supplier's display name
//! - Request types for creating and updating products

use serde::{Deserialize, Serialize};

/// Represents a product record from the database.
///
/// # Database Table
///
/// Maps to the `products` table.
///
/// # Stock Accounting
///
/// `quantity_stock` is a running total maintained incrementally: stock
/// receipts add to it and sales subtract from it, always through an
/// in-database increment inside the same transaction as the triggering
/// insert. It is never recomputed from the stock and sales logs on read.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Product {
    /// Caller-supplied unique identifier for this product
    pub product_id: String,

    /// Display name (required, non-empty)
    pub name: String,

    pub description: Option<String>,

    /// Unit price
    pub price: f64,

    /// Units currently on hand. May go negative: an oversold product is
    /// recorded as observed rather than clamped.
    pub quantity_stock: i64,

    /// Supplier reference; NULL when no supplier is set
    pub supplier_id: Option<String>,
}

/// Product row joined with its supplier's display name, as returned by
/// the list endpoint.
///
/// `supplier_name` is NULL when the product has no supplier set.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ProductWithSupplier {
    pub product_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity_stock: i64,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
}

/// Request body for creating a new product.
///
/// # JSON Example
///
/// ```json
/// {
///   "product_id": "P010",
///   "name": "Basmati Rice 5kg",
///   "price": 550,
///   "quantity_stock": 20,
///   "supplier_id": "S001"
/// }
/// ```
///
/// # Validation
///
/// - `product_id` and `name`: Required, non-empty
/// - `price` and `quantity_stock`: Optional, default to 0
/// - `supplier_id`: Optional; when present it must reference an existing supplier
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub product_id: String,
    pub name: String,
    pub description: Option<String>,

    #[serde(default)]
    pub price: f64,

    /// Initial stock on hand
    #[serde(default)]
    pub quantity_stock: i64,

    pub supplier_id: Option<String>,
}

/// Request body for partially updating a product.
///
/// Every field is optional; omitted fields keep their stored values.
/// `quantity_stock` can be set directly here (e.g. after a physical
/// recount) - this is a plain field edit, not a stock movement.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity_stock: Option<i64>,
    pub supplier_id: Option<String>,
}
