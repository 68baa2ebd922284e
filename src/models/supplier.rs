//! Supplier data model and API request types.

use serde::{Deserialize, Serialize};

/// Represents a supplier record from the database.
///
/// Maps to the `suppliers` table. Products and stock entries reference
/// suppliers by id, so deleting a supplier that is still referenced fails
/// with an integrity error.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Supplier {
    pub supplier_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Request body for creating a supplier.
///
/// `supplier_id` and `name` are required and non-empty; the rest default
/// to NULL.
#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub supplier_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Request body for partially updating a supplier.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}
