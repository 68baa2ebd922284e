//! Customer data model and API request types.

use serde::{Deserialize, Serialize};

/// Represents a customer record from the database.
///
/// # Database Table
///
/// Maps to the `customers` table. The primary key is a caller-supplied
/// opaque code such as `"C010"` rather than a generated id; every contact
/// field besides the name is optional.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Customer {
    /// Caller-supplied unique identifier for this customer
    pub cust_id: String,

    /// Display name (required, non-empty)
    pub name: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Request body for creating a new customer.
///
/// # JSON Example
///
/// ```json
/// {
///   "cust_id": "C010",
///   "name": "Test User",
///   "phone": "9876543210",
///   "city": "Pune"
/// }
/// ```
///
/// # Validation
///
/// - `cust_id`: Required, non-empty
/// - `name`: Required, non-empty
/// - All other fields optional; absent fields are stored as NULL
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub cust_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Request body for partially updating a customer.
///
/// Every field is optional; omitted fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Query parameters accepted by the customer list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerListParams {
    /// Case-insensitive substring matched against a concatenation of
    /// id, name, email, phone, and city. Empty or absent returns all rows.
    pub q: Option<String>,

    /// 1-based page number. When absent the full list is returned.
    pub page: Option<u32>,
}
