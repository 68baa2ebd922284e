//! Invoice data model and API request types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an invoice record from the database.
///
/// Maps to the `invoices` table. Sales may reference an invoice to group
/// line items under one bill.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub cust_id: String,
    pub date: Option<NaiveDate>,
    pub total_amt: f64,
}

/// Request body for creating an invoice.
///
/// `invoice_id` and `cust_id` are required; `cust_id` must reference an
/// existing customer. `total_amt` defaults to 0.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub invoice_id: String,
    pub cust_id: String,
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub total_amt: f64,
}

/// Request body for partially updating an invoice.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub cust_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub total_amt: Option<f64>,
}
