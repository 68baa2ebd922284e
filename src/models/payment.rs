//! Loan payment data models and API request types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a loan payment record from the database.
///
/// Maps to the `payments` table. Each payment has already been subtracted
/// from the referenced loan's `balance` when it was recorded.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Payment {
    pub pay_id: String,
    pub loan_id: String,

    /// Amount paid; always positive
    pub amount_paid: f64,

    /// Payment mode, e.g. `"Cash"` or `"UPI"`
    pub mode: String,

    pub date: Option<NaiveDate>,
}

/// Request body for recording a loan payment.
///
/// # JSON Example
///
/// ```json
/// {
///   "pay_id": "PAY010",
///   "loan_id": "L010",
///   "amount_paid": 500
/// }
/// ```
///
/// `mode` defaults to `"Cash"` and `date` to the current date. Recording
/// the payment also decrements the loan's `balance` by `amount_paid`;
/// both writes commit together.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub pay_id: String,
    pub loan_id: String,
    pub amount_paid: f64,
    pub mode: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Request body for partially updating a payment.
///
/// `amount_paid` and `loan_id` are fixed once recorded - the delta has
/// already been folded into the loan's balance.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePaymentRequest {
    pub mode: Option<String>,
    pub date: Option<NaiveDate>,
}
