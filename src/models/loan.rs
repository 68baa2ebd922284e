//! Loan data models and API request types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a loan record from the database.
///
/// # Database Table
///
/// Maps to the `loans` table.
///
/// # Balance Accounting
///
/// `balance` is a running total: it starts at `loan_amount` and every
/// recorded payment decrements it in the same transaction as the payment
/// insert. It may go negative - an overpaid loan is recorded as observed.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Loan {
    pub loan_id: String,

    /// Borrower reference (required)
    pub cust_id: String,

    /// Principal issued
    pub loan_amount: f64,

    /// Interest rate in percent
    pub interest_rate: f64,

    /// Amount still owed
    pub balance: f64,

    pub date: Option<NaiveDate>,
}

/// Request body for creating a loan.
///
/// # JSON Example
///
/// ```json
/// {
///   "loan_id": "L010",
///   "cust_id": "C010",
///   "loan_amount": 8000,
///   "interest_rate": 2.5
/// }
/// ```
///
/// # Validation
///
/// - `loan_id` and `cust_id`: Required, non-empty
/// - `loan_amount`: Required
/// - `balance`: Optional, defaults to `loan_amount` (no payments yet)
#[derive(Debug, Deserialize)]
pub struct CreateLoanRequest {
    pub loan_id: String,
    pub cust_id: String,
    pub loan_amount: f64,

    #[serde(default)]
    pub interest_rate: f64,

    pub balance: Option<f64>,
    pub date: Option<NaiveDate>,
}

/// Request body for partially updating a loan.
///
/// `balance` can be set directly here (e.g. a manual adjustment) - this
/// is a plain field edit, not a payment.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLoanRequest {
    pub cust_id: Option<String>,
    pub loan_amount: Option<f64>,
    pub interest_rate: Option<f64>,
    pub balance: Option<f64>,
    pub date: Option<NaiveDate>,
}
