//! Dashboard summary endpoint.

use crate::{db::DbPool, error::AppError};
use axum::{Json, extract::State};
use serde::Serialize;

/// Aggregate counters for the dashboard landing page.
///
/// # JSON Example
///
/// ```json
/// {
///   "totalCustomers": 42,
///   "totalProducts": 120,
///   "totalLoans": 7,
///   "pendingPayments": 56500
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_customers: i64,
    pub total_products: i64,
    pub total_loans: i64,

    /// Sum of outstanding loan balances; 0 when no loans exist
    pub pending_payments: f64,
}

/// Compute the dashboard summary as of call time.
///
/// The four aggregates are independent lookups, so they are dispatched as
/// a concurrent fan-out and joined rather than chained one after another.
pub async fn get_summary(State(pool): State<DbPool>) -> Result<Json<SummaryResponse>, AppError> {
    let total_customers =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers").fetch_one(&pool);
    let total_products =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products").fetch_one(&pool);
    let total_loans = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM loans").fetch_one(&pool);
    let pending_payments =
        sqlx::query_scalar::<_, f64>("SELECT COALESCE(SUM(balance), 0.0) FROM loans")
            .fetch_one(&pool);

    let (total_customers, total_products, total_loans, pending_payments) =
        tokio::try_join!(total_customers, total_products, total_loans, pending_payments)?;

    Ok(Json(SummaryResponse {
        total_customers,
        total_products,
        total_loans,
        pending_payments,
    }))
}
