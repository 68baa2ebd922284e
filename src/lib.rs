//! Retail Inventory Service
//!
//! This is a REST API server for a small retail and loan-inventory
//! business: customers, suppliers, products, stock receipts, invoices,
//! sales, loans, and loan payments over a single SQLite database file.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: SQLite with sqlx (async queries)
//! - **Format**: JSON requests/responses
//!
//! Writes that touch two tables at once (a sale and its product's stock
//! total, a payment and its loan's balance, a stock receipt and its
//! product's stock total) go through the services in [`services`], which
//! wrap both statements in one database transaction.
//!
//! The binary in `main.rs` wires configuration, the connection pool, and
//! [`app`] together; everything else lives in this library so integration
//! tests can drive the full router against their own database.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::DbPool;

/// Build the application router over a database pool.
///
/// One resource root per entity, plus the dashboard summary and a health
/// probe. The pool is shared with all handlers via State extraction.
pub fn app(pool: DbPool) -> Router {
    Router::new()
        // Public health probe
        .route("/health", get(handlers::health::health_check))
        // Customer management routes
        .route(
            "/customers",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route(
            "/customers/{id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        // Supplier routes
        .route(
            "/suppliers",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route(
            "/suppliers/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        // Product routes (list joins the supplier display name)
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        // Stock receipts (POST also adjusts the product's stock total)
        .route(
            "/stock",
            get(handlers::stock::list_stock_entries).post(handlers::stock::create_stock_entry),
        )
        .route(
            "/stock/{id}",
            get(handlers::stock::get_stock_entry)
                .put(handlers::stock::update_stock_entry)
                .delete(handlers::stock::delete_stock_entry),
        )
        // Invoice routes
        .route(
            "/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(handlers::invoices::get_invoice)
                .put(handlers::invoices::update_invoice)
                .delete(handlers::invoices::delete_invoice),
        )
        // Sales (POST also adjusts the product's stock total)
        .route(
            "/sales",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route(
            "/sales/{id}",
            get(handlers::sales::get_sale)
                .put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        )
        // Loan routes
        .route(
            "/loans",
            get(handlers::loans::list_loans).post(handlers::loans::create_loan),
        )
        .route(
            "/loans/{id}",
            get(handlers::loans::get_loan)
                .put(handlers::loans::update_loan)
                .delete(handlers::loans::delete_loan),
        )
        // Loan payments (POST also adjusts the loan's balance)
        .route(
            "/payments",
            get(handlers::payments::list_payments).post(handlers::payments::create_payment),
        )
        .route(
            "/payments/{id}",
            get(handlers::payments::get_payment)
                .put(handlers::payments::update_payment)
                .delete(handlers::payments::delete_payment),
        )
        // Dashboard summary
        .route("/summary", get(handlers::summary::get_summary))
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Browser dashboards call this API directly
        .layer(CorsLayer::permissive())
        // Share database pool with all handlers via State extraction
        .with_state(pool)
}
