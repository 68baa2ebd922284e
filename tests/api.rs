//! End-to-end tests driving the full router against an in-memory database.
//!
//! Each test builds its own application with its own pool, so tests are
//! fully isolated and run in parallel.

use std::str::FromStr;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use retail_inventory_server::app;

async fn test_app() -> Router {
    // Single connection so the in-memory database is shared across requests
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    app(pool)
}

/// Fire one request at the router and decode the JSON response (if any).
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_ok(app: &Router, uri: &str, body: Value) {
    let (status, response) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri} failed: {response}");
}

#[tokio::test]
async fn customer_round_trips_with_absent_email() {
    let app = test_app().await;

    create_ok(
        &app,
        "/customers",
        json!({"cust_id": "C010", "name": "Test User"}),
    )
    .await;

    let (status, customer) = send(&app, "GET", "/customers/C010", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(customer["cust_id"], "C010");
    assert_eq!(customer["name"], "Test User");
    assert_eq!(customer["email"], Value::Null);
}

#[tokio::test]
async fn partial_update_keeps_omitted_fields() {
    let app = test_app().await;

    create_ok(
        &app,
        "/customers",
        json!({"cust_id": "C1", "name": "Asha", "email": "asha@example.com", "city": "Pune"}),
    )
    .await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/customers/C1",
        Some(json!({"city": "Mumbai"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["city"], "Mumbai");
    // Omitted fields retain their previous values
    assert_eq!(updated["email"], "asha@example.com");
    assert_eq!(updated["name"], "Asha");
}

#[tokio::test]
async fn update_of_missing_customer_is_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, "PUT", "/customers/NOPE", Some(json!({"city": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_returns_not_found() {
    let app = test_app().await;

    create_ok(&app, "/customers", json!({"cust_id": "C1", "name": "Asha"})).await;

    let (status, _) = send(&app, "DELETE", "/customers/C1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/customers/C1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/customers/C1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_customer_id_is_a_conflict() {
    let app = test_app().await;

    create_ok(&app, "/customers", json!({"cust_id": "C1", "name": "Asha"})).await;

    let (status, body) = send(
        &app,
        "POST",
        "/customers",
        Some(json!({"cust_id": "C1", "name": "Asha Again"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "integrity_violation");
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/customers",
        Some(json!({"cust_id": "C1", "name": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn customer_filter_is_case_insensitive_substring() {
    let app = test_app().await;

    create_ok(
        &app,
        "/customers",
        json!({"cust_id": "C1", "name": "Asha", "city": "Pune"}),
    )
    .await;
    create_ok(
        &app,
        "/customers",
        json!({"cust_id": "C2", "name": "Binod", "city": "Mumbai"}),
    )
    .await;

    let (status, matched) = send(&app, "GET", "/customers?q=PUNE", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(matched.as_array().unwrap().len(), 1);
    assert_eq!(matched[0]["cust_id"], "C1");

    // The filter also covers the id column
    let (_, matched) = send(&app, "GET", "/customers?q=c2", None).await;
    assert_eq!(matched.as_array().unwrap().len(), 1);
    assert_eq!(matched[0]["cust_id"], "C2");

    // Empty filter returns everything, ordered by name
    let (_, all) = send(&app, "GET", "/customers", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["name"], "Asha");
}

#[tokio::test]
async fn sale_decrements_product_stock() {
    let app = test_app().await;

    create_ok(
        &app,
        "/products",
        json!({"product_id": "P1", "name": "Rice", "price": 550, "quantity_stock": 20}),
    )
    .await;

    create_ok(
        &app,
        "/sales",
        json!({"sales_id": "SL1", "product_id": "P1", "quantity_sold": 3, "price_total": 1650}),
    )
    .await;

    let (_, product) = send(&app, "GET", "/products/P1", None).await;
    assert_eq!(product["quantity_stock"], 17);
}

#[tokio::test]
async fn stock_receipt_increments_product_stock() {
    let app = test_app().await;

    create_ok(
        &app,
        "/products",
        json!({"product_id": "P1", "name": "Rice", "quantity_stock": 20}),
    )
    .await;

    let (status, entry) = send(
        &app,
        "POST",
        "/stock",
        Some(json!({"stock_id": "ST1", "product_id": "P1", "quantity": 15})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // Date defaults to the current date when omitted
    assert!(entry["date"].is_string());

    let (_, product) = send(&app, "GET", "/products/P1", None).await;
    assert_eq!(product["quantity_stock"], 35);
}

#[tokio::test]
async fn stock_total_tracks_any_interleaving() {
    let app = test_app().await;

    create_ok(
        &app,
        "/products",
        json!({"product_id": "P1", "name": "Rice", "quantity_stock": 10}),
    )
    .await;

    create_ok(
        &app,
        "/sales",
        json!({"sales_id": "SL1", "product_id": "P1", "quantity_sold": 4}),
    )
    .await;
    create_ok(
        &app,
        "/stock",
        json!({"stock_id": "ST1", "product_id": "P1", "quantity": 5}),
    )
    .await;
    create_ok(
        &app,
        "/sales",
        json!({"sales_id": "SL2", "product_id": "P1", "quantity_sold": 2}),
    )
    .await;
    create_ok(
        &app,
        "/stock",
        json!({"stock_id": "ST2", "product_id": "P1", "quantity": 7}),
    )
    .await;

    let (_, product) = send(&app, "GET", "/products/P1", None).await;
    // 10 - 4 + 5 - 2 + 7
    assert_eq!(product["quantity_stock"], 16);
}

#[tokio::test]
async fn sale_against_missing_product_changes_nothing() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/sales",
        Some(json!({"sales_id": "SL1", "product_id": "NOPE", "quantity_sold": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, sales) = send(&app, "GET", "/sales", None).await;
    assert_eq!(sales.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn sale_with_missing_invoice_is_a_conflict() {
    let app = test_app().await;

    create_ok(
        &app,
        "/products",
        json!({"product_id": "P1", "name": "Rice", "quantity_stock": 20}),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/sales",
        Some(json!({
            "sales_id": "SL1",
            "product_id": "P1",
            "invoice_id": "NOPE",
            "quantity_sold": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The propagation write rolled back with the failed insert
    let (_, product) = send(&app, "GET", "/products/P1", None).await;
    assert_eq!(product["quantity_stock"], 20);
}

#[tokio::test]
async fn payment_decrements_loan_balance() {
    let app = test_app().await;

    create_ok(&app, "/customers", json!({"cust_id": "C1", "name": "Asha"})).await;
    create_ok(
        &app,
        "/loans",
        json!({"loan_id": "L1", "cust_id": "C1", "loan_amount": 8000}),
    )
    .await;

    let (status, payment) = send(
        &app,
        "POST",
        "/payments",
        Some(json!({"pay_id": "PAY1", "loan_id": "L1", "amount_paid": 500})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // Mode and date default when omitted
    assert_eq!(payment["mode"], "Cash");
    assert!(payment["date"].is_string());

    let (_, loan) = send(&app, "GET", "/loans/L1", None).await;
    assert_eq!(loan["balance"], 7500.0);
}

#[tokio::test]
async fn loan_balance_defaults_to_loan_amount() {
    let app = test_app().await;

    create_ok(&app, "/customers", json!({"cust_id": "C1", "name": "Asha"})).await;

    let (status, loan) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({"loan_id": "L1", "cust_id": "C1", "loan_amount": 15000, "interest_rate": 3.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["balance"], 15000.0);
}

#[tokio::test]
async fn deleting_referenced_supplier_fails_with_conflict() {
    let app = test_app().await;

    create_ok(
        &app,
        "/suppliers",
        json!({"supplier_id": "S1", "name": "Gupta Traders"}),
    )
    .await;
    create_ok(
        &app,
        "/products",
        json!({"product_id": "P1", "name": "Rice", "supplier_id": "S1"}),
    )
    .await;

    let (status, body) = send(&app, "DELETE", "/suppliers/S1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "integrity_violation");

    // The supplier is still there
    let (status, _) = send(&app, "GET", "/suppliers/S1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn product_with_missing_supplier_is_a_conflict() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"product_id": "P1", "name": "Rice", "supplier_id": "NOPE"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn product_list_joins_supplier_name() {
    let app = test_app().await;

    create_ok(
        &app,
        "/suppliers",
        json!({"supplier_id": "S1", "name": "Gupta Traders"}),
    )
    .await;
    create_ok(
        &app,
        "/products",
        json!({"product_id": "P1", "name": "Rice", "supplier_id": "S1"}),
    )
    .await;
    create_ok(&app, "/products", json!({"product_id": "P2", "name": "Oil"})).await;

    let (status, products) = send(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);

    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 2);
    // Ordered by name: Oil before Rice
    assert_eq!(products[0]["name"], "Oil");
    assert_eq!(products[0]["supplier_name"], Value::Null);
    assert_eq!(products[1]["supplier_name"], "Gupta Traders");
}

#[tokio::test]
async fn stock_list_joins_product_name() {
    let app = test_app().await;

    create_ok(
        &app,
        "/products",
        json!({"product_id": "P1", "name": "Rice", "quantity_stock": 5}),
    )
    .await;
    create_ok(
        &app,
        "/stock",
        json!({"stock_id": "ST1", "product_id": "P1", "quantity": 10}),
    )
    .await;

    let (_, entries) = send(&app, "GET", "/stock", None).await;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["product_name"], "Rice");
}

#[tokio::test]
async fn summary_reports_counts_and_outstanding_balance() {
    let app = test_app().await;

    // Empty database: every aggregate is zero
    let (status, summary) = send(&app, "GET", "/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalCustomers"], 0);
    assert_eq!(summary["pendingPayments"], 0.0);

    create_ok(&app, "/customers", json!({"cust_id": "C1", "name": "Asha"})).await;
    create_ok(&app, "/customers", json!({"cust_id": "C2", "name": "Binod"})).await;
    create_ok(&app, "/products", json!({"product_id": "P1", "name": "Rice"})).await;
    create_ok(
        &app,
        "/loans",
        json!({"loan_id": "L1", "cust_id": "C1", "loan_amount": 8000}),
    )
    .await;
    create_ok(
        &app,
        "/loans",
        json!({"loan_id": "L2", "cust_id": "C2", "loan_amount": 2000}),
    )
    .await;
    create_ok(
        &app,
        "/payments",
        json!({"pay_id": "PAY1", "loan_id": "L1", "amount_paid": 500}),
    )
    .await;

    let (_, summary) = send(&app, "GET", "/summary", None).await;
    assert_eq!(summary["totalCustomers"], 2);
    assert_eq!(summary["totalProducts"], 1);
    assert_eq!(summary["totalLoans"], 2);
    // 8000 - 500 + 2000
    assert_eq!(summary["pendingPayments"], 9500.0);
}

#[tokio::test]
async fn health_reports_connected_database() {
    let app = test_app().await;

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "connected");
}
