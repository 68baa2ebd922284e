//! Customer management HTTP handlers.
//!
//! This module implements the customer-related API endpoints:
//! - GET /customers - List customers, with optional filter and paging
//! - POST /customers - Create new customer
//! - GET /customers/:id - Get customer by ID
//! - PUT /customers/:id - Partially update a customer
//! - DELETE /customers/:id - Delete a customer

use crate::{
    db::DbPool,
    error::AppError,
    models::customer::{
        CreateCustomerRequest, Customer, CustomerListParams, UpdateCustomerRequest,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

/// Rows per page when the list endpoint is paged.
const PAGE_SIZE: i64 = 50;

/// List customers, ordered by name.
///
/// # Endpoint
///
/// `GET /customers?q=<filter>&page=<n>`
///
/// # Filtering
///
/// `q` is matched case-insensitively as a substring of the concatenation
/// of id, name, email, phone, and city, so one search box on the caller's
/// side covers all the contact fields. An empty or absent `q` returns all
/// rows.
///
/// # Paging
///
/// `page` is 1-based with 50 rows per page. When absent, the full list is
/// returned in one response.
pub async fn list_customers(
    State(pool): State<DbPool>,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let filter = format!("%{}%", params.q.unwrap_or_default().to_lowercase());

    let query = r#"
        SELECT cust_id, name, email, phone, address, city
        FROM customers
        WHERE LOWER(cust_id || ' ' || name || ' ' || IFNULL(email, '') || ' '
              || IFNULL(phone, '') || ' ' || IFNULL(city, '')) LIKE ?1
        ORDER BY name
        "#;

    let customers = match params.page {
        Some(page) => {
            let offset = (i64::from(page.max(1)) - 1) * PAGE_SIZE;
            sqlx::query_as::<_, Customer>(&format!("{query} LIMIT ?2 OFFSET ?3"))
                .bind(&filter)
                .bind(PAGE_SIZE)
                .bind(offset)
                .fetch_all(&pool)
                .await?
        }
        None => {
            sqlx::query_as::<_, Customer>(query)
                .bind(&filter)
                .fetch_all(&pool)
                .await?
        }
    };

    Ok(Json(customers))
}

/// Create a new customer.
///
/// # Endpoint
///
/// `POST /customers`
///
/// # Request Body
///
/// ```json
/// {
///   "cust_id": "C010",
///   "name": "Test User",
///   "city": "Pune"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the stored row
/// - **Error (400)**: Blank id or name
/// - **Error (409)**: A customer with this id already exists
pub async fn create_customer(
    State(pool): State<DbPool>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    if request.cust_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "cust_id must not be empty".to_string(),
        ));
    }
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (cust_id, name, email, phone, address, city)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING cust_id, name, email, phone, address, city
        "#,
    )
    .bind(&request.cust_id)
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&request.address)
    .bind(&request.city)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

/// Get a specific customer by ID.
///
/// Returns 404 when the id has no matching row.
pub async fn get_customer(
    State(pool): State<DbPool>,
    Path(cust_id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let customer = sqlx::query_as::<_, Customer>(
        r#"
        SELECT cust_id, name, email, phone, address, city
        FROM customers
        WHERE cust_id = ?1
        "#,
    )
    .bind(&cust_id)
    .fetch_optional(&pool)
    .await?
    // Return 404 if not found
    .ok_or(AppError::NotFound("customer"))?;

    Ok(Json(customer))
}

/// Partially update a customer.
///
/// Each field not supplied retains its previous value - the update is a
/// `COALESCE` against the current row, so nothing is overwritten with
/// null. Returns 404 when the id has no matching row.
pub async fn update_customer(
    State(pool): State<DbPool>,
    Path(cust_id): Path<String>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    if matches!(&request.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        UPDATE customers
        SET name    = COALESCE(?2, name),
            email   = COALESCE(?3, email),
            phone   = COALESCE(?4, phone),
            address = COALESCE(?5, address),
            city    = COALESCE(?6, city)
        WHERE cust_id = ?1
        RETURNING cust_id, name, email, phone, address, city
        "#,
    )
    .bind(&cust_id)
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&request.address)
    .bind(&request.city)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("customer"))?;

    Ok(Json(customer))
}

/// Delete a customer.
///
/// Returns 204 No Content on success, 404 when the id has no matching
/// row, and 409 when a dependent row (invoice or loan) still references
/// this customer - deletes never cascade.
pub async fn delete_customer(
    State(pool): State<DbPool>,
    Path(cust_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM customers WHERE cust_id = ?1")
        .bind(&cust_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("customer"));
    }

    Ok(StatusCode::NO_CONTENT)
}
