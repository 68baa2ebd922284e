//! Product management HTTP handlers.
//!
//! This module implements the product-related API endpoints:
//! - GET /products - List products joined with their supplier's name
//! - POST /products - Create new product
//! - GET /products/:id - Get product by ID
//! - PUT /products/:id - Partially update a product
//! - DELETE /products/:id - Delete a product
//!
//! A product's `quantity_stock` changes through the stock and sales
//! endpoints; the PUT here edits it directly without touching the logs.

use crate::{
    db::DbPool,
    error::AppError,
    models::product::{
        CreateProductRequest, Product, ProductWithSupplier, UpdateProductRequest,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all products, ordered by name.
///
/// Each row carries `supplier_name`, the display name of the supplier via
/// a left join - NULL when the product has no supplier set.
pub async fn list_products(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<ProductWithSupplier>>, AppError> {
    let products = sqlx::query_as::<_, ProductWithSupplier>(
        r#"
        SELECT p.product_id, p.name, p.description, p.price, p.quantity_stock,
               p.supplier_id, s.name AS supplier_name
        FROM products p
        LEFT JOIN suppliers s ON s.supplier_id = p.supplier_id
        ORDER BY p.name
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(products))
}

/// Create a new product.
///
/// # Request Body
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
/// # Response
///
/// - **Success (201 Created)**: Returns the stored row
/// - **Error (400)**: Blank id or name
/// - **Error (409)**: Duplicate id, or `supplier_id` names no existing supplier
pub async fn create_product(
    State(pool): State<DbPool>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    if request.product_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "product_id must not be empty".to_string(),
        ));
    }
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }

    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (product_id, name, description, price, quantity_stock, supplier_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING product_id, name, description, price, quantity_stock, supplier_id
        "#,
    )
    .bind(&request.product_id)
    .bind(&request.name)
    .bind(&request.description)
    .bind(request.price)
    .bind(request.quantity_stock)
    .bind(&request.supplier_id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a specific product by ID.
pub async fn get_product(
    State(pool): State<DbPool>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT product_id, name, description, price, quantity_stock, supplier_id
        FROM products
        WHERE product_id = ?1
        "#,
    )
    .bind(&product_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("product"))?;

    Ok(Json(product))
}

/// Partially update a product; omitted fields keep their stored values.
pub async fn update_product(
    State(pool): State<DbPool>,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, AppError> {
    if matches!(&request.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }

    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET name           = COALESCE(?2, name),
            description    = COALESCE(?3, description),
            price          = COALESCE(?4, price),
            quantity_stock = COALESCE(?5, quantity_stock),
            supplier_id    = COALESCE(?6, supplier_id)
        WHERE product_id = ?1
        RETURNING product_id, name, description, price, quantity_stock, supplier_id
        "#,
    )
    .bind(&product_id)
    .bind(&request.name)
    .bind(&request.description)
    .bind(request.price)
    .bind(request.quantity_stock)
    .bind(&request.supplier_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("product"))?;

    Ok(Json(product))
}

/// Delete a product.
///
/// Fails with 409 when a stock entry or sale still references it.
pub async fn delete_product(
    State(pool): State<DbPool>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM products WHERE product_id = ?1")
        .bind(&product_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("product"));
    }

    Ok(StatusCode::NO_CONTENT)
}
