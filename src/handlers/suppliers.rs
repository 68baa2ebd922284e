//! Supplier management HTTP handlers.
//!
//! Same shape as the customer endpoints, without the free-text filter.

use crate::{
    db::DbPool,
    error::AppError,
    models::supplier::{CreateSupplierRequest, Supplier, UpdateSupplierRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all suppliers, ordered by name.
pub async fn list_suppliers(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let suppliers = sqlx::query_as::<_, Supplier>(
        r#"
        SELECT supplier_id, name, email, phone, address, city
        FROM suppliers
        ORDER BY name
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(suppliers))
}

/// Create a new supplier.
///
/// Returns 201 with the stored row, 400 on a blank id or name, 409 when
/// the id already exists.
pub async fn create_supplier(
    State(pool): State<DbPool>,
    Json(request): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    if request.supplier_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "supplier_id must not be empty".to_string(),
        ));
    }
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }

    let supplier = sqlx::query_as::<_, Supplier>(
        r#"
        INSERT INTO suppliers (supplier_id, name, email, phone, address, city)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING supplier_id, name, email, phone, address, city
        "#,
    )
    .bind(&request.supplier_id)
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&request.address)
    .bind(&request.city)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

/// Get a specific supplier by ID.
pub async fn get_supplier(
    State(pool): State<DbPool>,
    Path(supplier_id): Path<String>,
) -> Result<Json<Supplier>, AppError> {
    let supplier = sqlx::query_as::<_, Supplier>(
        r#"
        SELECT supplier_id, name, email, phone, address, city
        FROM suppliers
        WHERE supplier_id = ?1
        "#,
    )
    .bind(&supplier_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("supplier"))?;

    Ok(Json(supplier))
}

/// Partially update a supplier; omitted fields keep their stored values.
pub async fn update_supplier(
    State(pool): State<DbPool>,
    Path(supplier_id): Path<String>,
    Json(request): Json<UpdateSupplierRequest>,
) -> Result<Json<Supplier>, AppError> {
    if matches!(&request.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }

    let supplier = sqlx::query_as::<_, Supplier>(
        r#"
        UPDATE suppliers
        SET name    = COALESCE(?2, name),
            email   = COALESCE(?3, email),
            phone   = COALESCE(?4, phone),
            address = COALESCE(?5, address),
            city    = COALESCE(?6, city)
        WHERE supplier_id = ?1
        RETURNING supplier_id, name, email, phone, address, city
        "#,
    )
    .bind(&supplier_id)
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&request.address)
    .bind(&request.city)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("supplier"))?;

    Ok(Json(supplier))
}

/// Delete a supplier.
///
/// Fails with 409 when a product or stock entry still references this
/// supplier; the dependent rows must be deleted or repointed first.
pub async fn delete_supplier(
    State(pool): State<DbPool>,
    Path(supplier_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM suppliers WHERE supplier_id = ?1")
        .bind(&supplier_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("supplier"));
    }

    Ok(StatusCode::NO_CONTENT)
}
