//! Product catalog handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use warung_core::Product;
use warung_db::{NewProduct, ProductPatch};

use crate::error::ApiError;
use crate::routes::AppState;

/// `GET /products`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.db.products().list().await?;
    Ok(Json(products))
}

/// `POST /products`
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.db.products().insert(&new).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let product = state.db.products().update(id, &patch).await?;
    Ok(Json(product))
}

/// `DELETE /products/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /products/low-stock`
pub async fn low_stock(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.db.products().list_low_stock().await?;
    Ok(Json(products))
}
