//! Supplier directory handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use warung_core::{Supplier, SupplierStats};
use warung_db::{NewSupplier, SupplierPatch};

use crate::error::ApiError;
use crate::routes::AppState;

/// `GET /suppliers` - directory rows with usage aggregates.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SupplierStats>>, ApiError> {
    let suppliers = state.db.suppliers().list().await?;
    Ok(Json(suppliers))
}

/// `POST /suppliers`
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewSupplier>,
) -> Result<(StatusCode, Json<Supplier>), ApiError> {
    let supplier = state.db.suppliers().insert(&new).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// `PUT /suppliers/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<SupplierPatch>,
) -> Result<Json<Supplier>, ApiError> {
    let supplier = state.db.suppliers().update(id, &patch).await?;
    Ok(Json(supplier))
}

/// `DELETE /suppliers/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.suppliers().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
