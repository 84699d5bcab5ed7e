//! Purchase recording handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use warung_core::Purchase;
use warung_db::NewPurchase;

use crate::error::ApiError;
use crate::routes::AppState;

/// `GET /purchases`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Purchase>>, ApiError> {
    let purchases = state.db.purchases().list().await?;
    Ok(Json(purchases))
}

/// `POST /purchases`
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewPurchase>,
) -> Result<(StatusCode, Json<Purchase>), ApiError> {
    let purchase = state.db.purchases().create(&new).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}
