//! Maintenance handlers.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::routes::AppState;

/// `POST /reset-data` - wipes sale and purchase history. The catalog and
/// supplier directory survive.
pub async fn reset_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.db.admin().reset_transactions().await?;
    Ok(Json(json!({ "success": true })))
}
