//! Sale transaction handlers.
//!
//! `create` is the checkout endpoint: the whole multi-step write
//! (validation, snapshots, stock decrements) happens inside one database
//! transaction in [`warung_db::TransactionRepository::checkout`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use warung_core::Transaction;
use warung_db::NewTransaction;

use crate::error::ApiError;
use crate::routes::AppState;

/// `GET /transactions`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state.db.transactions().list().await?;
    Ok(Json(transactions))
}

/// `POST /transactions`
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = state.db.transactions().checkout(&new).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}
