//! Reporting handlers (dashboard and chart). Read-only.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use warung_core::{ChartPoint, DashboardStats};

use crate::error::ApiError;
use crate::routes::AppState;

/// Query string for `GET /chart`.
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Trailing window in days. The web client sends 7 or 30.
    pub period: Option<u32>,
}

/// `GET /dashboard`
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state.db.reports().dashboard().await?;
    Ok(Json(stats))
}

/// `GET /chart?period=7|30`
pub async fn chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Vec<ChartPoint>>, ApiError> {
    let points = state.db.reports().chart(query.period.unwrap_or(7)).await?;
    Ok(Json(points))
}
