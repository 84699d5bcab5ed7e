//! # Route Modules
//!
//! HTTP handlers, grouped per aggregate like the repositories they call.
//!
//! ## Surface
//! ```text
//! GET  /health                    liveness + db ping
//! GET  /products                  list catalog
//! POST /products                  create product
//! GET  /products/low-stock        restock list
//! PUT  /products/{id}             partial update
//! DEL  /products/{id}             delete
//! GET  /transactions              sale history with items
//! POST /transactions              checkout
//! GET  /purchases                 purchase history
//! POST /purchases                 record purchase
//! GET  /suppliers                 directory with aggregates
//! POST /suppliers                 create supplier
//! PUT  /suppliers/{id}            partial update
//! DEL  /suppliers/{id}            delete
//! GET  /dashboard                 dashboard stats
//! GET  /chart?period=7|30         daily series
//! POST /reset-data                wipe sale/purchase history
//! ```
//!
//! Handlers are deliberately one repository call each; anything thicker
//! belongs in warung-core or warung-db.

pub mod admin;
pub mod product;
pub mod purchase;
pub mod report;
pub mod supplier;
pub mod transaction;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use warung_db::Database;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Builds the full application router.
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(product::list).post(product::create))
        .route("/products/low-stock", get(product::low_stock))
        .route(
            "/products/{id}",
            axum::routing::put(product::update).delete(product::remove),
        )
        .route(
            "/transactions",
            get(transaction::list).post(transaction::create),
        )
        .route("/purchases", get(purchase::list).post(purchase::create))
        .route("/suppliers", get(supplier::list).post(supplier::create))
        .route(
            "/suppliers/{id}",
            axum::routing::put(supplier::update).delete(supplier::remove),
        )
        .route("/dashboard", get(report::dashboard))
        .route("/chart", get(report::chart))
        .route("/reset-data", post(admin::reset_data))
        .with_state(AppState { db })
}

/// `GET /health` - liveness plus a database ping.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = state.db.health_check().await;
    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database,
    }))
}
