//! # Warung POS HTTP Server
//!
//! axum JSON API over the warung-db repositories.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Flow                                    │
//! │                                                                         │
//! │  Web Client ───► axum Router ───► Handler ───► Repository ───► SQLite  │
//! │                       │              │                                  │
//! │                       │              └── ApiError → status + JSON       │
//! │                       │                                                 │
//! │                  AppState { db: Database }  (cloned, shares the pool)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The library exposes the router so integration tests can drive it
//! in-process with `tower::ServiceExt::oneshot`.

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::{router, AppState};
