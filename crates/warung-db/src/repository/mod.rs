//! # Repository Module
//!
//! Database repository implementations for Warung POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list()                                          │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, new)                                                │
//! │  └── update(&self, id, patch)                                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place per aggregate                          │
//! │  • Transactional write paths (checkout, purchase) live next to         │
//! │    the queries they guard                                              │
//! │  • Handlers stay one-call thin                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog CRUD and low-stock queries
//! - [`transaction::TransactionRepository`] - Checkout and sale history
//! - [`purchase::PurchaseRepository`] - Incoming stock recording
//! - [`supplier::SupplierRepository`] - Supplier directory with aggregates
//! - [`report::ReportRepository`] - Read-only dashboard and chart queries
//! - [`admin::AdminRepository`] - Data reset maintenance

pub mod admin;
pub mod product;
pub mod purchase;
pub mod report;
pub mod supplier;
pub mod transaction;
