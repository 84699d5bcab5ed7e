//! # Admin Repository
//!
//! Maintenance operations. Currently only the history reset behind
//! `POST /reset-data`.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::DbResult;

/// Repository for maintenance operations.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    /// Creates a new AdminRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AdminRepository { pool }
    }

    /// Wipes the sale and purchase history in one transaction.
    ///
    /// ## What Is Deleted
    /// - All transaction items, then all transactions
    /// - All purchases
    ///
    /// The catalog and supplier directory survive; product stock is NOT
    /// recomputed. The tables use plain rowid keys, so numbering restarts
    /// at 1 once the rows are gone.
    pub async fn reset_transactions(&self) -> DbResult<()> {
        warn!("Resetting transaction and purchase history");

        let mut tx = self.pool.begin().await?;

        // Items first: they reference transactions
        sqlx::query("DELETE FROM transaction_items")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM transactions")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM purchases")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("History reset complete");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
