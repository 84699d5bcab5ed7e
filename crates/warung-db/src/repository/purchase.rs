//! # Purchase Repository
//!
//! Recording incoming stock from suppliers.
//!
//! ## Side Effects
//! Creating a purchase does two things in one database transaction:
//! 1. Inserts the purchase record (with a frozen product-name snapshot)
//! 2. Updates the product: `stock += quantity`, `cost = unit_cost`
//!
//! The cost overwrite means the catalog always carries the latest
//! acquisition cost, which is what future sales snapshot for profit math.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use warung_core::validation::{validate_amount, validate_quantity};
use warung_core::{Money, Purchase};

/// Columns fetched for a purchase row.
const PURCHASE_COLUMNS: &str =
    "id, product_id, product_name, quantity, unit_cost, total, supplier, created_at";

// =============================================================================
// Input Types
// =============================================================================

/// Payload for recording a purchase (`POST /purchases`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_cost: Money,
    #[serde(default)]
    pub supplier: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for purchase records.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Records a purchase and applies its stock/cost effects atomically.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - the product doesn't exist
    /// * Validation errors for non-positive quantity or negative cost
    pub async fn create(&self, new: &NewPurchase) -> DbResult<Purchase> {
        validate_quantity(new.quantity).map_err(warung_core::CoreError::from)?;
        validate_amount("unitCost", new.unit_cost).map_err(warung_core::CoreError::from)?;

        debug!(
            product_id = new.product_id,
            quantity = new.quantity,
            "Recording purchase"
        );

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let product_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM products WHERE id = ?1")
                .bind(new.product_id)
                .fetch_optional(&mut *tx)
                .await?;

        let product_name = match product_name {
            Some(name) => name,
            None => return Err(DbError::not_found("Product", new.product_id)),
        };

        let total = new.unit_cost.multiply_quantity(new.quantity);

        let result = sqlx::query(
            r#"
            INSERT INTO purchases
                (product_id, product_name, quantity, unit_cost, total, supplier, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(new.product_id)
        .bind(&product_name)
        .bind(new.quantity)
        .bind(new.unit_cost)
        .bind(total)
        .bind(&new.supplier)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE products SET stock = stock + ?1, cost = ?2, updated_at = ?4 WHERE id = ?3",
        )
        .bind(new.quantity)
        .bind(new.unit_cost)
        .bind(new.product_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let id = result.last_insert_rowid();
        info!(
            id,
            product = %product_name,
            quantity = new.quantity,
            total = %total,
            "Purchase recorded"
        );

        Ok(Purchase {
            id,
            product_id: new.product_id,
            product_name,
            quantity: new.quantity,
            unit_cost: new.unit_cost,
            total,
            supplier: new.supplier.clone(),
            created_at: now,
        })
    }

    /// Lists all purchases, newest first.
    pub async fn list(&self) -> DbResult<Vec<Purchase>> {
        let purchases = sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    /// Counts purchases (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
