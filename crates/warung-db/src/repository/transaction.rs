//! # Transaction Repository
//!
//! The checkout write path and sale history queries.
//!
//! ## Checkout Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout (all or nothing)                        │
//! │                                                                         │
//! │  CartTotals::compute(lines)        pure validation, no DB yet          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  for each line:                                                         │
//! │      SELECT name, stock, cost FROM products WHERE id = ?                │
//! │          none        → ProductNotFound, ROLLBACK                        │
//! │          stock < qty → InsufficientStock, ROLLBACK                      │
//! │  INSERT INTO transactions (totals, cashier, payment)                    │
//! │  for each line:                                                         │
//! │      INSERT INTO transaction_items (snapshots)                          │
//! │      UPDATE products SET stock = stock - qty                            │
//! │          WHERE id = ? AND stock >= qty                                  │
//! │          0 rows → StockRace, ROLLBACK                                   │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guarded decrement is the real stock invariant; the earlier SELECT
//! exists to produce a friendly error message with the available count.
//! Unit cost is snapshotted from the catalog row inside the transaction, not
//! taken from the client.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::error::DbResult;
use warung_core::cart::{CartLine, CartTotals};
use warung_core::{CoreError, Money, PaymentMethod, Transaction, TransactionItem};

/// Columns fetched for a transaction header row.
const TRANSACTION_COLUMNS: &str =
    "id, subtotal, tax, discount, total, cashier_id, cashier_name, payment_method, created_at";

/// Columns fetched for a transaction item row.
const ITEM_COLUMNS: &str =
    "id, transaction_id, product_id, product_name, quantity, price, cost, line_total, created_at";

// =============================================================================
// Input Types
// =============================================================================

/// Payload for recording a sale (`POST /transactions`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub tax: Money,
    #[serde(default)]
    pub discount: Money,
    #[serde(default)]
    pub cashier_id: String,
    #[serde(default)]
    pub cashier_name: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Records a sale: validates the cart, snapshots catalog data, decrements
    /// stock, and commits everything atomically.
    ///
    /// ## Errors
    /// * `CoreError::EmptyCart` / validation errors - bad input, nothing persisted
    /// * `CoreError::ProductNotFound` - a line references a missing product
    /// * `CoreError::InsufficientStock` - not enough on hand for a line
    /// * `CoreError::StockRace` - a concurrent sale took the stock first
    ///
    /// Any error after BEGIN rolls the whole sale back.
    pub async fn checkout(&self, new: &NewTransaction) -> DbResult<Transaction> {
        let totals = CartTotals::compute(&new.items, new.tax, new.discount)?;

        debug!(
            lines = new.items.len(),
            total = %totals.total,
            "Starting checkout"
        );

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        // Availability pass: fail early with a descriptive error before any
        // writes happen. Cost comes from the catalog, not the client.
        let mut snapshots: Vec<(String, Money)> = Vec::with_capacity(new.items.len());
        for line in &new.items {
            let row = sqlx::query_as::<_, (String, i64, Money)>(
                "SELECT name, stock, cost FROM products WHERE id = ?1",
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let (name, stock, cost) = match row {
                Some(row) => row,
                None => return Err(CoreError::ProductNotFound(line.product_id).into()),
            };

            if stock < line.quantity {
                warn!(
                    product = %name,
                    available = stock,
                    requested = line.quantity,
                    "Checkout rejected: insufficient stock"
                );
                return Err(CoreError::InsufficientStock {
                    product: name,
                    available: stock,
                    requested: line.quantity,
                }
                .into());
            }

            snapshots.push((name, cost));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO transactions
                (subtotal, tax, discount, total, cashier_id, cashier_name, payment_method, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(totals.subtotal)
        .bind(totals.tax)
        .bind(totals.discount)
        .bind(totals.total)
        .bind(&new.cashier_id)
        .bind(&new.cashier_name)
        .bind(new.payment_method)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let transaction_id = result.last_insert_rowid();
        let mut items = Vec::with_capacity(new.items.len());

        for (line, (name, cost)) in new.items.iter().zip(&snapshots) {
            let line_total = line.line_total();

            let inserted = sqlx::query(
                r#"
                INSERT INTO transaction_items
                    (transaction_id, product_id, product_name, quantity, price, cost, line_total, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(transaction_id)
            .bind(line.product_id)
            .bind(name)
            .bind(line.quantity)
            .bind(line.price)
            .bind(*cost)
            .bind(line_total)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            // Guarded decrement: the WHERE clause re-checks stock so two
            // interleaved checkouts can never drive it negative.
            let updated = sqlx::query(
                "UPDATE products SET stock = stock - ?1, updated_at = ?3 WHERE id = ?2 AND stock >= ?1",
            )
            .bind(line.quantity)
            .bind(line.product_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                warn!(product = %name, "Checkout rejected: lost stock race");
                return Err(CoreError::StockRace {
                    product: name.clone(),
                }
                .into());
            }

            items.push(TransactionItem {
                id: inserted.last_insert_rowid(),
                transaction_id,
                product_id: line.product_id,
                product_name: name.clone(),
                quantity: line.quantity,
                price: line.price,
                cost: *cost,
                line_total,
                created_at: now,
            });
        }

        tx.commit().await?;

        info!(
            id = transaction_id,
            total = %totals.total,
            payment = %new.payment_method,
            "Sale recorded"
        );

        Ok(Transaction {
            id: transaction_id,
            subtotal: totals.subtotal,
            tax: totals.tax,
            discount: totals.discount,
            total: totals.total,
            cashier_id: new.cashier_id.clone(),
            cashier_name: new.cashier_name.clone(),
            payment_method: new.payment_method,
            created_at: now,
            items,
        })
    }

    /// Lists all transactions, newest first, with their items attached.
    pub async fn list(&self) -> DbResult<Vec<Transaction>> {
        let mut transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, TransactionItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM transaction_items ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut by_transaction: HashMap<i64, Vec<TransactionItem>> = HashMap::new();
        for item in items {
            by_transaction.entry(item.transaction_id).or_default().push(item);
        }

        for transaction in &mut transactions {
            if let Some(items) = by_transaction.remove(&transaction.id) {
                transaction.items = items;
            }
        }

        Ok(transactions)
    }

    /// Gets a single transaction with its items.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut transaction) = transaction else {
            return Ok(None);
        };

        transaction.items = sqlx::query_as::<_, TransactionItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM transaction_items WHERE transaction_id = ?1 ORDER BY id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(transaction))
    }

    /// Counts transactions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
