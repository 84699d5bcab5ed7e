//! # Report Repository
//!
//! Read-only aggregate queries for the dashboard and the sales chart.
//!
//! ## Properties
//! - Pure reads: nothing here writes, so polling is always safe
//! - All sums COALESCE to zero, so an empty database reports zeroes rather
//!   than NULLs
//! - Profit is computed from frozen item snapshots (`quantity × (price −
//!   cost)`), so editing the catalog never rewrites history

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

use crate::error::DbResult;
use warung_core::{ChartPoint, DashboardStats, Money, RecentTransaction};

/// Longest chart window the API will serve.
const MAX_CHART_DAYS: u32 = 90;

/// How many rows the dashboard's recent-sales list carries.
const RECENT_LIMIT: i64 = 5;

/// Repository for read-only reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Computes the dashboard aggregates in one pass of scalar queries.
    pub async fn dashboard(&self) -> DbResult<DashboardStats> {
        debug!("Computing dashboard stats");

        let (total_products, low_stock_products): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(CASE WHEN stock <= min_stock THEN 1 ELSE 0 END), 0)
            FROM products
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let total_sales: Money =
            sqlx::query_scalar("SELECT COALESCE(SUM(total), 0) FROM transactions")
                .fetch_one(&self.pool)
                .await?;

        let (today_sales, today_transaction_count): (Money, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total), 0), COUNT(*)
            FROM transactions
            WHERE DATE(created_at) = DATE('now')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let total_purchases: Money =
            sqlx::query_scalar("SELECT COALESCE(SUM(total), 0) FROM purchases")
                .fetch_one(&self.pool)
                .await?;

        let profit: Money = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity * (price - cost)), 0) FROM transaction_items",
        )
        .fetch_one(&self.pool)
        .await?;

        let recent_transactions = sqlx::query_as::<_, RecentTransaction>(
            r#"
            SELECT id, total, payment_method, created_at
            FROM transactions
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardStats {
            total_products,
            low_stock_products,
            today_sales,
            today_transaction_count,
            total_sales,
            total_purchases,
            profit,
            recent_transactions,
        })
    }

    /// Builds the per-day chart series for the last `days` days (today
    /// included), zero-filling days with no activity.
    ///
    /// `days` is clamped to `1..=90`.
    pub async fn chart(&self, days: u32) -> DbResult<Vec<ChartPoint>> {
        let days = days.clamp(1, MAX_CHART_DAYS);
        // SQLite date modifier, e.g. "-6 days" for a 7-day window
        let since = format!("-{} days", days - 1);

        debug!(days, "Computing chart series");

        let sales_rows: Vec<(String, Money, i64)> = sqlx::query_as(
            r#"
            SELECT DATE(created_at), COALESCE(SUM(total), 0), COUNT(*)
            FROM transactions
            WHERE DATE(created_at) >= DATE('now', ?1)
            GROUP BY DATE(created_at)
            "#,
        )
        .bind(&since)
        .fetch_all(&self.pool)
        .await?;

        let purchase_rows: Vec<(String, Money)> = sqlx::query_as(
            r#"
            SELECT DATE(created_at), COALESCE(SUM(total), 0)
            FROM purchases
            WHERE DATE(created_at) >= DATE('now', ?1)
            GROUP BY DATE(created_at)
            "#,
        )
        .bind(&since)
        .fetch_all(&self.pool)
        .await?;

        let profit_rows: Vec<(String, Money)> = sqlx::query_as(
            r#"
            SELECT DATE(created_at), COALESCE(SUM(quantity * (price - cost)), 0)
            FROM transaction_items
            WHERE DATE(created_at) >= DATE('now', ?1)
            GROUP BY DATE(created_at)
            "#,
        )
        .bind(&since)
        .fetch_all(&self.pool)
        .await?;

        let sales: HashMap<String, (Money, i64)> = sales_rows
            .into_iter()
            .map(|(date, total, count)| (date, (total, count)))
            .collect();
        let purchases: HashMap<String, Money> = purchase_rows.into_iter().collect();
        let profit: HashMap<String, Money> = profit_rows.into_iter().collect();

        // SQLite can't generate a date series, so the contiguous axis is
        // assembled here. Oldest day first.
        let today = Utc::now().date_naive();
        let mut points = Vec::with_capacity(days as usize);
        for offset in (0..days as i64).rev() {
            let date = (today - Duration::days(offset)).format("%Y-%m-%d").to_string();
            let (day_sales, day_count) = sales.get(&date).copied().unwrap_or((Money::zero(), 0));
            points.push(ChartPoint {
                sales: day_sales,
                transactions: day_count,
                purchases: purchases.get(&date).copied().unwrap_or_else(Money::zero),
                profit: profit.get(&date).copied().unwrap_or_else(Money::zero),
                date,
            });
        }

        Ok(points)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::NewProduct;
    use crate::repository::purchase::NewPurchase;
    use crate::repository::transaction::NewTransaction;
    use warung_core::cart::CartLine;
    use warung_core::PaymentMethod;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price: i64, cost: i64, stock: i64) -> i64 {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                category: "Makanan".to_string(),
                price: Money::new(price),
                cost: Money::new(cost),
                stock,
                min_stock: 2,
                supplier: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn sell(db: &Database, product_id: i64, quantity: i64, price: i64) {
        db.transactions()
            .checkout(&NewTransaction {
                items: vec![CartLine {
                    product_id,
                    quantity,
                    price: Money::new(price),
                    cost: Money::zero(),
                }],
                tax: Money::zero(),
                discount: Money::zero(),
                cashier_id: "k1".to_string(),
                cashier_name: "Kasir Satu".to_string(),
                payment_method: PaymentMethod::Cash,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_dashboard_is_all_zeroes() {
        let db = test_db().await;
        let stats = db.reports().dashboard().await.unwrap();

        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.low_stock_products, 0);
        assert_eq!(stats.total_sales, Money::zero());
        assert_eq!(stats.total_purchases, Money::zero());
        assert_eq!(stats.profit, Money::zero());
        assert!(stats.recent_transactions.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_totals() {
        let db = test_db().await;
        let indomie = seed_product(&db, "Indomie Goreng", 10_000, 6_000, 20).await;
        let scarce = seed_product(&db, "Aqua", 4_000, 2_500, 1).await; // below min_stock

        sell(&db, indomie, 3, 10_000).await;
        sell(&db, indomie, 2, 10_000).await;

        db.purchases()
            .create(&NewPurchase {
                product_id: scarce,
                quantity: 10,
                unit_cost: Money::new(2_600),
                supplier: None,
            })
            .await
            .unwrap();

        let stats = db.reports().dashboard().await.unwrap();

        assert_eq!(stats.total_products, 2);
        // Aqua was restocked above its threshold by the purchase
        assert_eq!(stats.low_stock_products, 0);
        assert_eq!(stats.total_sales, Money::new(50_000));
        assert_eq!(stats.today_sales, Money::new(50_000));
        assert_eq!(stats.today_transaction_count, 2);
        assert_eq!(stats.total_purchases, Money::new(26_000));
        // 5 units sold at 10_000 with catalog cost 6_000
        assert_eq!(stats.profit, Money::new(20_000));
        assert_eq!(stats.recent_transactions.len(), 2);
    }

    #[tokio::test]
    async fn test_recent_transactions_capped_at_five() {
        let db = test_db().await;
        let id = seed_product(&db, "Aqua", 4_000, 2_500, 100).await;
        for _ in 0..7 {
            sell(&db, id, 1, 4_000).await;
        }

        let stats = db.reports().dashboard().await.unwrap();
        assert_eq!(stats.recent_transactions.len(), 5);
        // Newest first
        assert!(stats.recent_transactions[0].id > stats.recent_transactions[4].id);
    }

    #[tokio::test]
    async fn test_chart_is_contiguous_and_zero_filled() {
        let db = test_db().await;
        let id = seed_product(&db, "Indomie Goreng", 10_000, 6_000, 20).await;
        sell(&db, id, 2, 10_000).await;

        let points = db.reports().chart(7).await.unwrap();
        assert_eq!(points.len(), 7);

        // Today (last point) carries the sale; earlier days are zero
        let today = points.last().unwrap();
        assert_eq!(today.sales, Money::new(20_000));
        assert_eq!(today.transactions, 1);
        assert_eq!(today.profit, Money::new(8_000));
        for point in &points[..6] {
            assert_eq!(point.sales, Money::zero());
            assert_eq!(point.transactions, 0);
        }

        // Axis is sorted oldest to newest
        let mut dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
        let sorted = dates.clone();
        dates.sort();
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn test_chart_clamps_window() {
        let db = test_db().await;
        assert_eq!(db.reports().chart(0).await.unwrap().len(), 1);
        assert_eq!(db.reports().chart(365).await.unwrap().len(), 90);
    }
}
