//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD with partial updates
//! - Low-stock queries for the dashboard and restock page
//!
//! ## Stock Mutations
//! This repository never touches `stock` directly: sales decrement it inside
//! the checkout transaction ([`super::transaction`]) and purchases increment
//! it inside the purchase transaction ([`super::purchase`]). The only stock
//! write here is the explicit value on a catalog edit.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use warung_core::validation::{validate_amount, validate_name, validate_stock};
use warung_core::{Money, Product};

/// Columns fetched for a full product row.
const PRODUCT_COLUMNS: &str =
    "id, name, category, price, cost, stock, min_stock, supplier, created_at, updated_at";

// =============================================================================
// Input Types
// =============================================================================

/// Payload for creating a product (`POST /products`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Money,
    #[serde(default)]
    pub cost: Money,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub min_stock: i64,
    #[serde(default)]
    pub supplier: Option<String>,
}

/// Partial update for a product (`PUT /products/{id}`).
/// Absent fields keep their current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub cost: Option<Money>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub supplier: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns the stored row.
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        let name = validate_name("name", &new.name).map_err(warung_core::CoreError::from)?;
        validate_amount("price", new.price).map_err(warung_core::CoreError::from)?;
        validate_amount("cost", new.cost).map_err(warung_core::CoreError::from)?;
        validate_stock("stock", new.stock).map_err(warung_core::CoreError::from)?;
        validate_stock("minStock", new.min_stock).map_err(warung_core::CoreError::from)?;

        debug!(name = %name, "Inserting product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, category, price, cost, stock, min_stock, supplier, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(&name)
        .bind(&new.category)
        .bind(new.price)
        .bind(new.cost)
        .bind(new.stock)
        .bind(new.min_stock)
        .bind(&new.supplier)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Applies a partial update and returns the stored row.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> DbResult<Product> {
        let name = match &patch.name {
            Some(n) => Some(validate_name("name", n).map_err(warung_core::CoreError::from)?),
            None => None,
        };
        if let Some(price) = patch.price {
            validate_amount("price", price).map_err(warung_core::CoreError::from)?;
        }
        if let Some(cost) = patch.cost {
            validate_amount("cost", cost).map_err(warung_core::CoreError::from)?;
        }
        if let Some(stock) = patch.stock {
            validate_stock("stock", stock).map_err(warung_core::CoreError::from)?;
        }
        if let Some(min_stock) = patch.min_stock {
            validate_stock("minStock", min_stock).map_err(warung_core::CoreError::from)?;
        }

        debug!(id = %id, "Updating product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = COALESCE(?2, name),
                category = COALESCE(?3, category),
                price = COALESCE(?4, price),
                cost = COALESCE(?5, cost),
                stock = COALESCE(?6, stock),
                min_stock = COALESCE(?7, min_stock),
                supplier = COALESCE(?8, supplier),
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(&patch.category)
        .bind(patch.price)
        .bind(patch.cost)
        .bind(patch.stock)
        .bind(patch.min_stock)
        .bind(&patch.supplier)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Hard delete: the catalog entry disappears. Sold-item history keeps
    /// its own name/price/cost snapshots, so reports are unaffected.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists products at or below their restock threshold.
    pub async fn list_low_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock <= min_stock ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample(name: &str, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Minuman".to_string(),
            price: Money::new(5_000),
            cost: Money::new(3_500),
            stock,
            min_stock: 3,
            supplier: Some("PD Sinar Jaya".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.insert(&sample("Teh Botol", 10)).await.unwrap();
        assert_eq!(created.name, "Teh Botol");
        assert_eq!(created.stock, 10);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_name() {
        let db = test_db().await;
        let err = db.products().insert(&sample("   ", 1)).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(_)));
    }

    #[tokio::test]
    async fn test_list_is_name_ordered() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(&sample("Kopi", 1)).await.unwrap();
        repo.insert(&sample("Aqua", 1)).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Aqua", "Kopi"]);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let db = test_db().await;
        let repo = db.products();
        let created = repo.insert(&sample("Teh Botol", 10)).await.unwrap();

        let patch = ProductPatch {
            price: Some(Money::new(6_000)),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap();

        assert_eq!(updated.price, Money::new(6_000));
        // Untouched fields survive
        assert_eq!(updated.name, "Teh Botol");
        assert_eq!(updated.stock, 10);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = test_db().await;
        let err = db
            .products()
            .update(42, &ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.products();
        let created = repo.insert(&sample("Teh Botol", 10)).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());

        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_keeps_sale_and_purchase_history() {
        use crate::repository::purchase::NewPurchase;
        use crate::repository::transaction::NewTransaction;
        use warung_core::cart::CartLine;
        use warung_core::PaymentMethod;

        let db = test_db().await;
        let created = db.products().insert(&sample("Teh Botol", 10)).await.unwrap();

        db.transactions()
            .checkout(&NewTransaction {
                items: vec![CartLine {
                    product_id: created.id,
                    quantity: 1,
                    price: Money::new(5_000),
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
        db.purchases()
            .create(&NewPurchase {
                product_id: created.id,
                quantity: 5,
                unit_cost: Money::new(3_500),
                supplier: None,
            })
            .await
            .unwrap();

        // The catalog entry goes away even though it was sold and restocked
        db.products().delete(created.id).await.unwrap();
        assert!(db.products().get_by_id(created.id).await.unwrap().is_none());

        // History survives through its snapshots
        let sales = db.transactions().list().await.unwrap();
        assert_eq!(sales[0].items[0].product_name, "Teh Botol");
        let purchases = db.purchases().list().await.unwrap();
        assert_eq!(purchases[0].product_name, "Teh Botol");
    }

    #[tokio::test]
    async fn test_low_stock_listing() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(&sample("Plenty", 10)).await.unwrap();
        repo.insert(&sample("Scarce", 2)).await.unwrap(); // min_stock = 3
        repo.insert(&sample("Boundary", 3)).await.unwrap(); // equal counts as low

        let low: Vec<String> = repo
            .list_low_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(low, vec!["Boundary", "Scarce"]);
    }
}
