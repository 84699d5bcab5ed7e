//! # Supplier Repository
//!
//! Supplier directory CRUD plus usage aggregates.
//!
//! ## Soft Linking
//! Products and purchases carry the supplier NAME as plain text rather than
//! a foreign key. The aggregates below join on that name, and deleting a
//! supplier never cascades into history. Renaming a supplier therefore
//! detaches old records; that matches how the directory is used in practice.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use warung_core::validation::validate_name;
use warung_core::{Supplier, SupplierStats};

/// Columns fetched for a supplier row.
const SUPPLIER_COLUMNS: &str =
    "id, name, contact_person, phone, email, address, notes, created_at, updated_at";

// =============================================================================
// Input Types
// =============================================================================

/// Payload for creating a supplier (`POST /suppliers`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for a supplier (`PUT /suppliers/{id}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the supplier directory.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists all suppliers with their usage aggregates, ordered by name.
    ///
    /// Aggregates are computed per row with correlated subqueries against the
    /// supplier name. Cheap at directory scale (tens of rows).
    pub async fn list(&self) -> DbResult<Vec<SupplierStats>> {
        let suppliers = sqlx::query_as::<_, SupplierStats>(&format!(
            r#"
            SELECT {SUPPLIER_COLUMNS},
                (SELECT COUNT(*) FROM products p WHERE p.supplier = s.name) AS product_count,
                (SELECT COUNT(*) FROM purchases pu WHERE pu.supplier = s.name) AS purchase_count,
                (SELECT COALESCE(SUM(pu.total), 0) FROM purchases pu WHERE pu.supplier = s.name)
                    AS total_purchases
            FROM suppliers s
            ORDER BY s.name
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Gets a supplier by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Inserts a new supplier and returns the stored row.
    pub async fn insert(&self, new: &NewSupplier) -> DbResult<Supplier> {
        let name = validate_name("name", &new.name).map_err(warung_core::CoreError::from)?;

        debug!(name = %name, "Inserting supplier");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (name, contact_person, phone, email, address, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(&name)
        .bind(&new.contact_person)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.address)
        .bind(&new.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Supplier", id))
    }

    /// Applies a partial update and returns the stored row.
    pub async fn update(&self, id: i64, patch: &SupplierPatch) -> DbResult<Supplier> {
        let name = match &patch.name {
            Some(n) => Some(validate_name("name", n).map_err(warung_core::CoreError::from)?),
            None => None,
        };

        debug!(id = %id, "Updating supplier");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                name = COALESCE(?2, name),
                contact_person = COALESCE(?3, contact_person),
                phone = COALESCE(?4, phone),
                email = COALESCE(?5, email),
                address = COALESCE(?6, address),
                notes = COALESCE(?7, notes),
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(&patch.contact_person)
        .bind(&patch.phone)
        .bind(&patch.email)
        .bind(&patch.address)
        .bind(&patch.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Supplier", id))
    }

    /// Deletes a supplier. Products and purchases keep their name snapshot.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting supplier");

        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
