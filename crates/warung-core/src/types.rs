//! # Domain Types
//!
//! Core domain types used throughout Warung POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name, category │   │  totals         │   │  product_id     │       │
//! │  │  price, cost    │   │  cashier        │   │  quantity       │       │
//! │  │  stock          │   │  items[]        │   │  unit_cost      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Supplier     │   │ PaymentMethod   │   │ DashboardStats  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name, contact  │   │  Cash           │   │  read-only      │       │
//! │  │  soft-linked    │   │  Card           │   │  aggregates     │       │
//! │  │  by name        │   │  Transfer       │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every type serializes with camelCase field names, matching the JSON the
//! web client already speaks (`minStock`, `productId`, `cashierName`, ...).
//! Ids are database-assigned integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Bank transfer (common for larger warung orders).
    Transfer,
}

impl PaymentMethod {
    /// Stable lowercase name, as stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the wire value (`"cash" | "card" | "transfer"`).
impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            _ => Err(ValidationError::NotAllowed {
                field: "paymentMethod".to_string(),
                allowed: vec![
                    "cash".to_string(),
                    "card".to_string(),
                    "transfer".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product with on-hand stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Database-assigned identifier.
    pub id: i64,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Free-form category label ("Minuman", "Sembako", ...).
    pub category: String,

    /// Unit selling price.
    pub price: Money,

    /// Unit acquisition cost (updated by purchases).
    pub cost: Money,

    /// On-hand quantity. Never negative; the checkout path guards it.
    pub stock: i64,

    /// Low-stock threshold. `stock <= min_stock` flags the product.
    pub min_stock: i64,

    /// Supplier name (soft link to the supplier directory).
    pub supplier: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is at or below its restock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Whether `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed sale. Immutable after creation: there is no update or delete
/// path, only `POST /reset-data` which wipes the whole history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub cashier_id: String,
    pub cashier_name: String,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,

    /// Line items, loaded separately and attached by the repository.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<TransactionItem>,
}

/// A line item in a sale.
///
/// Price and cost are snapshots frozen at sale time, so reports stay correct
/// even after the catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub price: Money,
    /// Unit cost at time of sale (frozen, for profit reporting).
    pub cost: Money,
    /// `price × quantity`.
    pub line_total: Money,
    pub created_at: DateTime<Utc>,
}

impl TransactionItem {
    /// Profit contribution of this line: `quantity × (price − cost)`.
    #[inline]
    pub fn profit(&self) -> Money {
        self.price.margin(self.cost).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// An incoming-stock event from a supplier. Standalone record; creating one
/// increments the product's stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: i64,
    pub product_id: i64,
    /// Product name at time of purchase (frozen).
    pub product_name: String,
    pub quantity: i64,
    pub unit_cost: Money,
    /// `unit_cost × quantity`.
    pub total: Money,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier in the directory. Products and purchases reference suppliers
/// by name (soft link), so deleting a supplier never breaks history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A supplier row joined with usage aggregates, as shown on the suppliers
/// page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SupplierStats {
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    #[serde(flatten)]
    pub supplier: Supplier,
    /// Catalog products currently sourced from this supplier.
    pub product_count: i64,
    /// Recorded purchases from this supplier.
    pub purchase_count: i64,
    /// Total spent across those purchases.
    pub total_purchases: Money,
}

// =============================================================================
// Reporting Types
// =============================================================================

/// Aggregates behind `GET /dashboard`. Computed with pure read-only queries;
/// safe to poll repeatedly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    /// Count of products with `stock <= min_stock`.
    pub low_stock_products: i64,
    pub today_sales: Money,
    pub today_transaction_count: i64,
    /// Σ `total` over all transactions.
    pub total_sales: Money,
    /// Σ `total` over all purchases.
    pub total_purchases: Money,
    /// Σ over all sold items of `quantity × (price − cost)`.
    pub profit: Money,
    pub recent_transactions: Vec<RecentTransaction>,
}

/// A compact row for the dashboard's recent-sales list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: i64,
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "created_at"))]
    pub date: DateTime<Utc>,
}

/// One day in the `GET /chart` series. Days without activity are included
/// with zeroes so the client can plot a contiguous axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub sales: Money,
    pub purchases: Money,
    pub profit: Money,
    pub transactions: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
