//! # Cart Module
//!
//! Pure cart math and validation for the checkout path.
//!
//! ## Where This Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Data Flow                                  │
//! │                                                                         │
//! │  POST /transactions { items, discount, cashier, paymentMethod }         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartTotals::compute(lines, tax, discount)  ← THIS MODULE               │
//! │       │                                                                 │
//! │       ├── empty cart?        → CoreError::EmptyCart                     │
//! │       ├── bad quantity?      → ValidationError                          │
//! │       ├── negative amounts?  → ValidationError                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  warung-db checkout (stock checks, inserts, guarded decrements)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT, or full rollback on any failure                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure: the database has not been touched yet, so a
//! rejected cart costs nothing.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One in-flight line of a sale being submitted.
///
/// The client sends the price it displayed; the cost stored on the
/// transaction item is re-read from the catalog inside the checkout
/// transaction, so a stale client cannot skew profit reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
    pub price: Money,
    /// Client's view of the unit cost. Informational only.
    #[serde(default)]
    pub cost: Money,
}

impl CartLine {
    /// `price × quantity` for this line.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Server-computed totals for a validated cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    /// `subtotal + tax − discount`, floored at zero.
    pub total: Money,
}

impl CartTotals {
    /// Validates a cart and computes its totals.
    ///
    /// ## Rules
    /// - At least one line, at most [`MAX_CART_LINES`]
    /// - Every quantity in `1..=`[`MAX_LINE_QUANTITY`]
    /// - Prices, tax, and discount must not be negative
    ///
    /// ## Example
    /// ```rust
    /// use warung_core::cart::{CartLine, CartTotals};
    /// use warung_core::Money;
    ///
    /// let lines = vec![CartLine {
    ///     product_id: 1,
    ///     quantity: 3,
    ///     price: Money::new(10_000),
    ///     cost: Money::new(6_000),
    /// }];
    /// let totals = CartTotals::compute(&lines, Money::zero(), Money::zero()).unwrap();
    /// assert_eq!(totals.subtotal, Money::new(30_000));
    /// assert_eq!(totals.total, Money::new(30_000));
    /// ```
    pub fn compute(lines: &[CartLine], tax: Money, discount: Money) -> CoreResult<Self> {
        if lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        if lines.len() > MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        if tax.is_negative() {
            return Err(ValidationError::MustBeNonNegative {
                field: "tax".to_string(),
            }
            .into());
        }

        if discount.is_negative() {
            return Err(ValidationError::MustBeNonNegative {
                field: "discount".to_string(),
            }
            .into());
        }

        let mut subtotal = Money::zero();
        for line in lines {
            if line.quantity <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                }
                .into());
            }
            if line.quantity > MAX_LINE_QUANTITY {
                return Err(ValidationError::NotAllowed {
                    field: "quantity".to_string(),
                    allowed: vec![format!("1..={}", MAX_LINE_QUANTITY)],
                }
                .into());
            }
            if line.price.is_negative() {
                return Err(ValidationError::MustBeNonNegative {
                    field: "price".to_string(),
                }
                .into());
            }
            // Quantities are capped above but prices come straight off the
            // wire, so the line math must be overflow-checked.
            let line_total = line
                .price
                .checked_multiply_quantity(line.quantity)
                .ok_or_else(|| ValidationError::Overflow {
                    field: "price".to_string(),
                })?;
            subtotal = subtotal
                .checked_add(line_total)
                .ok_or_else(|| ValidationError::Overflow {
                    field: "subtotal".to_string(),
                })?;
        }

        let total = subtotal
            .checked_add(tax)
            .ok_or_else(|| ValidationError::Overflow {
                field: "tax".to_string(),
            })?
            .apply_discount(discount);

        Ok(CartTotals {
            subtotal,
            tax,
            discount,
            total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
