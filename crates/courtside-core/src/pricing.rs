//! # Pricing & Discounts
//!
//! ## Price Flow
//! ```text
//! court price ──┐
//! item prices ──┴─► compute_total ──► subtotal ──► DiscountPolicy::apply ──► total
//!                   (input order)                  (truncating percentage)
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Priced;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Booking, CourtKind, RentalItemKind};
use crate::validation::validate_discount_percent;

// =============================================================================
// Totals
// =============================================================================

/// Court price plus every rental item price, summed in input order.
pub fn compute_total(court: CourtKind, items: &[RentalItemKind]) -> Money {
    items
        .iter()
        .fold(court.price(), |total, item| total + item.price())
}

// =============================================================================
// Discount Policy
// =============================================================================

/// A pure mapping from a pre-discount total to the amount charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiscountPolicy {
    #[default]
    NoDiscount,
    /// Percentage off, 0 through 100 inclusive.
    Percentage(i64),
}

impl DiscountPolicy {
    /// Builds a percentage policy, rejecting values outside 0..=100.
    pub fn percentage(percent: i64) -> CoreResult<Self> {
        validate_discount_percent(percent)?;
        Ok(DiscountPolicy::Percentage(percent))
    }

    /// Amount taken off `total` by this policy.
    ///
    /// `floor(total * p / 100)`; the result of [`apply`](Self::apply) is
    /// `total` minus this.
    pub fn discount_for(&self, total: Money) -> CoreResult<Money> {
        match *self {
            DiscountPolicy::NoDiscount => Ok(Money::zero()),
            DiscountPolicy::Percentage(p) => {
                validate_discount_percent(p)?;
                Ok(total.percent_of(p))
            }
        }
    }

    /// Applies the policy to a total. Never returns a negative amount.
    ///
    /// ## Example
    /// ```rust
    /// use courtside_core::{DiscountPolicy, Money};
    ///
    /// let ten = DiscountPolicy::Percentage(10);
    /// assert_eq!(ten.apply(Money::new(320)).unwrap(), Money::new(288));
    ///
    /// let free = DiscountPolicy::Percentage(100);
    /// assert_eq!(free.apply(Money::new(320)).unwrap(), Money::zero());
    /// ```
    pub fn apply(&self, total: Money) -> CoreResult<Money> {
        let discount = self.discount_for(total)?;
        Ok(total.saturating_sub(discount))
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Subtotal, discount and final total for one booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

impl Booking {
    /// Prices the booking with its own discount policy.
    pub fn price(&self) -> CoreResult<PriceBreakdown> {
        let subtotal = compute_total(self.court, &self.items);
        let total = self.discount.apply(subtotal)?;
        Ok(PriceBreakdown {
            subtotal,
            discount: subtotal - total,
            total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
