//! # Money Module
//!
//! Provides the `Money` type for prices, totals and charges.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Court and rental prices are whole amounts (₹100, ₹30, ...).            │
//! │                                                                         │
//! │  Discounts truncate:                                                    │
//! │    ₹320 at 10%  → discount floor(32.0)  = ₹32 → total ₹288             │
//! │    ₹165 at 10%  → discount floor(16.5)  = ₹16 → total ₹149             │
//! │                                                                         │
//! │  Integer math keeps that truncation explicit and reproducible.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use courtside_core::money::Money;
//!
//! let court = Money::new(100);
//! let rackets = Money::new(30) * 2;
//! assert_eq!((court + rackets).amount(), 160);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: a negative charge must be representable so that it
///   can be rejected with a typed error instead of wrapping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole amount.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `floor(self * percent / 100)` for a non-negative amount.
    ///
    /// Uses i128 so large totals cannot overflow the intermediate product.
    /// Integer division truncates toward zero, which equals floor for the
    /// non-negative totals the pricing module feeds in.
    ///
    /// ## Example
    /// ```rust
    /// use courtside_core::money::Money;
    ///
    /// assert_eq!(Money::new(320).percent_of(10).amount(), 32);
    /// assert_eq!(Money::new(165).percent_of(10).amount(), 16);
    /// ```
    pub fn percent_of(&self, percent: i64) -> Money {
        let part = (self.0 as i128 * percent as i128) / 100;
        Money(part as i64)
    }

    /// Subtraction that clamps at zero.
    #[inline]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-₹{}", self.0.unsigned_abs())
        } else {
            write!(f, "₹{}", self.0)
        }
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a count (e.g. two rackets).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
