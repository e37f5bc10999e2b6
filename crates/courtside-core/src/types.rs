//! # Domain Types
//!
//! Core domain types used throughout Courtside.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CourtKind     │   │ RentalItemKind  │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Grass  (100)   │   │  Ballpack (20)  │   │  Card           │       │
//! │  │  Clay   (200)   │   │  Racket   (30)  │   │  UPI            │       │
//! │  │  Hard   (300)   │   │  Grips    (40)  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │                Booking                  │                            │
//! │  │  court + items (ordered) + discount     │                            │
//! │  └─────────────────────────────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Parsing at the Boundary
//! Every kind is a closed enum. Raw strings are parsed into it exactly once
//! (`FromStr`), and an unrecognized tag fails right there. Tags match
//! exactly: `"Grass"` is a court, `"grass"` and `" Grass"` are not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::pricing::DiscountPolicy;

// =============================================================================
// Court Kind
// =============================================================================

/// The surface of a bookable court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CourtKind {
    Grass,
    Clay,
    Hard,
}

impl CourtKind {
    /// All court kinds in catalog order.
    pub const ALL: [CourtKind; 3] = [CourtKind::Grass, CourtKind::Clay, CourtKind::Hard];

    /// The tag used on the command line and in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CourtKind::Grass => "Grass",
            CourtKind::Clay => "Clay",
            CourtKind::Hard => "Hard",
        }
    }

    /// Position in [`CourtKind::ALL`], used to index per-kind tables.
    pub const fn index(&self) -> usize {
        match self {
            CourtKind::Grass => 0,
            CourtKind::Clay => 1,
            CourtKind::Hard => 2,
        }
    }
}

impl fmt::Display for CourtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourtKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CourtKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnknownKind {
                category: "court",
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Rental Item Kind
// =============================================================================

/// Equipment that can be rented alongside a court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RentalItemKind {
    Ballpack,
    Racket,
    Grips,
}

impl RentalItemKind {
    pub const ALL: [RentalItemKind; 3] = [
        RentalItemKind::Ballpack,
        RentalItemKind::Racket,
        RentalItemKind::Grips,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            RentalItemKind::Ballpack => "Ballpack",
            RentalItemKind::Racket => "Racket",
            RentalItemKind::Grips => "Grips",
        }
    }
}

impl fmt::Display for RentalItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalItemKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RentalItemKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnknownKind {
                category: "rental item",
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a booking is paid for.
///
/// This is only the tag. The credentials for each method are collected by
/// the payment processors in courtside-booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Card,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Card, PaymentMethod::Upi];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPaymentMethod(s.to_string()))
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A single booking request after parsing.
///
/// Owns its item list and discount policy. Lives only for the duration of
/// one orchestration and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub court: CourtKind,
    /// Rental items in the order they were requested.
    pub items: Vec<RentalItemKind>,
    pub discount: DiscountPolicy,
}

impl Booking {
    /// Creates a booking with no discount.
    pub fn new(court: CourtKind, items: Vec<RentalItemKind>) -> Self {
        Booking {
            court,
            items,
            discount: DiscountPolicy::NoDiscount,
        }
    }

    /// Replaces the discount policy.
    pub fn with_discount(mut self, discount: DiscountPolicy) -> Self {
        self.discount = discount;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_court_kind_parsing() {
        assert_eq!("Grass".parse::<CourtKind>().unwrap(), CourtKind::Grass);
        assert_eq!("Clay".parse::<CourtKind>().unwrap(), CourtKind::Clay);
        assert!("clay".parse::<CourtKind>().is_err());
        assert!(" Hard ".parse::<CourtKind>().is_err());

        let err = "Sand".parse::<CourtKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownKind { category: "court", .. }));
    }

    #[test]
    fn test_rental_item_parsing() {
        assert_eq!(
            "Racket".parse::<RentalItemKind>().unwrap(),
            RentalItemKind::Racket
        );
        assert!("Shoes".parse::<RentalItemKind>().is_err());
        assert!("racket".parse::<RentalItemKind>().is_err());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!("Card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert!("upi".parse::<PaymentMethod>().is_err());
        assert_eq!(
            "Cash".parse::<PaymentMethod>().unwrap_err(),
            CoreError::UnknownPaymentMethod("Cash".to_string())
        );
    }

    #[test]
    fn test_court_index_matches_all_order() {
        for (i, kind) in CourtKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_payment_method_serde_tag() {
        let json = serde_json::to_string(&PaymentMethod::Upi).unwrap();
        assert_eq!(json, r#""UPI""#);
    }

    #[test]
    fn test_booking_defaults_to_no_discount() {
        let booking = Booking::new(
            CourtKind::Clay,
            vec![RentalItemKind::Ballpack, RentalItemKind::Grips],
        );

        assert_eq!(booking.discount, DiscountPolicy::NoDiscount);
        assert_eq!(
            booking.items,
            vec![RentalItemKind::Ballpack, RentalItemKind::Grips]
        );
    }
}
