//! # courtside-core: Pure Business Logic for Courtside
//!
//! This crate holds everything about a court booking that can be decided
//! without touching shared state: what the kinds are, what they cost, how a
//! discount is applied and which inputs are acceptable.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Courtside Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  courtside-cli (console)                        │   │
//! │  │        book, demo, inventory  ──► prompts for details          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        courtside-booking (inventory, payment, orchestrator)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ courtside-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  pricing  │  │ validation│  │   │
//! │  │   │ CourtKind │  │ price_of  │  │ Discount  │  │   rules   │  │   │
//! │  │   │  Booking  │  │  Priced   │  │ Breakdown │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Court, rental item and payment method kinds, `Booking`
//! - [`money`] - Integer money type
//! - [`catalog`] - Fixed price table
//! - [`pricing`] - Totals and discount policies
//! - [`validation`] - Boundary checks on raw input
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use courtside_core::{Booking, CourtKind, DiscountPolicy, RentalItemKind};
//!
//! let booking = Booking::new(CourtKind::Grass, vec![RentalItemKind::Racket; 2])
//!     .with_discount(DiscountPolicy::percentage(10).unwrap());
//!
//! let price = booking.price().unwrap();
//! assert_eq!(price.subtotal.amount(), 160);
//! assert_eq!(price.total.amount(), 144);
//! ```

pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

pub use catalog::{price_of, price_of_named, Priced};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_total, DiscountPolicy, PriceBreakdown};
pub use types::*;

/// Discount applied by the default orchestration (10%).
pub const DEFAULT_DISCOUNT_PERCENT: i64 = 10;
