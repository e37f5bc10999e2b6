//! # Validation Module
//!
//! Boundary checks for raw booking input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  └── Flag shape, required arguments                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Tags → closed enums (court, items, payment method)               │
//! │  └── Numeric ranges (discount, charge amount)                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: courtside-booking                                            │
//! │  └── Inventory re-checks availability inside reserve()                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is a pure predicate. Nothing stateful runs before
//! these checks pass.
//!
//! ## Usage
//! ```rust
//! use courtside_core::validation::{validate_court_kind, validate_payment_method};
//! use courtside_core::{CourtKind, PaymentMethod};
//!
//! assert_eq!(validate_court_kind("Clay").unwrap(), CourtKind::Clay);
//! assert_eq!(validate_payment_method("UPI").unwrap(), PaymentMethod::Upi);
//! assert!(validate_court_kind("Sand").is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CourtKind, PaymentMethod, RentalItemKind};

// =============================================================================
// Kind Validators
// =============================================================================

/// Validates a court tag and returns the parsed kind.
///
/// ## Errors
/// `InvalidArgument` listing the allowed court kinds.
pub fn validate_court_kind(tag: &str) -> CoreResult<CourtKind> {
    tag.parse()
        .map_err(|_| not_allowed("court", tag, CourtKind::ALL.iter().map(|k| k.as_str())))
}

/// Validates a payment method tag and returns the parsed method.
pub fn validate_payment_method(tag: &str) -> CoreResult<PaymentMethod> {
    tag.parse().map_err(|_| {
        not_allowed(
            "payment method",
            tag,
            PaymentMethod::ALL.iter().map(|m| m.as_str()),
        )
    })
}

/// Validates every rental item tag, preserving order. Any number of items
/// (including none) is accepted.
pub fn validate_rental_items<S: AsRef<str>>(tags: &[S]) -> CoreResult<Vec<RentalItemKind>> {
    tags.iter()
        .map(|tag| {
            let tag = tag.as_ref();
            tag.parse::<RentalItemKind>().map_err(|_| {
                not_allowed(
                    "rental item",
                    tag,
                    RentalItemKind::ALL.iter().map(|k| k.as_str()),
                )
            })
        })
        .collect()
}

fn not_allowed<'a>(field: &str, value: &str, allowed: impl Iterator<Item = &'a str>) -> CoreError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        value: value.to_string(),
        allowed: allowed.map(str::to_string).collect(),
    }
    .into()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a discount percentage (0 to 100 inclusive).
pub fn validate_discount_percent(percent: i64) -> CoreResult<()> {
    if !(0..=100).contains(&percent) {
        return Err(CoreError::InvalidDiscount { percent });
    }
    Ok(())
}

/// Validates a charge amount. Zero is allowed (fully discounted booking).
pub fn validate_charge_amount(amount: i64) -> CoreResult<()> {
    if amount < 0 {
        return Err(CoreError::InvalidAmount { amount });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a collected payment detail. Only presence is checked.
///
/// Returns the trimmed value.
pub fn validate_detail(field: &str, value: &str) -> CoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        }
        .into());
    }
    Ok(value.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
