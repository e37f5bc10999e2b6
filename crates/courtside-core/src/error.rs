//! # Error Types
//!
//! Domain-specific error types for courtside-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  courtside-core errors (this file)                                     │
//! │  ├── CoreError        - Kinds, discounts, amounts                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  courtside-booking errors (separate crate)                             │
//! │  └── BookingError     - Inventory and post-payment failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BookingError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending value in the message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A tag does not name any known court or rental item kind.
    #[error("Unknown {category} kind: '{value}'")]
    UnknownKind {
        category: &'static str,
        value: String,
    },

    /// Input rejected at the boundary (wraps ValidationError).
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Percentage discount outside 0..=100.
    #[error("Invalid discount: {percent}% is outside 0-100")]
    InvalidDiscount { percent: i64 },

    /// Charge requested for a negative amount.
    #[error("Invalid amount: {amount} (must not be negative)")]
    InvalidAmount { amount: i64 },

    /// Payment method tag did not match any processor.
    ///
    /// ## When This Occurs
    /// Selecting a processor by tag, before any detail collection.
    #[error("Unknown payment method: '{0}'")]
    UnknownPaymentMethod(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when raw user input doesn't meet requirements.
/// Used for early validation before any stateful operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not in allowed set.
    #[error("{field} '{value}' must be one of: {allowed:?}")]
    NotAllowed {
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
