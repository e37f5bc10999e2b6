//! # Booking Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (courtside-core)                          │
//! │       │  carried unchanged via #[from]                                  │
//! │       ▼                                                                 │
//! │  BookingError (this module) ← adds inventory and payment failures      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (CLI prints `code` + message)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The orchestrator never downgrades or wraps an error a second time: what a
//! step returns is what the caller sees.

use serde::Serialize;
use thiserror::Error;

use courtside_core::{CoreError, CourtKind, Money};

/// Everything that can stop a booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Validation, pricing or payment-amount failure from courtside-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No units of the requested court kind remain.
    #[error("No {court} courts available")]
    InventoryExhausted { court: CourtKind },

    /// The charge went through but the court could not be reserved.
    ///
    /// ## When This Occurs
    /// Another booking took the last unit between the availability check and
    /// the reservation. The customer has paid for nothing, so the caller must
    /// run a refund or compensation path using `payment_reference`.
    #[error(
        "Charged {amount_charged} ({payment_reference}) but no {court} court could be reserved"
    )]
    PostPaymentReservationFailure {
        court: CourtKind,
        amount_charged: Money,
        payment_reference: String,
    },

    /// The details source could not supply a payment credential.
    #[error("Could not collect {field}: {reason}")]
    DetailsUnavailable { field: String, reason: String },
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidArgument,
    UnknownKind,
    InventoryExhausted,
    InvalidDiscount,
    InvalidAmount,
    UnknownPaymentMethod,
    PostPaymentReservationFailure,
    DetailsUnavailable,
}

impl BookingError {
    /// Stable code for this error, independent of the message text.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::Core(core) => match core {
                CoreError::UnknownKind { .. } => ErrorCode::UnknownKind,
                CoreError::InvalidArgument(_) => ErrorCode::InvalidArgument,
                CoreError::InvalidDiscount { .. } => ErrorCode::InvalidDiscount,
                CoreError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
                CoreError::UnknownPaymentMethod(_) => ErrorCode::UnknownPaymentMethod,
            },
            BookingError::InventoryExhausted { .. } => ErrorCode::InventoryExhausted,
            BookingError::PostPaymentReservationFailure { .. } => {
                ErrorCode::PostPaymentReservationFailure
            }
            BookingError::DetailsUnavailable { .. } => ErrorCode::DetailsUnavailable,
        }
    }

    /// True when money has moved and the booking still failed.
    pub fn requires_compensation(&self) -> bool {
        matches!(self, BookingError::PostPaymentReservationFailure { .. })
    }
}

/// Convenience type alias for Results with BookingError.
pub type BookingResult<T> = Result<T, BookingError>;
