//! # Booking Orchestrator
//!
//! Sequences validation, pricing, payment and reservation for one request.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Started ──► Validated ──► PricingComputed ──► Charged ──► Reserved     │
//! │     │            │               │                │           │         │
//! │     │      (inventory check)     │                │           ▼         │
//! │     │            │               │                │       Completed     │
//! │     ▼            ▼               ▼                ▼                     │
//! │  ┌──────────────────────────────────────────────────────┐              │
//! │  │                        Failed                        │              │
//! │  └──────────────────────────────────────────────────────┘              │
//! │                                                                         │
//! │  Side effects by the time each failure can happen:                      │
//! │    validate / inventory check / pricing ── none                         │
//! │    charge                              ── none (inventory untouched)    │
//! │    reserve                             ── customer already charged      │
//! │                                           → PostPaymentReservationFailure│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Charging comes before reserving so that a declined payment never holds a
//! court. The price of that order is the post-payment failure above, which is
//! reported with its own error variant for the caller to compensate.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, info_span};
use uuid::Uuid;

use courtside_core::validation::{
    validate_court_kind, validate_payment_method, validate_rental_items,
};
use courtside_core::{
    Booking, CourtKind, DiscountPolicy, Money, PaymentMethod, RentalItemKind,
    DEFAULT_DISCOUNT_PERCENT,
};

use crate::config::BookingConfig;
use crate::error::{BookingError, BookingResult};
use crate::inventory::CourtInventory;
use crate::observe::{instrument, BookingStep, StepHook, TracingHook};
use crate::payment::{DefaultProcessors, DetailsSource, ProcessorFactory};

// =============================================================================
// Stages
// =============================================================================

/// Where a booking is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStage {
    Started,
    Validated,
    PricingComputed,
    Charged,
    Reserved,
    Completed,
    Failed,
}

impl BookingStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStage::Completed | BookingStage::Failed)
    }
}

/// Tracks the stage of one booking and reports every change to the hook.
struct Flow<'a> {
    stage: BookingStage,
    hook: &'a dyn StepHook,
}

impl<'a> Flow<'a> {
    fn start(hook: &'a dyn StepHook) -> Self {
        Flow {
            stage: BookingStage::Started,
            hook,
        }
    }

    fn advance(&mut self, to: BookingStage) {
        self.hook.transition(self.stage, to);
        self.stage = to;
    }

    /// Logs `err`, moves to `Failed` and hands the error back unchanged.
    fn fail(&mut self, err: BookingError) -> BookingError {
        error!(stage = ?self.stage, code = ?err.code(), error = %err, "Booking failed");
        self.advance(BookingStage::Failed);
        err
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// Success record for a completed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: Uuid,
    pub court: CourtKind,
    pub items: Vec<RentalItemKind>,
    pub subtotal: Money,
    pub discount: Money,
    pub total_charged: Money,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    /// Courts of this kind left after the reservation.
    pub courts_remaining: u32,
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Booking Manager
// =============================================================================

/// Runs bookings against a shared inventory.
///
/// `Send + Sync`: wrap in `Arc` to book from several threads at once.
pub struct BookingManager {
    inventory: Arc<CourtInventory>,
    discount: DiscountPolicy,
    processors: Arc<dyn ProcessorFactory>,
    hook: Arc<dyn StepHook>,
}

impl BookingManager {
    /// Manager with the default 10% discount, simulated Card/UPI processors
    /// and tracing step logs.
    pub fn new(inventory: Arc<CourtInventory>) -> Self {
        BookingManager {
            inventory,
            discount: DiscountPolicy::Percentage(DEFAULT_DISCOUNT_PERCENT),
            processors: Arc::new(DefaultProcessors),
            hook: Arc::new(TracingHook),
        }
    }

    /// Manager with inventory counts and discount taken from config.
    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(Arc::new(CourtInventory::from_settings(&config.inventory)))
            .with_discount(config.discount_policy())
    }

    pub fn with_discount(mut self, discount: DiscountPolicy) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_processors(mut self, processors: Arc<dyn ProcessorFactory>) -> Self {
        self.processors = processors;
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn StepHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn inventory(&self) -> &Arc<CourtInventory> {
        &self.inventory
    }

    pub fn discount(&self) -> DiscountPolicy {
        self.discount
    }

    /// Books a court.
    ///
    /// ## Steps
    /// 1. Validate court, items and payment method
    /// 2. Check availability
    /// 3. Price with the configured discount
    /// 4. Collect payment details and charge
    /// 5. Reserve the court
    ///
    /// ## Errors
    /// Whatever the failing step returned, unchanged, except a reservation
    /// failure after a successful charge, which becomes
    /// `PostPaymentReservationFailure`.
    pub fn book_court<S: AsRef<str>>(
        &self,
        court: &str,
        items: &[S],
        payment_method: &str,
        details: &mut dyn DetailsSource,
    ) -> BookingResult<BookingConfirmation> {
        let span = info_span!("booking", court = %court, method = %payment_method);
        let _enter = span.enter();

        let hook = self.hook.as_ref();
        let mut flow = Flow::start(hook);
        info!(items = items.len(), "Booking started");

        let (court, items, method) = instrument(hook, BookingStep::Validate, || -> BookingResult<_> {
            let court = validate_court_kind(court)?;
            let items = validate_rental_items(items)?;
            let method = validate_payment_method(payment_method)?;
            Ok((court, items, method))
        })
        .map_err(|e| flow.fail(e))?;
        flow.advance(BookingStage::Validated);

        instrument(hook, BookingStep::CheckInventory, || {
            if self.inventory.is_available(court) {
                Ok(())
            } else {
                Err(BookingError::InventoryExhausted { court })
            }
        })
        .map_err(|e| flow.fail(e))?;

        let booking = Booking::new(court, items).with_discount(self.discount);
        let price = instrument(hook, BookingStep::Price, || {
            booking.price().map_err(BookingError::from)
        })
        .map_err(|e| flow.fail(e))?;
        flow.advance(BookingStage::PricingComputed);
        info!(subtotal = %price.subtotal, total = %price.total, "Price computed");

        let receipt = instrument(hook, BookingStep::Charge, || -> BookingResult<_> {
            let mut processor = self.processors.processor(method);
            processor.collect_details(details)?;
            processor.charge(price.total)
        })
        .map_err(|e| flow.fail(e))?;
        flow.advance(BookingStage::Charged);

        let courts_remaining = instrument(hook, BookingStep::Reserve, || {
            self.inventory.reserve(court)
        })
        .map_err(|e| {
            let err = match e {
                BookingError::InventoryExhausted { court } => {
                    BookingError::PostPaymentReservationFailure {
                        court,
                        amount_charged: receipt.amount,
                        payment_reference: receipt.reference.clone(),
                    }
                }
                other => other,
            };
            flow.fail(err)
        })?;
        flow.advance(BookingStage::Reserved);

        let confirmation = BookingConfirmation {
            booking_id: Uuid::new_v4(),
            court,
            items: booking.items,
            subtotal: price.subtotal,
            discount: price.discount,
            total_charged: receipt.amount,
            payment_method: receipt.method,
            payment_reference: receipt.reference,
            courts_remaining,
            completed_at: Utc::now(),
        };
        flow.advance(BookingStage::Completed);
        info!(
            booking_id = %confirmation.booking_id,
            total = %confirmation.total_charged,
            "Booking completed successfully"
        );

        Ok(confirmation)
    }
}

impl Default for BookingManager {
    fn default() -> Self {
        Self::new(Arc::new(CourtInventory::default()))
    }
}

impl fmt::Debug for BookingManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingManager")
            .field("inventory", &self.inventory)
            .field("discount", &self.discount)
            .finish_non_exhaustive()
    }
}
