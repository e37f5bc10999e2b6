//! # courtside-booking: Booking Pipeline
//!
//! Everything with a side effect lives here: the shared court inventory,
//! payment processors, and the orchestrator that sequences them.
//!
//! ## Module Organization
//! ```text
//! courtside_booking/
//! ├── inventory.rs     ◄─── Per-kind court counters (check / reserve)
//! ├── payment.rs       ◄─── Card & UPI processors, DetailsSource
//! ├── orchestrator.rs  ◄─── BookingManager state machine
//! ├── observe.rs       ◄─── before/after hooks around each step
//! ├── config.rs        ◄─── BookingConfig (TOML + env)
//! └── error.rs         ◄─── BookingError, ErrorCode
//! ```
//!
//! ## Example
//! ```rust
//! use courtside_booking::{BookingManager, DetailField, StaticDetails};
//!
//! let manager = BookingManager::default();
//! let mut details = StaticDetails::new().with(DetailField::UpiId, "asha@okbank");
//!
//! let confirmation = manager
//!     .book_court("Grass", &["Racket", "Racket"], "UPI", &mut details)
//!     .unwrap();
//! assert_eq!(confirmation.total_charged.amount(), 144);
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod observe;
pub mod orchestrator;
pub mod payment;

pub use config::{BookingConfig, ConfigError, InventorySettings, PricingSettings};
pub use error::{BookingError, BookingResult, ErrorCode};
pub use inventory::CourtInventory;
pub use observe::{
    instrument, BookingStep, HookStack, NoopHook, StepHook, StepOutcome, TracingHook,
};
pub use orchestrator::{BookingConfirmation, BookingManager, BookingStage};
pub use payment::{
    select_processor, CardDetails, CardPayment, DefaultProcessors, DetailField, DetailsSource,
    PaymentProcessor, PaymentReceipt, ProcessorFactory, StaticDetails, UpiPayment,
};
