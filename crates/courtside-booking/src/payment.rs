//! # Payment
//!
//! Payment processors for the supported methods.
//!
//! ## Charge Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "UPI" ──► select_processor ──► UpiPayment                              │
//! │   (unknown tag → UnknownPaymentMethod, nothing collected)              │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                     collect_details(&mut dyn DetailsSource)             │
//! │                       (console prompt, preset map, ...)                 │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                     charge(amount) ──► PaymentReceipt                   │
//! │                       (amount < 0 → InvalidAmount)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No real gateway is involved. A successful charge only produces a receipt
//! whose reference identifies the instrument (card last four or UPI id).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use courtside_core::validation::{validate_charge_amount, validate_detail};
use courtside_core::{CoreError, Money, PaymentMethod, ValidationError};

use crate::error::{BookingError, BookingResult};

// =============================================================================
// Detail Collection
// =============================================================================

/// A credential a processor may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailField {
    CardNumber,
    Expiry,
    HolderName,
    Cvv,
    UpiId,
}

impl DetailField {
    pub const ALL: [DetailField; 5] = [
        DetailField::CardNumber,
        DetailField::Expiry,
        DetailField::HolderName,
        DetailField::Cvv,
        DetailField::UpiId,
    ];

    /// Key used by `--detail key=value` and preset maps.
    pub const fn key(&self) -> &'static str {
        match self {
            DetailField::CardNumber => "card_number",
            DetailField::Expiry => "expiry",
            DetailField::HolderName => "holder_name",
            DetailField::Cvv => "cvv",
            DetailField::UpiId => "upi_id",
        }
    }

    /// Human prompt for interactive sources.
    pub const fn prompt(&self) -> &'static str {
        match self {
            DetailField::CardNumber => "Enter Card Number",
            DetailField::Expiry => "Enter Expiry Date (MM/YY)",
            DetailField::HolderName => "Enter Card Holder Name",
            DetailField::Cvv => "Enter CVV",
            DetailField::UpiId => "Enter UPI ID",
        }
    }
}

impl fmt::Display for DetailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for DetailField {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DetailField::ALL
            .into_iter()
            .find(|f| f.key() == s.trim())
            .ok_or_else(|| {
                CoreError::from(ValidationError::NotAllowed {
                    field: "detail".to_string(),
                    value: s.to_string(),
                    allowed: DetailField::ALL.iter().map(|f| f.key().to_string()).collect(),
                })
                .into()
            })
    }
}

/// Where payment credentials come from.
///
/// The library never reads the console itself; the application injects a
/// source (interactive prompt, preset values, a test double).
pub trait DetailsSource {
    /// Returns the raw value for `field`.
    fn request(&mut self, field: DetailField) -> BookingResult<String>;
}

/// A details source backed by preset values.
///
/// Records every field requested so callers can tell whether collection
/// happened at all.
#[derive(Debug, Clone, Default)]
pub struct StaticDetails {
    values: BTreeMap<DetailField, String>,
    requested: Vec<DetailField>,
}

impl StaticDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a value.
    pub fn with(mut self, field: DetailField, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Parses `key=value` pairs, e.g. `upi_id=alice@bank`.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> BookingResult<Self> {
        let mut details = StaticDetails::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                CoreError::from(ValidationError::Required {
                    field: format!("value for detail '{pair}'"),
                })
            })?;
            details.values.insert(key.parse()?, value.to_string());
        }
        Ok(details)
    }

    pub fn contains(&self, field: DetailField) -> bool {
        self.values.contains_key(&field)
    }

    /// Fields asked for so far, in order.
    pub fn requested(&self) -> &[DetailField] {
        &self.requested
    }
}

impl DetailsSource for StaticDetails {
    fn request(&mut self, field: DetailField) -> BookingResult<String> {
        self.requested.push(field);
        self.values
            .get(&field)
            .cloned()
            .ok_or_else(|| BookingError::DetailsUnavailable {
                field: field.key().to_string(),
                reason: "no value provided".to_string(),
            })
    }
}

fn collect(source: &mut dyn DetailsSource, field: DetailField) -> BookingResult<String> {
    let raw = source.request(field)?;
    Ok(validate_detail(field.key(), &raw)?)
}

// =============================================================================
// Processors
// =============================================================================

/// Proof of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub method: PaymentMethod,
    pub amount: Money,
    /// Identifies the instrument, never the full credential.
    pub reference: String,
}

/// A payment method's behavior.
pub trait PaymentProcessor: Send {
    fn method(&self) -> PaymentMethod;

    /// Gathers the credentials this method needs.
    fn collect_details(&mut self, source: &mut dyn DetailsSource) -> BookingResult<()>;

    /// Charges `amount`.
    ///
    /// ## Errors
    /// - `InvalidAmount` for a negative amount
    /// - `InvalidArgument` when details were never collected
    fn charge(&self, amount: Money) -> BookingResult<PaymentReceipt>;
}

/// Card credentials. Format is not checked beyond presence.
#[derive(Clone)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub holder_name: String,
    pub cvv: String,
}

impl CardDetails {
    /// Last four characters of the card number (or all of it if shorter).
    pub fn last_four(&self) -> &str {
        let start = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(i, _)| i);
        &self.number[start..]
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("expiry", &self.expiry)
            .field("holder_name", &self.holder_name)
            .field("cvv", &"***")
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct CardPayment {
    details: Option<CardDetails>,
}

impl CardPayment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn details(&self) -> Option<&CardDetails> {
        self.details.as_ref()
    }
}

impl PaymentProcessor for CardPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Card
    }

    fn collect_details(&mut self, source: &mut dyn DetailsSource) -> BookingResult<()> {
        let details = CardDetails {
            number: collect(source, DetailField::CardNumber)?,
            expiry: collect(source, DetailField::Expiry)?,
            holder_name: collect(source, DetailField::HolderName)?,
            cvv: collect(source, DetailField::Cvv)?,
        };
        self.details = Some(details);
        Ok(())
    }

    fn charge(&self, amount: Money) -> BookingResult<PaymentReceipt> {
        validate_charge_amount(amount.amount())?;
        let details = self.details.as_ref().ok_or_else(|| {
            CoreError::from(ValidationError::Required {
                field: "card details".to_string(),
            })
        })?;

        let reference = format!("card ending {}", details.last_four());
        info!(%amount, %reference, "Card payment successful");

        Ok(PaymentReceipt {
            method: PaymentMethod::Card,
            amount,
            reference,
        })
    }
}

#[derive(Debug, Default)]
pub struct UpiPayment {
    upi_id: Option<String>,
}

impl UpiPayment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upi_id(&self) -> Option<&str> {
        self.upi_id.as_deref()
    }
}

impl PaymentProcessor for UpiPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Upi
    }

    fn collect_details(&mut self, source: &mut dyn DetailsSource) -> BookingResult<()> {
        self.upi_id = Some(collect(source, DetailField::UpiId)?);
        Ok(())
    }

    fn charge(&self, amount: Money) -> BookingResult<PaymentReceipt> {
        validate_charge_amount(amount.amount())?;
        let upi_id = self.upi_id.as_deref().ok_or_else(|| {
            CoreError::from(ValidationError::Required {
                field: DetailField::UpiId.key().to_string(),
            })
        })?;

        let reference = format!("UPI {upi_id}");
        info!(%amount, %reference, "UPI payment successful");

        Ok(PaymentReceipt {
            method: PaymentMethod::Upi,
            amount,
            reference,
        })
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Builds a fresh processor for a payment method.
///
/// The orchestrator holds one of these so tests and alternative front ends
/// can swap in their own processors.
pub trait ProcessorFactory: Send + Sync {
    fn processor(&self, method: PaymentMethod) -> Box<dyn PaymentProcessor>;
}

/// Card and UPI processors with simulated success.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProcessors;

impl ProcessorFactory for DefaultProcessors {
    fn processor(&self, method: PaymentMethod) -> Box<dyn PaymentProcessor> {
        match method {
            PaymentMethod::Card => Box::new(CardPayment::new()),
            PaymentMethod::Upi => Box::new(UpiPayment::new()),
        }
    }
}

/// Resolves a raw tag to a processor.
///
/// ## Errors
/// `UnknownPaymentMethod` for an unrecognized tag, before anything is
/// collected.
pub fn select_processor(tag: &str) -> BookingResult<Box<dyn PaymentProcessor>> {
    let method: PaymentMethod = tag.parse()?;
    Ok(DefaultProcessors.processor(method))
}

// =============================================================================
// Unit Tests
// =============================================================================
