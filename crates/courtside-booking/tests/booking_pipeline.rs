//! End-to-end booking scenarios against a shared inventory.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use courtside_booking::{
    BookingError, BookingManager, BookingStage, BookingStep, BookingResult, CourtInventory,
    DefaultProcessors, DetailField, DetailsSource, ErrorCode, PaymentProcessor, PaymentReceipt,
    ProcessorFactory, StaticDetails, StepHook, StepOutcome,
};
use courtside_core::{CoreError, CourtKind, Money, PaymentMethod, ValidationError};

// =============================================================================
// Test doubles
// =============================================================================

#[derive(Default)]
struct RecordingHook {
    steps: Mutex<Vec<(BookingStep, StepOutcome)>>,
    stages: Mutex<Vec<BookingStage>>,
}

impl RecordingHook {
    fn steps(&self) -> Vec<BookingStep> {
        self.steps.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }

    fn stages(&self) -> Vec<BookingStage> {
        self.stages.lock().unwrap().clone()
    }
}

impl StepHook for RecordingHook {
    fn after(&self, step: BookingStep, _elapsed: Duration, outcome: StepOutcome) {
        self.steps.lock().unwrap().push((step, outcome));
    }

    fn transition(&self, _from: BookingStage, to: BookingStage) {
        self.stages.lock().unwrap().push(to);
    }
}

/// A gateway that rejects every amount it is asked to charge.
struct Declining;

struct DecliningProcessor(PaymentMethod);

impl PaymentProcessor for DecliningProcessor {
    fn method(&self) -> PaymentMethod {
        self.0
    }

    fn collect_details(&mut self, _source: &mut dyn DetailsSource) -> BookingResult<()> {
        Ok(())
    }

    fn charge(&self, amount: Money) -> BookingResult<PaymentReceipt> {
        Err(CoreError::InvalidAmount {
            amount: amount.amount(),
        }
        .into())
    }
}

impl ProcessorFactory for Declining {
    fn processor(&self, method: PaymentMethod) -> Box<dyn PaymentProcessor> {
        Box::new(DecliningProcessor(method))
    }
}

/// Takes the last court of `court` while the customer is typing their UPI id,
/// like a second terminal finishing first.
struct RacingDetails {
    inventory: Arc<CourtInventory>,
    court: CourtKind,
}

impl DetailsSource for RacingDetails {
    fn request(&mut self, _field: DetailField) -> BookingResult<String> {
        self.inventory.reserve(self.court)?;
        Ok("late@okbank".to_string())
    }
}

fn upi() -> StaticDetails {
    StaticDetails::new().with(DetailField::UpiId, "asha@okbank")
}

fn card() -> StaticDetails {
    StaticDetails::new()
        .with(DetailField::CardNumber, "4111 1111 1111 4242")
        .with(DetailField::Expiry, "08/28")
        .with(DetailField::HolderName, "Asha Rao")
        .with(DetailField::Cvv, "321")
}

fn recorded(inventory: Arc<CourtInventory>) -> (BookingManager, Arc<RecordingHook>) {
    let hook = Arc::new(RecordingHook::default());
    let manager = BookingManager::new(inventory).with_hook(hook.clone());
    (manager, hook)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_reference_bookings() {
    let manager = BookingManager::default();

    let grass = manager
        .book_court("Grass", &["Racket", "Racket"], "UPI", &mut upi())
        .unwrap();
    assert_eq!(grass.subtotal.amount(), 160);
    assert_eq!(grass.total_charged.amount(), 144);
    assert_eq!(grass.payment_method, PaymentMethod::Upi);

    let clay = manager
        .book_court("Clay", &["Ballpack", "Grips"], "Card", &mut card())
        .unwrap();
    assert_eq!(clay.subtotal.amount(), 260);
    assert_eq!(clay.total_charged.amount(), 234);
    assert_eq!(clay.payment_reference, "card ending 4242");

    assert_eq!(manager.inventory().remaining(CourtKind::Grass), 9);
    assert_eq!(manager.inventory().remaining(CourtKind::Clay), 4);
    assert_ne!(grass.booking_id, clay.booking_id);
}

#[test]
fn test_successful_booking_walks_every_stage() {
    let (manager, hook) = recorded(Arc::new(CourtInventory::default()));
    manager
        .book_court("Hard", &["Grips"], "UPI", &mut upi())
        .unwrap();

    assert_eq!(
        hook.stages(),
        vec![
            BookingStage::Validated,
            BookingStage::PricingComputed,
            BookingStage::Charged,
            BookingStage::Reserved,
            BookingStage::Completed,
        ]
    );
    assert_eq!(
        hook.steps(),
        vec![
            BookingStep::Validate,
            BookingStep::CheckInventory,
            BookingStep::Price,
            BookingStep::Charge,
            BookingStep::Reserve,
        ]
    );
}

#[test]
fn test_unknown_court_fails_before_any_side_effect() {
    let inventory = Arc::new(CourtInventory::default());
    let before = inventory.snapshot();
    let (manager, hook) = recorded(inventory.clone());
    let mut details = upi();

    let err = manager
        .book_court("Sand", &["Racket"], "UPI", &mut details)
        .unwrap_err();

    assert!(matches!(
        err,
        BookingError::Core(CoreError::InvalidArgument(ValidationError::NotAllowed { .. }))
    ));
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
    assert_eq!(hook.steps(), vec![BookingStep::Validate]);
    assert_eq!(hook.stages(), vec![BookingStage::Failed]);
    assert!(details.requested().is_empty());
    assert_eq!(inventory.snapshot(), before);
}

#[test]
fn test_unknown_item_or_method_fails_validation() {
    let (manager, hook) = recorded(Arc::new(CourtInventory::default()));

    let err = manager
        .book_court("Grass", &["Shoes"], "UPI", &mut upi())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);

    let err = manager
        .book_court("Grass", &["Racket"], "Cash", &mut upi())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);

    assert!(!hook.steps().contains(&BookingStep::Charge));
    assert_eq!(manager.inventory().remaining(CourtKind::Grass), 10);
}

#[test]
fn test_tags_must_match_exactly() {
    let inventory = Arc::new(CourtInventory::default());
    let before = inventory.snapshot();
    let (manager, hook) = recorded(inventory.clone());
    let mut details = upi();

    let err = manager
        .book_court(" grass ", &["racket"], "upi", &mut details)
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidArgument);
    assert_eq!(hook.steps(), vec![BookingStep::Validate]);
    assert!(details.requested().is_empty());
    assert_eq!(inventory.snapshot(), before);

    let err = manager
        .book_court("Grass", &["Racket"], "upi", &mut upi())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[test]
fn test_large_item_list_is_priced_in_full() {
    let manager = BookingManager::default();
    let items = vec!["Racket"; 21];

    let confirmation = manager
        .book_court("Grass", &items, "UPI", &mut upi())
        .unwrap();

    assert_eq!(confirmation.items.len(), 21);
    assert_eq!(confirmation.subtotal.amount(), 730);
    assert_eq!(confirmation.total_charged.amount(), 657);
}

#[test]
fn test_sixth_clay_booking_is_refused_before_payment() {
    let (manager, hook) = recorded(Arc::new(CourtInventory::default()));
    for _ in 0..5 {
        manager
            .book_court("Clay", &["Ballpack"], "UPI", &mut upi())
            .unwrap();
    }

    let mut details = upi();
    let err = manager
        .book_court("Clay", &["Ballpack"], "UPI", &mut details)
        .unwrap_err();

    assert_eq!(
        err,
        BookingError::InventoryExhausted {
            court: CourtKind::Clay
        }
    );
    assert!(details.requested().is_empty());
    assert!(!manager.inventory().is_available(CourtKind::Clay));
    assert_eq!(hook.stages().last(), Some(&BookingStage::Failed));
}

#[test]
fn test_declined_charge_leaves_inventory_untouched() {
    let inventory = Arc::new(CourtInventory::default());
    let manager = BookingManager::new(inventory.clone()).with_processors(Arc::new(Declining));

    let err = manager
        .book_court("Grass", &["Racket"], "Card", &mut card())
        .unwrap_err();

    assert_eq!(
        err,
        BookingError::Core(CoreError::InvalidAmount { amount: 117 })
    );
    assert!(!err.requires_compensation());
    assert_eq!(inventory.remaining(CourtKind::Grass), 10);
}

#[test]
fn test_missing_details_fail_the_charge_step() {
    let (manager, hook) = recorded(Arc::new(CourtInventory::default()));

    let err = manager
        .book_court("Grass", &["Racket"], "Card", &mut upi())
        .unwrap_err();

    assert!(matches!(err, BookingError::DetailsUnavailable { .. }));
    assert_eq!(
        hook.stages(),
        vec![
            BookingStage::Validated,
            BookingStage::PricingComputed,
            BookingStage::Failed
        ]
    );
    assert_eq!(manager.inventory().remaining(CourtKind::Grass), 10);
}

#[test]
fn test_losing_the_race_after_payment_is_reported_distinctly() {
    let inventory = Arc::new(CourtInventory::new(10, 5, 1));
    let manager = BookingManager::new(inventory.clone());
    let mut details = RacingDetails {
        inventory: inventory.clone(),
        court: CourtKind::Hard,
    };

    let none: [&str; 0] = [];
    let err = manager
        .book_court("Hard", &none, "UPI", &mut details)
        .unwrap_err();

    assert_eq!(
        err,
        BookingError::PostPaymentReservationFailure {
            court: CourtKind::Hard,
            amount_charged: Money::new(270),
            payment_reference: "UPI late@okbank".to_string(),
        }
    );
    assert!(err.requires_compensation());
    assert_eq!(inventory.remaining(CourtKind::Hard), 0);
}

#[test]
fn test_default_processors_are_used_by_default() {
    let processor = DefaultProcessors.processor(PaymentMethod::Card);
    assert_eq!(processor.method(), PaymentMethod::Card);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_court_reserved_exactly_once() {
    let inventory = Arc::new(CourtInventory::new(1, 0, 0));

    let attempts: Vec<_> = (0..2)
        .map(|_| {
            let inventory = inventory.clone();
            tokio::task::spawn_blocking(move || inventory.reserve(CourtKind::Grass))
        })
        .collect();

    let mut results = Vec::new();
    for attempt in attempts {
        results.push(attempt.await.unwrap());
    }

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(BookingError::InventoryExhausted {
            court: CourtKind::Grass
        })
    )));
    assert_eq!(inventory.remaining(CourtKind::Grass), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_never_oversell() {
    let manager = Arc::new(BookingManager::new(Arc::new(CourtInventory::new(0, 3, 0))));

    let bookings: Vec<_> = (0..12)
        .map(|i| {
            let manager = manager.clone();
            tokio::task::spawn_blocking(move || {
                let mut details =
                    StaticDetails::new().with(DetailField::UpiId, format!("player{i}@okbank"));
                manager.book_court("Clay", &["Racket"], "UPI", &mut details)
            })
        })
        .collect();

    let mut succeeded = 0;
    for booking in bookings {
        match booking.await.unwrap() {
            Ok(confirmation) => {
                assert_eq!(confirmation.total_charged.amount(), 207);
                succeeded += 1;
            }
            Err(err) => assert!(matches!(
                err.code(),
                ErrorCode::InventoryExhausted | ErrorCode::PostPaymentReservationFailure
            )),
        }
    }

    assert_eq!(succeeded, 3);
    assert_eq!(manager.inventory().remaining(CourtKind::Clay), 0);
}

#[test]
fn test_confirmation_serializes_camel_case() {
    let confirmation = BookingManager::default()
        .book_court("Grass", &["Racket", "Racket"], "UPI", &mut upi())
        .unwrap();

    let json = serde_json::to_value(&confirmation).unwrap();
    assert_eq!(json["totalCharged"], 144);
    assert_eq!(json["court"], "Grass");
    assert_eq!(json["paymentMethod"], "UPI");
    assert_eq!(json["items"], serde_json::json!(["Racket", "Racket"]));
}
