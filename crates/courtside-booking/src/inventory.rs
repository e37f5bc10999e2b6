//! # Court Inventory
//!
//! Availability counters per court kind.
//!
//! ## Check-then-Act
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Booking A                         Booking B                            │
//! │  is_available(Hard) → true         is_available(Hard) → true            │
//! │  ... payment ...                   ... payment ...                      │
//! │  reserve(Hard) ──┐                                                      │
//! │                  │ lock Hard slot                                       │
//! │                  │ remaining 1 → 0   ✅                                  │
//! │                  └ unlock                                               │
//! │                                    reserve(Hard) ──┐                    │
//! │                                                    │ lock Hard slot     │
//! │                                                    │ remaining 0 → ❌   │
//! │                                                    └ InventoryExhausted │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `is_available` is advisory. `reserve` is the only mutator and performs its
//! own check under the same lock as the decrement, so a court kind that
//! starts at `n` can never be reserved more than `n` times.
//!
//! ## Thread Safety
//! One `Mutex<u32>` per court kind. Bookings for different surfaces never
//! contend. Share the inventory with `Arc<CourtInventory>`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use courtside_core::CourtKind;

use crate::config::InventorySettings;
use crate::error::{BookingError, BookingResult};

/// Process-wide court availability.
#[derive(Debug)]
pub struct CourtInventory {
    slots: [Mutex<u32>; 3],
}

impl CourtInventory {
    /// Creates an inventory with explicit counts.
    pub fn new(grass: u32, clay: u32, hard: u32) -> Self {
        CourtInventory {
            slots: [Mutex::new(grass), Mutex::new(clay), Mutex::new(hard)],
        }
    }

    /// Creates an inventory from configured counts.
    pub fn from_settings(settings: &InventorySettings) -> Self {
        Self::new(settings.grass, settings.clay, settings.hard)
    }

    /// The counter itself is a plain integer, so a panic while holding the
    /// lock cannot leave it half-written. Recover instead of propagating.
    fn slot(&self, court: CourtKind) -> MutexGuard<'_, u32> {
        self.slots[court.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// True iff at least one unit of `court` remains.
    pub fn is_available(&self, court: CourtKind) -> bool {
        *self.slot(court) > 0
    }

    /// Availability by raw tag.
    ///
    /// ## Errors
    /// `UnknownKind` for a tag that is not a court kind. There is no default.
    pub fn is_available_named(&self, tag: &str) -> BookingResult<bool> {
        let court: CourtKind = tag.parse()?;
        Ok(self.is_available(court))
    }

    /// Units of `court` left.
    pub fn remaining(&self, court: CourtKind) -> u32 {
        *self.slot(court)
    }

    /// Takes one unit of `court`, returning how many are left afterwards.
    ///
    /// ## Errors
    /// `InventoryExhausted` when nothing is left. Callers are expected to
    /// have checked [`is_available`](Self::is_available) first; the check
    /// here is what actually guards the counter.
    pub fn reserve(&self, court: CourtKind) -> BookingResult<u32> {
        let mut remaining = self.slot(court);
        if *remaining == 0 {
            warn!(%court, "Reservation refused, inventory exhausted");
            return Err(BookingError::InventoryExhausted { court });
        }
        *remaining -= 1;
        debug!(%court, remaining = *remaining, "Court reserved");
        Ok(*remaining)
    }

    /// Point-in-time counts for every court kind.
    ///
    /// Each slot is read under its own lock; the map is not a consistent cut
    /// across kinds while bookings are in flight.
    pub fn snapshot(&self) -> BTreeMap<CourtKind, u32> {
        CourtKind::ALL
            .into_iter()
            .map(|court| (court, self.remaining(court)))
            .collect()
    }
}

impl Default for CourtInventory {
    /// Grass 10, Clay 5, Hard 8.
    fn default() -> Self {
        Self::from_settings(&InventorySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_default_counts() {
        let inventory = CourtInventory::default();
        assert_eq!(inventory.remaining(CourtKind::Grass), 10);
        assert_eq!(inventory.remaining(CourtKind::Clay), 5);
        assert_eq!(inventory.remaining(CourtKind::Hard), 8);
    }

    #[test]
    fn test_clay_exhausts_after_five() {
        let inventory = CourtInventory::default();
        for expected_left in (0..5).rev() {
            assert_eq!(inventory.reserve(CourtKind::Clay).unwrap(), expected_left);
        }

        assert_eq!(
            inventory.reserve(CourtKind::Clay).unwrap_err(),
            BookingError::InventoryExhausted {
                court: CourtKind::Clay
            }
        );
        assert!(!inventory.is_available(CourtKind::Clay));
        assert_eq!(inventory.remaining(CourtKind::Clay), 0);
        // Other surfaces untouched.
        assert_eq!(inventory.remaining(CourtKind::Grass), 10);
    }

    #[test]
    fn test_is_available_named() {
        let inventory = CourtInventory::new(0, 1, 0);
        assert!(!inventory.is_available_named("Grass").unwrap());
        assert!(inventory.is_available_named("Clay").unwrap());
        assert!(matches!(
            inventory.is_available_named("Sand"),
            Err(BookingError::Core(courtside_core::CoreError::UnknownKind { .. }))
        ));
    }

    #[test]
    fn test_concurrent_reservations_never_oversell() {
        let inventory = Arc::new(CourtInventory::new(0, 0, 3));

        let successes: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let inventory = Arc::clone(&inventory);
                    scope.spawn(move || inventory.reserve(CourtKind::Hard).is_ok())
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|ok| *ok)
                .count()
        });

        assert_eq!(successes, 3);
        assert_eq!(inventory.remaining(CourtKind::Hard), 0);
    }

    #[test]
    fn test_snapshot() {
        let inventory = CourtInventory::new(1, 2, 3);
        inventory.reserve(CourtKind::Grass).unwrap();
        let snapshot = inventory.snapshot();
        assert_eq!(snapshot[&CourtKind::Grass], 0);
        assert_eq!(snapshot[&CourtKind::Clay], 2);
        assert_eq!(snapshot[&CourtKind::Hard], 3);
    }
}
