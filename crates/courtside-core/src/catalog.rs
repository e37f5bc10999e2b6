//! # Catalog
//!
//! The fixed price table for courts and rental items.
//!
//! | Kind      | Price |
//! |-----------|-------|
//! | Grass     | 100   |
//! | Clay      | 200   |
//! | Hard      | 300   |
//! | Ballpack  | 20    |
//! | Racket    | 30    |
//! | Grips     | 40    |

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CourtKind, RentalItemKind};

/// Anything with a fixed catalog price.
pub trait Priced {
    fn price(&self) -> Money;
}

impl Priced for CourtKind {
    fn price(&self) -> Money {
        match self {
            CourtKind::Grass => Money::new(100),
            CourtKind::Clay => Money::new(200),
            CourtKind::Hard => Money::new(300),
        }
    }
}

impl Priced for RentalItemKind {
    fn price(&self) -> Money {
        match self {
            RentalItemKind::Ballpack => Money::new(20),
            RentalItemKind::Racket => Money::new(30),
            RentalItemKind::Grips => Money::new(40),
        }
    }
}

/// Returns the catalog price of a court or rental item kind.
#[inline]
pub fn price_of<K: Priced>(kind: K) -> Money {
    kind.price()
}

/// Looks up a price by raw tag, trying court kinds first, then rental items.
///
/// ## Errors
/// `UnknownKind` when the tag names neither.
pub fn price_of_named(tag: &str) -> CoreResult<Money> {
    if let Ok(court) = tag.parse::<CourtKind>() {
        return Ok(court.price());
    }
    if let Ok(item) = tag.parse::<RentalItemKind>() {
        return Ok(item.price());
    }
    Err(CoreError::UnknownKind {
        category: "catalog",
        value: tag.to_string(),
    })
}
