//! # Validation Module
//!
//! Business rule checks shared by the entity constructors and the catalog.
//!
//! ## What Is (and Isn't) Validated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule                       Failure mode                                │
//! │  ─────────────────────────  ──────────────────────────────────────────  │
//! │  book price > 0             CoreError::InvalidPrice (hard error)        │
//! │  deposit amount > 0         CoreError::InvalidAmount (hard error)       │
//! │  rating is finite           CoreError::InvalidRating (hard error)       │
//! │  0 < discount % <= 100      silently ignored (no error, no change)      │
//! │  titles / names / genres    not validated here (presentation concern)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Basis points in 100%.
pub const FULL_DISCOUNT_BPS: u32 = 10_000;

/// Validates a book price.
///
/// ## Example
/// ```rust
/// use bookstore_core::money::Money;
/// use bookstore_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// ```
pub fn validate_price(price: Money) -> CoreResult<()> {
    if price.is_positive() {
        Ok(())
    } else {
        Err(CoreError::InvalidPrice(price))
    }
}

/// Validates a balance top-up amount.
pub fn validate_deposit(amount: Money) -> CoreResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(CoreError::InvalidAmount(amount))
    }
}

/// Validates a book rating. Any finite value is accepted.
pub fn validate_rating(rating: f64) -> CoreResult<()> {
    if rating.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidRating(rating))
    }
}

/// Returns true if `pct` is a usable discount percentage: `0 < pct <= 100`.
///
/// NaN is never valid.
pub fn is_valid_discount(pct: f64) -> bool {
    pct > 0.0 && pct <= 100.0
}

/// Converts a discount percentage to basis points, or `None` when out of range.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::discount_to_bps;
///
/// assert_eq!(discount_to_bps(20.0), Some(2000));
/// assert_eq!(discount_to_bps(8.25), Some(825));
/// assert_eq!(discount_to_bps(0.0), None);
/// assert_eq!(discount_to_bps(150.0), None);
/// ```
pub fn discount_to_bps(pct: f64) -> Option<u32> {
    if !is_valid_discount(pct) {
        return None;
    }
    let bps = (pct * 100.0).round() as u32;
    Some(bps.min(FULL_DISCOUNT_BPS))
}

// =============================================================================
// Unit Tests
// =============================================================================
