//! # Money Module
//!
//! Book prices, customer balances and order totals are all [`Money`]: a
//! whole number of cents.
//!
//! ## Cents In Memory, Dollars On Disk
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  In memory          Money(95000)                                        │
//! │                     debit, refund and compare exactly                   │
//! │                                                                         │
//! │  Data files         "total_price": 950.0        (major_units adapter)   │
//! │                     <total_price>950</total_price>                      │
//! │                     read back as 95000 cents, rounded to the cent       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::money::Money;
//!
//! let price = Money::from_cents(50000); // $500.00
//! let total = price + Money::from_cents(45000); // $950.00
//! assert_eq!(total.cents(), 95000);
//! assert_eq!(total.to_major(), 950.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A signed amount of cents.
///
/// Balances are signed because a customer's balance may be set below zero
/// directly. The derived serde form is the plain integer; data files go
/// through [`major_units`] instead.
///
/// ```text
/// Book.price ──► Order.total_price (cached at creation)
///      │
///      └──────► recomputed total at processing ──► Customer.balance -= total
///
/// cancel_order ──► Customer.balance += Order.total_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an amount in dollars, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and amounts too large for `i64`
    /// cents.
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(19.99), Some(Money::from_cents(1999)));
    /// assert_eq!(Money::from_major(f64::NAN), None);
    /// ```
    pub fn from_major(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// The amount in dollars, as written to data files.
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Takes `discount_bps` basis points off (1000 = 10%, 10000 = 100%).
    ///
    /// The discount amount is rounded half-up to the cent before it is
    /// subtracted, so `price * (1 - pct/100)` lands on a whole cent.
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let price = Money::from_cents(50000);
    /// assert_eq!(price.apply_percentage_discount(2000).cents(), 40000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_cents(self.0 - discount_amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$D.CC`, with a leading minus for negative amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Order totals are sums of book prices.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Data File Representation
// =============================================================================

/// Serde adapter for money fields in data files.
///
/// Writes dollars as a float (`500.0`). Reads integers and floats, and
/// numeric text from formats that hand numbers over as strings, so `500`
/// and `500.0` both load as 50000 cents.
///
/// ```rust
/// use bookstore_core::money::{major_units, Money};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "major_units")]
///     price: Money,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"price": 19.99}"#).unwrap();
/// assert_eq!(line.price.cents(), 1999);
/// assert_eq!(serde_json::to_string(&line).unwrap(), r#"{"price":19.99}"#);
/// ```
pub mod major_units {
    use super::Money;
    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_major())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_f64(MajorUnitsVisitor)
    }

    struct MajorUnitsVisitor;

    impl<'de> Visitor<'de> for MajorUnitsVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a finite amount in dollars")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
            value
                .checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| E::invalid_value(Unexpected::Signed(value), &self))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
            i64::try_from(value)
                .ok()
                .and_then(|v| v.checked_mul(100))
                .map(Money::from_cents)
                .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
            Money::from_major(value)
                .ok_or_else(|| E::invalid_value(Unexpected::Float(value), &self))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
            let amount: f64 = value
                .trim()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))?;
            self.visit_f64(amount)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
