//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Rounding Points
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CENT ROUNDING AT EVERY STEP                                            │
//! │                                                                         │
//! │  Floating point drifts when summed over many lines:                     │
//! │    3 × 33.33 = 99.99000000000001                                        │
//! │                                                                         │
//! │  Every computed amount goes through `Money::round2` immediately and is  │
//! │  stored as integer cents. Sums of cents are exact, so the accounting    │
//! │  engine reproduces the same cent at every rounding point:               │
//! │    round2(3 × 33.33)        = 99.99                                     │
//! │    round2(99.99 × 20 / 100) = 20.00   (not 19.998)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Documents arrive from a JavaScript layer where amounts are plain numbers,
//! so `Money` (de)serializes as a decimal amount (`240.5`), never as cents.
//!
//! ## Usage
//! ```rust
//! use ardoise_core::money::Money;
//!
//! let line = Money::round2(3.0 * 33.33);
//! assert_eq!(line.cents(), 9999);
//!
//! let tax = line.percent(20.0);
//! assert_eq!(tax.cents(), 2000);
//! assert_eq!(tax.to_string(), "20,00 €");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in euro cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: credit notes and over-sized discounts go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Amount on the wire**: `from = "f64"` rounds incoming amounts to the cent
/// - **Saturating arithmetic**: amounts beyond the i64 range stick at the bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a decimal amount to the cent (half-up) and wraps it.
    ///
    /// This is the single rounding primitive of the accounting engine.
    /// Non-finite input rounds to zero.
    ///
    /// ## Example
    /// ```rust
    /// use ardoise_core::money::Money;
    ///
    /// assert_eq!(Money::round2(19.998).cents(), 2000);
    /// assert_eq!(Money::round2(0.125).cents(), 13);
    /// assert_eq!(Money::round2(-0.125).cents(), -12);
    /// ```
    pub fn round2(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money(round_half_up(amount * 100.0))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal amount (for further computation).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `rate` percent of this amount, rounded to the cent.
    ///
    /// Used for tax (`rate` = VAT rate) and percent discounts.
    ///
    /// ## Example
    /// ```rust
    /// use ardoise_core::money::Money;
    ///
    /// let base = Money::from_cents(9000); // 90,00 €
    /// assert_eq!(base.percent(10.0).cents(), 900);
    /// assert_eq!(base.percent(5.5).cents(), 495);
    /// ```
    pub fn percent(&self, rate: f64) -> Money {
        Money::round2(self.amount() * rate / 100.0)
    }
}

/// Rounds half-up (toward +∞) to the nearest integer.
///
/// `f64::round` rounds half away from zero, which differs for negative
/// halves (-2.5 → -3); documents expect -2.5 → -2.
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        (floor as i64).saturating_add(1)
    } else {
        floor as i64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// fr-FR currency display: `1 234,56 €`.
///
/// The platform formatter emits narrow no-break spaces; renderers choke on
/// them, so plain spaces are used for both the grouping and the symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let euros = (self.0 / 100).unsigned_abs();
        write!(
            f,
            "{}{},{:02} €",
            sign,
            crate::format::group_thousands(euros),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<f64> for Money {
    fn from(amount: f64) -> Self {
        Money::round2(amount)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.amount()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_drift() {
        // 3 × 33.33 = 99.99000000000001 in f64
        assert_eq!(Money::round2(3.0 * 33.33).cents(), 9999);
        assert_eq!(Money::round2(0.1 + 0.2).cents(), 30);
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(Money::round2(0.125).cents(), 13);
        assert_eq!(Money::round2(-0.125).cents(), -12);
        assert_eq!(Money::round2(-2.5).cents(), -250);
        assert_eq!(Money::round2(f64::NAN).cents(), 0);
        assert_eq!(Money::round2(f64::INFINITY).cents(), 0);
    }

    #[test]
    fn test_percent() {
        let amount = Money::from_cents(9999);
        assert_eq!(amount.percent(20.0).cents(), 2000);
        assert_eq!(Money::from_cents(20000).percent(20.0).cents(), 4000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(123456).to_string(), "1 234,56 €");
        assert_eq!(Money::from_cents(500).to_string(), "5,00 €");
        assert_eq!(Money::from_cents(-550).to_string(), "-5,50 €");
        assert_eq!(Money::from_cents(-5).to_string(), "-0,05 €");
        assert_eq!(Money::from_cents(0).to_string(), "0,00 €");
        assert_eq!(Money::from_cents(123456789).to_string(), "1 234 567,89 €");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_serde_as_amount() {
        let money: Money = serde_json::from_str("240.5").unwrap();
        assert_eq!(money.cents(), 24050);
        assert_eq!(serde_json::to_string(&money).unwrap(), "240.5");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!((-negative).cents(), 100);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::round2(1e17 * 1000.0);
        assert_eq!(huge.cents(), i64::MAX);

        let mut total = huge + huge;
        assert_eq!(total.cents(), i64::MAX);
        total += huge;
        assert_eq!(total.cents(), i64::MAX);

        let floor = Money::from_cents(i64::MIN) - huge;
        assert_eq!(floor.cents(), i64::MIN);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);
    }
}
