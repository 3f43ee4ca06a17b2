//! # Money Module
//!
//! Monetary values as whole minor units (cents, centavos, ...).
//!
//! Line subtotals and the quote subtotal are always exact integers. Only the
//! tax-inclusive display total is produced as a float, and it is derived from
//! the exact subtotal at the last step, never accumulated.
//!
//! ```text
//!   unit price (i64) × quantity (i64) ──► line subtotal (Money)
//!   Σ line subtotals                  ──► quote subtotal (Money)
//!   subtotal × 1.21                   ──► total with tax (f64, display only)
//! ```
//!
//! No currency is attached: the catalog stores one implicit currency.
//!
//! Arithmetic saturates at the `i64` bounds instead of overflowing, so a
//! quote built from stored rows can always be totalled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use quotedesk_core::money::Money;
    ///
    /// let price = Money::from_cents(3500);
    /// assert_eq!(price.cents(), 3500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64`
    /// bounds.
    ///
    /// ```rust
    /// use quotedesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(3500).multiply_quantity(2).cents(), 7000);
    /// assert_eq!(Money::from_cents(3500).multiply_quantity(i64::MAX).cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Calculates tax on this amount, rounding half up to the nearest
    /// minor unit.
    ///
    /// Computed as `(amount * bps + 5000) / 10000` in i128 so large amounts
    /// cannot overflow mid-calculation.
    ///
    /// ```rust
    /// use quotedesk_core::money::Money;
    /// use quotedesk_core::types::TaxRate;
    ///
    /// let tax = Money::from_cents(8000).calculate_tax(TaxRate::from_bps(2100));
    /// assert_eq!(tax.cents(), 1680);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Applies a tax rate as a floating-point multiplier.
    ///
    /// Display-only; callers that need an exact figure use
    /// [`Money::calculate_tax`].
    pub fn with_tax_f64(&self, rate: TaxRate) -> f64 {
        self.0 as f64 * rate.multiplier()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `major.minor`, e.g. `80.00`. No currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
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
    fn test_display() {
        assert_eq!(Money::from_cents(8000).to_string(), "80.00");
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX - 10);

        assert_eq!((big + Money::from_cents(100)).cents(), i64::MAX);
        assert_eq!(Money::from_cents(3500).multiply_quantity(10_000_000_000_000_000).cents(), i64::MAX);

        let mut c = big;
        c += big;
        assert_eq!(c.cents(), i64::MAX);
    }

    #[test]
    fn test_sum_saturates() {
        let total: Money = std::iter::repeat(Money::from_cents(i64::MAX / 2))
            .take(5)
            .sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [7000, 1000, 0]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 8000);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 1250 * 21% = 262.5 -> 263
        let tax = Money::from_cents(1250).calculate_tax(TaxRate::from_bps(2100));
        assert_eq!(tax.cents(), 263);
    }

    #[test]
    fn test_with_tax_f64() {
        let total = Money::from_cents(8000).with_tax_f64(TaxRate::from_bps(2100));
        assert!((total - 9680.0).abs() < 1e-6);
    }

    #[test]
    fn test_tax_on_large_amount_does_not_overflow() {
        let amount = Money::from_cents(i64::MAX / 2);
        let tax = amount.calculate_tax(TaxRate::from_bps(2100));
        assert!(tax.cents() > 0);

        let tax = Money::from_cents(i64::MAX).calculate_tax(TaxRate::from_bps(20_000));
        assert_eq!(tax.cents(), i64::MAX);
    }
}
