use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// A monetary value in dollars.
///
/// Wraps `rust_decimal::Decimal` so that sums of line items are exact and
/// rounding only happens where the payroll rules ask for it. Arithmetic
/// saturates at `Decimal::MAX` / `Decimal::MIN` instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new `Money` from a `Decimal` amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the underlying `Decimal`.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to whole cents, midpoints away from zero.
    pub fn round_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// True below zero. Negative zero does not count.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Shortest decimal form: `61000`, `49900.5`, `-18000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;
    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(10.0));
        let b = Money::new(dec!(2.5));
        assert_eq!(a + b, Money::new(dec!(12.5)));
        assert_eq!(b - a, Money::new(dec!(-7.5)));
        assert_eq!(a * dec!(0.1), Money::new(dec!(1)));
        assert_eq!([a, b, b].iter().sum::<Money>(), Money::new(dec!(15)));
    }

    #[test]
    fn test_round_cents_midpoint_away_from_zero() {
        assert_eq!(Money::new(dec!(1.005)).round_cents(), Money::new(dec!(1.01)));
        assert_eq!(Money::new(dec!(-1.005)).round_cents(), Money::new(dec!(-1.01)));
        assert_eq!(Money::new(dec!(2.344)).round_cents(), Money::new(dec!(2.34)));
        assert_eq!(Money::new(dec!(7)).round_cents(), Money::new(dec!(7)));
    }

    #[test]
    fn test_display_uses_shortest_form() {
        assert_eq!(Money::new(dec!(61000.00)).to_string(), "61000");
        assert_eq!(Money::new(dec!(49900.50)).to_string(), "49900.5");
        assert_eq!(Money::new(dec!(-18000)).to_string(), "-18000");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max + max, max);
        assert_eq!(Money::new(Decimal::MIN) - max, Money::new(Decimal::MIN));
        assert_eq!(max * dec!(2), max);
        assert_eq!(max * dec!(-2), Money::new(Decimal::MIN));
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::new(dec!(-0.01)).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::new(dec!(3)).is_negative());
    }
}
