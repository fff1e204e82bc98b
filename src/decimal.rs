//! Fixed-point currency type with 2 decimal places.
//!
//! Uses `rust_decimal` internally so that rounding of discounts, rents and
//! installments is exact and reproducible, independent of binary floating point.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A currency amount held at exactly 2 decimal places.
///
/// Every construction path rounds half-to-even to the cent, so two values that
/// display the same always compare equal.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use rent_budget::Money;
///
/// let rent = Money::from_str("1330").unwrap();
/// assert_eq!(rent.to_string(), "1330.00");
///
/// let third = Money::from_str("666.665").unwrap();
/// assert_eq!(third.to_string(), "666.66");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates a new `Money` from a `Decimal`, rounding to the cent.
    pub fn new(value: Decimal) -> Self {
        let mut rounded =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(Self::SCALE);
        Money(rounded)
    }

    /// Returns the underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Money::new(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money::new(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        assert_eq!(Money::from_str("1").unwrap().to_string(), "1.00");
        assert_eq!(Money::from_str("1.5").unwrap().to_string(), "1.50");
        assert_eq!(Money::from_str("  2.25  ").unwrap().to_string(), "2.25");
    }

    #[test]
    fn test_rounds_half_to_even() {
        assert_eq!(Money::from_str("0.125").unwrap().to_string(), "0.12");
        assert_eq!(Money::from_str("0.135").unwrap().to_string(), "0.14");
        assert_eq!(Money::from_str("666.6666").unwrap().to_string(), "666.67");
    }

    #[test]
    fn test_whole_amounts_gain_cents() {
        assert_eq!(Money::new(Decimal::from(1200)).to_string(), "1200.00");
        assert_eq!(Money::new(Decimal::ZERO), Money::ZERO);
    }

    #[test]
    fn test_addition_and_sum() {
        let a = Money::from_str("666.67").unwrap();
        let total: Money = [a, a, a].iter().sum();
        assert_eq!(total.to_string(), "2000.01");

        let mut acc = Money::ZERO;
        acc += Money::from_str("700").unwrap();
        assert_eq!(acc.to_string(), "700.00");
    }

    #[test]
    fn test_zero_constant() {
        assert!(Money::ZERO.is_zero());
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }
}
