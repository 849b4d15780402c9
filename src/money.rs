//! Fixed-point money amounts.
//!
//! Wagers and gains are kept in hundredths of a currency unit so the ledger
//! never accumulates floating point error. JS sees plain numbers: `Money`
//! (de)serializes through `f64`. Amounts coming from JS are bounded by
//! [`MAX_AMOUNT`] so ledger sums stay far from `i64` limits.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::AmountError;

/// Hundredths per currency unit.
pub const MONEY_SCALE: i64 = 100;

/// Largest wager or gain accepted (one billion units).
pub const MAX_AMOUNT: Money = Money(1_000_000_000 * MONEY_SCALE);

/// A signed amount in hundredths (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Round a decimal amount to the nearest cent. Out-of-range input
    /// saturates; use `Money::try_from` for values coming from the view.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self((value * MONEY_SCALE as f64).round() as i64)
    }

    /// Within `[-MAX_AMOUNT, MAX_AMOUNT]`.
    pub fn is_bounded(self) -> bool {
        self.0.unsigned_abs() <= MAX_AMOUNT.0 as u64
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MONEY_SCALE as f64
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl TryFrom<f64> for Money {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite(value));
        }
        let amount = Self::from_f64(value);
        if !amount.is_bounded() {
            return Err(AmountError::OutOfRange(value));
        }
        Ok(amount)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.to_f64()
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Plain `12.50` rendering, used in logs and error messages.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = MONEY_SCALE as u64;
        write!(f, "{}{}.{:02}", sign, abs / scale, abs % scale)
    }
}
