//! Fixed-point currency amounts stored as signed minor units

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::types::{ReconciliationError, ReconciliationResult};

/// Number of minor units in one major unit
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Signed monetary amount counted in minor units (cents)
///
/// Arithmetic is plain integer addition and subtraction, so sums never drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyValue(i64);

impl CurrencyValue {
    /// Zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create an amount from a raw minor-unit count
    pub const fn from_minor_units(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Raw minor-unit count
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Magnitude of this amount
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse `"<integer>"` or `"<integer>.<fraction>"` into minor units.
    ///
    /// The integer part is scaled by 100. The fraction is read as a plain integer
    /// and added as that many minor units **without being scaled to two digits**:
    /// `"7.5"` becomes 705 minor units (`7.05`), not 750. Feeds are expected to
    /// carry exactly two fraction digits.
    ///
    /// When the integer part is written with a leading `-` the fraction is
    /// subtracted instead. This includes `-0`: `"-0.50"` is -50 minor units, where
    /// a check on the parsed integer's sign would have produced +50. A fraction
    /// that is not an integer is ignored, as is everything after a second `.`.
    /// Amounts outside the `i64` minor-unit range fail with `InvalidAmount`.
    pub fn parse(text: &str) -> ReconciliationResult<Self> {
        let parts: Vec<&str> = text.split('.').collect();
        let integer_part = parts[0];

        let mut minor_units = integer_part
            .parse::<i64>()
            .ok()
            .and_then(|units| units.checked_mul(MINOR_UNITS_PER_MAJOR))
            .ok_or_else(|| ReconciliationError::InvalidAmount(text.to_string()))?;

        if parts.len() == 2 {
            if let Ok(fraction) = parts[1].parse::<i64>() {
                let adjusted = if integer_part.starts_with('-') {
                    minor_units.checked_sub(fraction)
                } else {
                    minor_units.checked_add(fraction)
                };
                minor_units =
                    adjusted.ok_or_else(|| ReconciliationError::InvalidAmount(text.to_string()))?;
            }
        }

        Ok(Self(minor_units))
    }

    /// Render as `<units>.<two-digit minor units>`
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CurrencyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_major = MINOR_UNITS_PER_MAJOR as u64;
        write!(
            f,
            "{}{}.{:02}",
            sign,
            magnitude / per_major,
            magnitude % per_major
        )
    }
}

impl FromStr for CurrencyValue {
    type Err = ReconciliationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for CurrencyValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for CurrencyValue {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for CurrencyValue {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for CurrencyValue {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for CurrencyValue {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for CurrencyValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a CurrencyValue> for CurrencyValue {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
