//! Precision-carrying decimal arithmetic.
//!
//! Uses `rust_decimal` for exact decimal arithmetic, avoiding
//! floating-point rounding errors critical in financial calculations.
//!
//! Every price and volume in the engine moves through [`Number`]: a
//! decimal value paired with its intrinsic precision (number of decimal
//! places). Venue precision limits are enforced with
//! [`Number::cap_precision`], which truncates and never rounds up, so a
//! derived offer volume is always at or below the computed value.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::{CoreError, Result};

/// A decimal value with an intrinsic precision.
///
/// Arithmetic results carry the smaller precision of the two operands.
/// Values are signed: the surplus ledger legitimately runs a deficit
/// after an over-hedge, so subtraction does not clamp or abort at zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Number {
    value: Decimal,
    precision: u32,
}

impl Number {
    /// Create from a decimal, rounding to the given precision.
    pub fn from_decimal(value: Decimal, precision: u32) -> Self {
        Self {
            value: round(value, precision),
            precision,
        }
    }

    /// Create from a binary float, rounding to the given precision.
    ///
    /// This is the only entry point for `f64` values; non-finite inputs
    /// collapse to zero.
    pub fn from_f64(value: f64, precision: u32) -> Self {
        let value = Decimal::from_f64(value).unwrap_or(Decimal::ZERO);
        Self::from_decimal(value, precision)
    }

    /// Parse a venue string at the given precision.
    pub fn parse(s: &str, precision: u32) -> Result<Self> {
        let value: Decimal = s.trim().parse().map_err(CoreError::DecimalParse)?;
        Ok(Self::from_decimal(value, precision))
    }

    /// Zero at the given precision.
    pub fn zero(precision: u32) -> Self {
        Self {
            value: Decimal::ZERO,
            precision,
        }
    }

    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Explicit conversion back to a binary float.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }

    /// Multiply by a raw float factor, keeping this number's precision.
    pub fn scale(&self, factor: f64) -> Self {
        let factor = Decimal::from_f64(factor).unwrap_or(Decimal::ZERO);
        Self::from_decimal(self.value * factor, self.precision)
    }

    /// Reciprocal at the same precision.
    ///
    /// # Panics
    /// Panics on zero; the engine never inverts a zero price.
    pub fn invert(&self) -> Self {
        Self::from_decimal(Decimal::ONE / self.value, self.precision)
    }

    /// Truncate to `precision` decimals (toward zero, never rounding up).
    ///
    /// Repeated application is idempotent.
    pub fn cap_precision(&self, precision: u32) -> Self {
        Self {
            value: self.value.trunc_with_scale(precision),
            precision,
        }
    }

    /// Approximate equality at the smaller of the two precisions.
    ///
    /// Both values are normalized to the common precision before the
    /// difference is compared against `epsilon`.
    pub fn equals_within_epsilon(&self, other: Number, epsilon: f64) -> bool {
        let precision = self.precision.min(other.precision);
        let a = round(self.value, precision);
        let b = round(other.value, precision);
        let eps = Decimal::from_f64(epsilon).unwrap_or(Decimal::ZERO);
        (a - b).abs() < eps
    }
}

fn round(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Equality and ordering compare values only; `2.50` equals `2.5`
/// regardless of the precisions they carry.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let precision = self.precision.min(rhs.precision);
        Self::from_decimal(self.value + rhs.value, precision)
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let precision = self.precision.min(rhs.precision);
        Self::from_decimal(self.value - rhs.value, precision)
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let precision = self.precision.min(rhs.precision);
        Self::from_decimal(self.value * rhs.value, precision)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.precision as usize, self.value)
    }
}
