use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::str::FromStr;

/// Largest decimal exponent, in either direction, a literal may carry.
pub const MAX_EXPONENT: u32 = 4096;

/// Arbitrary precision number literal, kept as `mantissa * 10^-scale` with
/// trailing zeros stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NumericError {
    #[error("invalid number literal: {0}")]
    InvalidNumberLiteral(String),
    #[error("number {0} is not an integer")]
    NotInteger(String),
    #[error("number {0} is out of range")]
    OutOfRange(String),
}

impl Decimal {
    pub fn from_int(value: i128) -> Self {
        Self::normalize(BigInt::from(value), 0)
    }

    pub fn parse(input: &str) -> Result<Self, NumericError> {
        let parsed = BigDecimal::from_str(input)
            .map_err(|_| NumericError::InvalidNumberLiteral(input.to_string()))?;
        Self::from_bigdecimal(parsed).map_err(|_| NumericError::OutOfRange(input.to_string()))
    }

    /// Fails with `OutOfRange` when the scale or the power of ten exceeds
    /// [`MAX_EXPONENT`].
    pub fn from_bigdecimal(value: BigDecimal) -> Result<Self, NumericError> {
        let (mantissa, exponent) = value.normalized().into_bigint_and_exponent();
        let out_of_range = || NumericError::OutOfRange(format!("{mantissa}e{}", -exponent));
        let magnitude = u32::try_from(exponent.unsigned_abs())
            .ok()
            .filter(|magnitude| *magnitude <= MAX_EXPONENT)
            .ok_or_else(out_of_range)?;
        if exponent >= 0 {
            return Ok(Self::normalize(mantissa, magnitude));
        }
        Ok(Self::normalize(mantissa * pow10(magnitude), 0))
    }

    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.sign() == Sign::Minus
    }

    pub fn neg(&self) -> Self {
        Self {
            mantissa: -self.mantissa.clone(),
            scale: self.scale,
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        if self.scale == 0 {
            return self.mantissa.to_i64();
        }
        None
    }

    pub fn to_u64(&self) -> Option<u64> {
        if self.scale == 0 {
            return self.mantissa.to_u64();
        }
        None
    }

    /// Nearest finite `f64`, or `None` when the magnitude does not fit.
    pub fn to_f64(&self) -> Option<f64> {
        let parsed = self.to_string().parse::<f64>().ok()?;
        if !parsed.is_finite() || (parsed == 0.0 && !self.is_zero()) {
            return None;
        }
        Some(parsed)
    }

    pub fn to_i64_exact(&self) -> Result<i64, NumericError> {
        if !self.is_integer() {
            return Err(NumericError::NotInteger(self.to_string()));
        }
        self.to_i64()
            .ok_or_else(|| NumericError::OutOfRange(self.to_string()))
    }

    fn normalize(mantissa: BigInt, scale: u32) -> Self {
        if mantissa.is_zero() {
            return Self {
                mantissa: BigInt::zero(),
                scale: 0,
            };
        }
        let mut normalized_mantissa = mantissa;
        let mut normalized_scale = scale;
        while normalized_scale > 0 && (&normalized_mantissa % 10u8).is_zero() {
            normalized_mantissa /= 10u8;
            normalized_scale -= 1;
        }
        Self {
            mantissa: normalized_mantissa,
            scale: normalized_scale,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        let left = &self.mantissa * pow10(scale - self.scale);
        let right = &other.mantissa * pow10(scale - other.scale);
        left.cmp(&right)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_int(value as i128)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::from_int(value as i128)
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.mantissa.is_zero() {
            return write!(f, "0");
        }
        let sign = if self.is_negative() { "-" } else { "" };
        let abs_digits = self.mantissa.abs().to_string();
        if self.scale == 0 {
            return write!(f, "{sign}{abs_digits}");
        }
        let scale = self.scale as usize;
        if abs_digits.len() <= scale {
            let padding = "0".repeat(scale - abs_digits.len());
            write!(f, "{sign}0.{padding}{abs_digits}")
        } else {
            let split = abs_digits.len() - scale;
            write!(f, "{sign}{}.{}", &abs_digits[..split], &abs_digits[split..])
        }
    }
}

fn pow10(power: u32) -> BigInt {
    BigInt::from(10u8).pow(power)
}

#[cfg(test)]
#[path = "numeric_test.rs"]
mod tests;
