//! Fixed-point rental price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rentshop_core::ValueObject;

/// Total significant digits a stored price may carry.
pub const MAX_DIGITS: u32 = 10;
/// Fractional digits of a stored price.
pub const DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("This field is required.")]
    Empty,

    #[error("Enter a number.")]
    NotANumber,

    #[error("Ensure this value is greater than or equal to 0.")]
    Negative,

    #[error("Ensure that there are no more than {} digits in total.", MAX_DIGITS)]
    TooManyDigits,

    #[error("Ensure that there are no more than {} decimal places.", DECIMAL_PLACES)]
    TooManyDecimalPlaces,

    #[error("Ensure that there are no more than {} digits before the decimal point.", MAX_DIGITS - DECIMAL_PLACES)]
    TooManyWholeDigits,
}

/// Non-negative amount with exactly two fractional digits, at most ten digits
/// in total.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl ValueObject for Price {}

impl Price {
    /// Validate a decimal amount against the storage precision.
    ///
    /// Trailing fractional zeros are not counted, so `12.500` is `12.50`.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative);
        }

        let normalized = amount.normalize();
        let scale = normalized.scale();
        let digits = count_digits(normalized.mantissa().unsigned_abs());
        check_precision(digits.saturating_sub(scale), scale)?;

        let mut fixed = normalized;
        fixed.rescale(DECIMAL_PLACES);
        Ok(Self(fixed))
    }

    /// Parse submitted text (`"15"`, `"15.5"`, `"15.50"`).
    ///
    /// Precision is checked on the text itself, so inputs longer than a
    /// `Decimal` can represent are rejected instead of rounded.
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let (negative, unsigned) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(PriceError::NotANumber);
        }

        let whole = whole.trim_start_matches('0');
        let frac = frac.trim_end_matches('0');
        if negative && !(whole.is_empty() && frac.is_empty()) {
            return Err(PriceError::Negative);
        }

        let whole_digits = whole.len() as u32;
        let decimal_places = frac.len() as u32;
        check_precision(whole_digits, decimal_places)?;

        // At most ten digits remain, which always fits an i64 mantissa.
        let mantissa: i64 = format!("0{whole}{frac}")
            .parse()
            .map_err(|_| PriceError::NotANumber)?;
        let mut amount = Decimal::new(mantissa, decimal_places);
        amount.rescale(DECIMAL_PLACES);
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Reject amounts that do not fit `MAX_DIGITS`/`DECIMAL_PLACES`.
///
/// Leading zeros of a purely fractional amount count as digits (`0.05` has two).
fn check_precision(whole_digits: u32, decimal_places: u32) -> Result<(), PriceError> {
    if whole_digits + decimal_places > MAX_DIGITS {
        return Err(PriceError::TooManyDigits);
    }
    if decimal_places > DECIMAL_PLACES {
        return Err(PriceError::TooManyDecimalPlaces);
    }
    if whole_digits > MAX_DIGITS - DECIMAL_PLACES {
        return Err(PriceError::TooManyWholeDigits);
    }
    Ok(())
}

fn count_digits(mut n: u128) -> u32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}
