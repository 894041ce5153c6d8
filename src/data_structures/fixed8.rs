//! Fixed-point amounts with eight decimal places
//!
//! All amount arithmetic that feeds the wire format happens on the scaled
//! integer. Decimal input is rounded half away from zero at the ninth
//! fractional digit.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::errors::{WalletError, WalletResult};

/// Number of fractional digits carried by a [`Fixed8`]
pub const FIXED8_DECIMALS: u32 = 8;

/// 10^8, the scale between display units and raw units
pub const FIXED8_SCALE: i64 = 100_000_000;

/// Amount in 10^-8 units of an asset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "AmountRepr", into = "String")]
pub struct Fixed8(i64);

impl Fixed8 {
    pub const fn zero() -> Self {
        Fixed8(0)
    }

    /// Smallest representable positive amount
    pub const fn dust() -> Self {
        Fixed8(1)
    }

    pub const fn from_raw(raw: i64) -> Self {
        Fixed8(raw)
    }

    pub const fn raw(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whole display units, e.g. `Fixed8::from_units(5)` is five NEO
    pub fn from_units(units: i64) -> WalletResult<Self> {
        units
            .checked_mul(FIXED8_SCALE)
            .map(Fixed8)
            .ok_or_else(|| WalletError::AmountOverflow(format!("{units} units")))
    }

    /// Scale a floating point amount by 10^8 and round to the nearest unit
    pub fn from_f64(value: f64) -> WalletResult<Self> {
        if !value.is_finite() {
            return Err(WalletError::InvalidAmount(format!("{value} is not finite")));
        }
        let scaled = (value * FIXED8_SCALE as f64).round();
        if scaled > i64::MAX as f64 || scaled < i64::MIN as f64 {
            return Err(WalletError::AmountOverflow(value.to_string()));
        }
        Ok(Fixed8(scaled as i64))
    }

    /// Parse a decimal string exactly, rounding beyond eight fractional digits
    pub fn from_decimal_str(s: &str) -> WalletResult<Self> {
        let invalid = || WalletError::InvalidAmount(format!("'{s}' is not a decimal amount"));
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let overflow = || WalletError::AmountOverflow(s.to_string());
        let mut raw: i128 = 0;
        for b in whole.bytes() {
            raw = raw
                .checked_mul(10)
                .and_then(|r| r.checked_add((b - b'0') as i128))
                .filter(|r| *r <= i64::MAX as i128)
                .ok_or_else(overflow)?;
        }
        let mut fraction_digits = fraction.bytes();
        for _ in 0..FIXED8_DECIMALS {
            let digit = fraction_digits.next().map(|b| (b - b'0') as i128).unwrap_or(0);
            raw = raw * 10 + digit;
        }
        if matches!(fraction_digits.next(), Some(b) if b >= b'5') {
            raw += 1;
        }
        if negative {
            raw = -raw;
        }
        i64::try_from(raw).map(Fixed8).map_err(|_| overflow())
    }

    pub fn checked_add(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_add(other.0).map(Fixed8)
    }

    pub fn checked_sub(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_sub(other.0).map(Fixed8)
    }

    /// Sum amounts, failing instead of wrapping
    pub fn checked_sum<'a, I>(amounts: I) -> WalletResult<Fixed8>
    where
        I: IntoIterator<Item = &'a Fixed8>,
    {
        amounts.into_iter().try_fold(Fixed8::zero(), |acc, amount| {
            acc.checked_add(*amount)
                .ok_or_else(|| WalletError::AmountOverflow(format!("{acc} + {amount}")))
        })
    }

    /// Express the amount in a token's base units, failing if precision would be lost
    pub fn to_token_units(self, decimals: u8) -> WalletResult<i64> {
        if decimals as u32 > FIXED8_DECIMALS {
            return Err(WalletError::InvalidAmount(format!(
                "tokens with {decimals} decimals are not supported"
            )));
        }
        let divisor = 10i64.pow(FIXED8_DECIMALS - decimals as u32);
        if self.0 % divisor != 0 {
            return Err(WalletError::InvalidAmount(format!(
                "{self} has more precision than {decimals} decimals"
            )));
        }
        Ok(self.0 / divisor)
    }

    /// Little-endian wire representation; negative amounts cannot be encoded
    pub fn to_wire_bytes(self) -> WalletResult<[u8; 8]> {
        if self.0 < 0 {
            return Err(WalletError::AmountOverflow(format!(
                "negative amount {self} cannot be encoded"
            )));
        }
        Ok((self.0 as u64).to_le_bytes())
    }

    pub fn from_wire_bytes(bytes: [u8; 8]) -> Self {
        Fixed8(i64::from_le_bytes(bytes))
    }
}

impl Display for Fixed8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / FIXED8_SCALE as u64;
        let fraction = abs % FIXED8_SCALE as u64;
        if fraction == 0 {
            write!(f, "{sign}{whole}")
        } else {
            let fraction = format!("{fraction:08}");
            write!(f, "{sign}{whole}.{}", fraction.trim_end_matches('0'))
        }
    }
}

impl FromStr for Fixed8 {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fixed8::from_decimal_str(s)
    }
}

impl From<Fixed8> for String {
    fn from(value: Fixed8) -> Self {
        value.to_string()
    }
}

/// Amounts arrive from balance APIs as strings or JSON numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl TryFrom<AmountRepr> for Fixed8 {
    type Error = WalletError;

    fn try_from(value: AmountRepr) -> Result<Self, Self::Error> {
        match value {
            AmountRepr::Text(s) => Fixed8::from_decimal_str(&s),
            AmountRepr::Integer(units) => Fixed8::from_units(units),
            AmountRepr::Float(v) => Fixed8::from_f64(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_strings() {
        assert_eq!(Fixed8::from_decimal_str("1").unwrap().raw(), 100_000_000);
        assert_eq!(Fixed8::from_decimal_str("0.00000001").unwrap(), Fixed8::dust());
        assert_eq!(Fixed8::from_decimal_str(".5").unwrap().raw(), 50_000_000);
        assert_eq!(Fixed8::from_decimal_str("-2.5").unwrap().raw(), -250_000_000);
        assert_eq!(Fixed8::from_decimal_str("12.").unwrap().raw(), 1_200_000_000);
    }

    #[test]
    fn test_parse_rounds_half_away_from_zero() {
        assert_eq!(Fixed8::from_decimal_str("0.000000005").unwrap().raw(), 1);
        assert_eq!(Fixed8::from_decimal_str("0.000000004999").unwrap().raw(), 0);
        assert_eq!(Fixed8::from_decimal_str("-0.000000005").unwrap().raw(), -1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Fixed8::from_decimal_str("").is_err());
        assert!(Fixed8::from_decimal_str(".").is_err());
        assert!(Fixed8::from_decimal_str("1.2.3").is_err());
        assert!(Fixed8::from_decimal_str("1e5").is_err());
        assert!(matches!(
            Fixed8::from_decimal_str("99999999999999999999"),
            Err(WalletError::AmountOverflow(_))
        ));
    }

    #[test]
    fn test_from_f64_rounds() {
        assert_eq!(Fixed8::from_f64(0.1).unwrap().raw(), 10_000_000);
        assert_eq!(Fixed8::from_f64(0.00000001).unwrap(), Fixed8::dust());
        assert_eq!(Fixed8::from_f64(0.3).unwrap().raw(), 30_000_000);
        assert!(Fixed8::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Fixed8::from_raw(150_000_000).to_string(), "1.5");
        assert_eq!(Fixed8::from_raw(1).to_string(), "0.00000001");
        assert_eq!(Fixed8::from_raw(-200_000_000).to_string(), "-2");
        assert_eq!(Fixed8::zero().to_string(), "0");
    }

    #[test]
    fn test_token_units() {
        let amount = Fixed8::from_decimal_str("1.5").unwrap();
        assert_eq!(amount.to_token_units(8).unwrap(), 150_000_000);
        assert_eq!(amount.to_token_units(2).unwrap(), 150);
        assert!(amount.to_token_units(0).is_err());
        assert!(amount.to_token_units(9).is_err());
    }

    #[test]
    fn test_wire_bytes() {
        let amount = Fixed8::from_units(4).unwrap();
        let bytes = amount.to_wire_bytes().unwrap();
        assert_eq!(bytes, [0x00, 0x84, 0xd7, 0x17, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(Fixed8::from_wire_bytes(bytes), amount);
        assert!(Fixed8::from_raw(-1).to_wire_bytes().is_err());
    }

    #[test]
    fn test_checked_sum_overflow() {
        let amounts = [Fixed8::from_raw(i64::MAX), Fixed8::dust()];
        assert!(matches!(
            Fixed8::checked_sum(amounts.iter()),
            Err(WalletError::AmountOverflow(_))
        ));
    }

    #[test]
    fn test_serde_accepts_strings_and_numbers() {
        let from_str: Fixed8 = serde_json::from_str("\"2.5\"").unwrap();
        let from_int: Fixed8 = serde_json::from_str("3").unwrap();
        let from_float: Fixed8 = serde_json::from_str("0.25").unwrap();
        assert_eq!(from_str.raw(), 250_000_000);
        assert_eq!(from_int.raw(), 300_000_000);
        assert_eq!(from_float.raw(), 25_000_000);
        assert_eq!(serde_json::to_string(&from_str).unwrap(), "\"2.5\"");
    }
}
