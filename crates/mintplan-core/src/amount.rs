// crates/mintplan-core/src/amount.rs
//
// Exact fixed-point amounts.
//
// Token quantities are entered by humans as decimal strings ("1000000",
// "0.25") and handed to the deployment tool as integers scaled by 10^18
// (the "wei" convention of 18-decimal tokens). Allocation percentages are
// exact decimal fractions stored in parts per million so that sums over the
// allocation graph are exact.
//
// Parsing never rounds: digits beyond the supported precision are accepted
// only when they are zeros.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional digits of a token amount.
pub const TOKEN_DECIMALS: u32 = 18;

/// Base units in one whole token. 1 token = 10^18 wei.
pub const WEI_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Number of fractional digits carried by a `Share`.
pub const SHARE_DECIMALS: u32 = 6;

/// Parts per million in a whole (1.0).
pub const PPM_PER_UNIT: u32 = 1_000_000;

/// Reasons a decimal string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("empty amount")]
    Empty,

    #[error("no digits in amount")]
    NoDigits,

    #[error("invalid character '{0}' in amount")]
    InvalidCharacter(char),

    #[error("more than one decimal point")]
    MultiplePoints,

    #[error("more than {decimals} significant fractional digits")]
    Precision { decimals: u32 },

    #[error("amount exceeds the representable range")]
    Overflow,
}

/// Parse a non-negative decimal string into an integer scaled by `10^decimals`.
pub fn parse_fixed(input: &str, decimals: u32) -> Result<u128, AmountParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if frac_part.contains('.') {
        return Err(AmountParseError::MultiplePoints);
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountParseError::NoDigits);
    }
    if let Some(c) = int_part
        .chars()
        .chain(frac_part.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(AmountParseError::InvalidCharacter(c));
    }

    let (kept, dropped) = if frac_part.len() > decimals as usize {
        frac_part.split_at(decimals as usize)
    } else {
        (frac_part, "")
    };
    if dropped.bytes().any(|b| b != b'0') {
        return Err(AmountParseError::Precision { decimals });
    }

    let scale = 10u128
        .checked_pow(decimals)
        .ok_or(AmountParseError::Overflow)?;
    let whole = accumulate_digits(int_part)?;
    // `kept` has at most `decimals` digits, so the padded value stays below `scale`.
    let frac = accumulate_digits(kept)? * 10u128.pow(decimals - kept.len() as u32);

    whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac))
        .ok_or(AmountParseError::Overflow)
}

fn accumulate_digits(digits: &str) -> Result<u128, AmountParseError> {
    digits.bytes().try_fold(0u128, |acc, b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(b - b'0')))
            .ok_or(AmountParseError::Overflow)
    })
}

/// Render an integer scaled by `10^decimals` as a canonical decimal string,
/// trimming trailing fractional zeros.
pub fn format_fixed(value: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

/// A token quantity in base units (1 token = 10^18 wei).
///
/// Serialized as a decimal string of wei, since the values routinely exceed
/// what JSON consumers can hold in a double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount {
    /// Amount in wei.
    pub wei: u128,
}

impl TokenAmount {
    /// Create an amount from a whole number of tokens.
    ///
    /// # Example
    /// ```
    /// use mintplan_core::amount::{TokenAmount, WEI_PER_TOKEN};
    /// let amount = TokenAmount::from_tokens(400_000_000);
    /// assert_eq!(amount.wei, 400_000_000 * WEI_PER_TOKEN);
    /// ```
    pub const fn from_tokens(tokens: u64) -> Self {
        Self {
            wei: tokens as u128 * WEI_PER_TOKEN,
        }
    }

    /// Create an amount from a raw wei value.
    pub const fn from_wei(wei: u128) -> Self {
        Self { wei }
    }

    /// Parse a human-entered decimal token quantity ("1000000", "0.5").
    pub fn from_decimal_str(s: &str) -> Result<Self, AmountParseError> {
        parse_fixed(s, TOKEN_DECIMALS).map(Self::from_wei)
    }

    /// Canonical decimal token quantity; the inverse of `from_decimal_str`.
    pub fn to_decimal_string(&self) -> String {
        format_fixed(self.wei, TOKEN_DECIMALS)
    }

    /// Integer wei value as a decimal string.
    pub fn to_wei_string(&self) -> String {
        self.wei.to_string()
    }

    pub fn zero() -> Self {
        Self { wei: 0 }
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.wei.checked_add(rhs.wei).map(Self::from_wei)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.wei.checked_sub(rhs.wei).map(Self::from_wei)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wei_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericRepr {
    Int(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NumericRepr::deserialize(deserializer)? {
            NumericRepr::Int(wei) => Ok(Self::from_wei(u128::from(wei))),
            NumericRepr::Text(s) => s
                .trim()
                .parse::<u128>()
                .map(Self::from_wei)
                .map_err(serde::de::Error::custom),
            NumericRepr::Float(_) => Err(serde::de::Error::custom(
                "wei amounts must be integers",
            )),
        }
    }
}

/// An exact fraction of the total supply, in parts per million.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Share {
    pub ppm: u32,
}

impl Share {
    /// The whole supply (1.0).
    pub const ONE: Share = Share { ppm: PPM_PER_UNIT };

    pub const fn from_ppm(ppm: u32) -> Self {
        Self { ppm }
    }

    /// Parse a decimal fraction ("0.1", "0.001"). Values above 1.0 are rejected.
    pub fn from_decimal_str(s: &str) -> Result<Self, AmountParseError> {
        let ppm = parse_fixed(s, SHARE_DECIMALS)?;
        if ppm > u128::from(PPM_PER_UNIT) {
            return Err(AmountParseError::Overflow);
        }
        Ok(Self { ppm: ppm as u32 })
    }

    pub fn to_decimal_string(&self) -> String {
        format_fixed(u128::from(self.ppm), SHARE_DECIMALS)
    }

    /// Floating-point view, for display and JSON output only.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.ppm) / f64::from(PPM_PER_UNIT)
    }

    pub fn is_whole(&self) -> bool {
        *self == Self::ONE
    }

    /// `amount * self`, rounded down to the nearest wei.
    pub fn apply(&self, amount: TokenAmount) -> Option<TokenAmount> {
        let unit = u128::from(PPM_PER_UNIT);
        let ppm = u128::from(self.ppm);
        let high = (amount.wei / unit).checked_mul(ppm)?;
        let low = (amount.wei % unit) * ppm / unit;
        high.checked_add(low).map(TokenAmount::from_wei)
    }
}

impl Add for Share {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            ppm: self.ppm.saturating_add(rhs.ppm),
        }
    }
}

impl Sum for Share {
    fn sum<I: Iterator<Item = Share>>(iter: I) -> Self {
        iter.fold(Share::default(), |acc, s| acc + s)
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Serialize for Share {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Share {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match NumericRepr::deserialize(deserializer)? {
            NumericRepr::Int(v) => v.to_string(),
            // Shortest round-trip form, so excess precision is rejected
            // by the parser instead of rounded away.
            NumericRepr::Float(v) => v.to_string(),
            NumericRepr::Text(s) => s,
        };
        Share::from_decimal_str(&text).map_err(serde::de::Error::custom)
    }
}
