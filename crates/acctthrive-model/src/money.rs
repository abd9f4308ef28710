// SPDX-License-Identifier: Apache-2.0

use crate::ids::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Base-currency amount in whole US cents.
///
/// Non-negative by construction. Serialized as a decimal string with two
/// fractional digits (`"25.00"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Usd(u64);

impl Usd {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parses a plain decimal amount such as `25`, `25.5` or `0.65`.
    ///
    /// Extra fractional digits are rounded half-up to the cent. Signs,
    /// exponents, `NaN` and `inf` are rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        parse_fixed_point(input, 2).map(Self)
    }
}

/// Parses a plain non-negative decimal into units of `10^-scale`, rounding
/// half-up on the first dropped digit.
fn parse_fixed_point(input: &str, scale: u32) -> Result<u64, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError("amount must not be empty".to_string()));
    }
    if s.starts_with('-') {
        return Err(ValidationError("amount must not be negative".to_string()));
    }
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(ValidationError("amount must contain digits".to_string()));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError(format!(
            "amount `{s}` must be a plain decimal number"
        )));
    }
    let too_large = || ValidationError("amount is too large".to_string());
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| too_large())?
    };
    let mut digits = frac.bytes().map(|b| u64::from(b - b'0'));
    let mut value = whole_value;
    for _ in 0..scale {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digits.next().unwrap_or(0)))
            .ok_or_else(too_large)?;
    }
    let round_up = u64::from(digits.next().is_some_and(|d| d >= 5));
    value.checked_add(round_up).ok_or_else(too_large)
}

impl Display for Usd {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::iter::Sum for Usd {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl TryFrom<String> for Usd {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Usd> for String {
    fn from(value: Usd) -> Self {
        value.to_string()
    }
}

/// Display-currency amount in whole Nigerian naira.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ngn(u64);

impl Ngn {
    #[must_use]
    pub const fn new(naira: u64) -> Self {
        Self(naira)
    }

    #[must_use]
    pub const fn naira(self) -> u64 {
        self.0
    }

    /// Parses whole or fractional naira, rounding half-up to a whole unit.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        parse_fixed_point(input, 0)
            .map(Self)
            .map_err(|ValidationError(msg)| ValidationError(format!("naira {msg}")))
    }
}

impl Display for Ngn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
