//! Native-currency amounts and display ⇄ base unit conversion.
//!
//! Everything past the caller boundary works in base units: tinybars for the
//! native currency, the token's smallest denomination for tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::AmountError;

/// Tinybars per whole hbar.
pub const TINYBARS_PER_HBAR: i64 = 100_000_000;

/// An hbar amount, stored as tinybars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hbar(i64);

impl Hbar {
    pub const ZERO: Self = Self(0);

    pub const fn from_tinybars(tinybars: i64) -> Self {
        Self(tinybars)
    }

    pub const fn from_hbars(hbars: i64) -> Self {
        Self(hbars * TINYBARS_PER_HBAR)
    }

    pub fn tinybars(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl Add for Hbar {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Hbar {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Hbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tℏ", self.0)
    }
}

/// Convert a decimal display amount (e.g. `"12.5"`) into base units.
///
/// Exact decimal arithmetic: `to_base_units("12.5", 2) == Ok(1250)`. Fails
/// when the input has more fractional digits than `decimals` allows.
pub fn to_base_units(display: &str, decimals: u32) -> Result<u64, AmountError> {
    let invalid = || AmountError::Invalid(display.to_string());
    let s = display.trim();
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let frac = frac.trim_end_matches('0');
    if frac.len() > decimals as usize {
        return Err(AmountError::TooPrecise {
            amount: display.to_string(),
            decimals,
        });
    }

    let scale = 10u64.checked_pow(decimals).ok_or(AmountError::Overflow)?;
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };
    let frac_value: u64 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<width$}", width = decimals as usize);
        padded.parse().map_err(|_| AmountError::Overflow)?
    };

    whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac_value))
        .ok_or(AmountError::Overflow)
}
