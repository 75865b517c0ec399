//! Token amounts in base units with exact integer arithmetic.
//!
//! All on-chain amounts are carried as [`Wei`] (a `u128` count of the
//! smallest denomination). Human-readable decimal strings are only produced
//! or consumed at the edges: [`parse_units`] when reading user input and
//! [`format_units`] when printing.
//!
//! # Precision
//! No floating point is involved anywhere. Formatting rounds half-up to the
//! requested number of places, matching the `toFixed` behaviour users see
//! in the web terminal.

use crate::core::constants::{MAX_DECIMALS, TOKEN_DECIMALS, WEI_PER_TOKEN};
use std::fmt;
use std::ops::{Add, Sub};

/// Amount in base units (1 token = 10^decimals base units).
///
/// # Examples
/// ```
/// use gcterm::utils::units::Wei;
/// let one = Wei::from_tokens(1);
/// assert_eq!(one.as_u128(), 1_000_000_000_000_000_000);
/// assert_eq!(one.to_display(4), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Wei(pub u128);

impl Wei {
    /// Zero base units.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Create from a raw base-unit value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Raw base-unit value.
    pub const fn as_u128(self) -> u128 {
        self.0
    }

    /// Whole tokens of an 18-decimals token, saturating on overflow.
    pub fn from_tokens(tokens: u128) -> Self {
        Self(tokens.saturating_mul(WEI_PER_TOKEN))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked subtraction, `None` on underflow.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Saturating subtraction, clamps at zero.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Saturating addition, clamps at `Wei::MAX`.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Fixed-point string of an 18-decimals amount with exactly `places`
    /// decimals (e.g. `"1.5000"`).
    pub fn to_fixed(self, places: u32) -> String {
        format_units(self, TOKEN_DECIMALS, places)
    }

    /// Like [`to_fixed`](Self::to_fixed) with trailing zeros removed
    /// (e.g. `"1.5"`, `"2"`).
    pub fn to_display(self, places: u32) -> String {
        strip_trailing_zeros(&self.to_fixed(places))
    }
}

impl From<u128> for Wei {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

impl Add for Wei {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl Sub for Wei {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

/// Parse a human decimal amount (`"1"`, `"1.5"`, `".25"`) into base units.
///
/// Returns `None` for empty input, signs, exponents, more fractional digits
/// than `decimals`, or values that overflow `u128`.
pub fn parse_units(input: &str, decimals: u32) -> Option<Wei> {
    if decimals > MAX_DECIMALS {
        return None;
    }
    let cleaned = input.trim();
    let (whole_str, frac_str) = match cleaned.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (cleaned, ""),
    };

    if whole_str.is_empty() && frac_str.is_empty() {
        return None;
    }
    if frac_str.len() > decimals as usize {
        return None;
    }
    if !whole_str.chars().all(|c| c.is_ascii_digit())
        || !frac_str.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let scale = 10u128.checked_pow(decimals)?;
    let whole: u128 = if whole_str.is_empty() {
        0
    } else {
        whole_str.parse().ok()?
    };
    let fraction: u128 = if frac_str.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_str, width = decimals as usize);
        padded.parse().ok()?
    };

    whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(fraction))
        .map(Wei)
}

/// Format base units as a decimal string with exactly `places` decimals,
/// rounding half-up.
pub fn format_units(amount: Wei, decimals: u32, places: u32) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let scale = 10u128.pow(decimals);
    let mut whole = amount.0 / scale;
    let fraction = amount.0 % scale;

    let frac_str = if places >= decimals {
        let digits = if decimals == 0 {
            String::new()
        } else {
            format!("{:0width$}", fraction, width = decimals as usize)
        };
        format!("{}{}", digits, "0".repeat((places - decimals) as usize))
    } else {
        let divisor = 10u128.pow(decimals - places);
        let mut kept = fraction / divisor;
        let remainder = fraction % divisor;
        if remainder * 2 >= divisor {
            kept += 1;
        }
        let limit = 10u128.pow(places);
        if kept == limit {
            whole = whole.saturating_add(1);
            kept = 0;
        }
        if places == 0 {
            String::new()
        } else {
            format!("{:0width$}", kept, width = places as usize)
        }
    };

    if frac_str.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac_str)
    }
}

/// Remove trailing fractional zeros and a dangling decimal point.
pub fn strip_trailing_zeros(value: &str) -> String {
    if !value.contains('.') {
        return value.to_string();
    }
    value
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
