//! Version labels.
//!
//! Labels have the form `vX.Y` and advance by one tenth per saved edit:
//! `v1.0`, `v1.1`, ..., `v1.9`, `v2.0`. The value is held as an integer
//! count of tenths so that the increment is exact.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A version label stored as fixed-point tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionLabel {
    tenths: u64,
}

impl VersionLabel {
    /// The label given to the first version of every asset.
    pub const INITIAL: Self = Self { tenths: 10 };

    /// Largest label accepted when parsing, in tenths.
    ///
    /// Parsed labels stay far below `u64::MAX`, so [`next`](Self::next)
    /// always yields a strictly greater label.
    pub const MAX_PARSED_TENTHS: u64 = 1 << 32;

    const fn from_tenths(tenths: u64) -> Self {
        Self { tenths }
    }

    /// The label following this one (`+0.1`).
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            tenths: self.tenths + 1,
        }
    }
}

impl Default for VersionLabel {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl FromStr for VersionLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LabelError::Invalid(s.to_string());

        let number = s.strip_prefix('v').ok_or_else(invalid)?;
        let (whole, fraction) = match number.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (number, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole: u64 = whole.parse().map_err(|_| invalid())?;

        let tenth = match fraction {
            None => 0,
            Some(digit) if digit.len() == 1 => digit
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .map(u64::from)
                .ok_or_else(invalid)?,
            Some(_) => return Err(invalid()),
        };

        whole
            .checked_mul(10)
            .and_then(|t| t.checked_add(tenth))
            .filter(|&t| t <= Self::MAX_PARSED_TENTHS)
            .map(Self::from_tenths)
            .ok_or_else(invalid)
    }
}

impl Serialize for VersionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors produced when parsing a label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    /// The text is not of the form `vX` or `vX.Y`
    #[error("invalid version label: {0:?}")]
    Invalid(String),
}
