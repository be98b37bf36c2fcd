//! Human-readable durations: `"250ms"`, `"5s"`, `"2h"`.
//!
//! Use as a field attribute:
//!
//! ```
//! # use serde::Deserialize;
//! #[derive(Deserialize)]
//! struct Retry {
//!     #[serde(with = "ezconf_formats::types::duration")]
//!     backoff: std::time::Duration,
//! }
//! ```
//!
//! or wrap in [`HumanDuration`] where an attribute cannot reach (inside a
//! `Vec` or map).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("Could not detect suffix in '{0}', expected s, ms, us, or ns")]
    MissingSuffix(String),
    #[error("invalid count in duration '{0}'")]
    InvalidCount(String),
    #[error("duration '{0}' is out of range")]
    Overflow(String),
}

// Longer suffixes first so "ms" is not read as minutes followed by junk.
const SUFFIXES: [(&str, u64); 6] = [
    ("ms", 1_000_000),
    ("us", 1_000),
    ("ns", 1),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

// Coarsest first, for formatting.
const UNITS: [(u128, &str); 6] = [
    (3_600_000_000_000, "h"),
    (60_000_000_000, "m"),
    (1_000_000_000, "s"),
    (1_000_000, "ms"),
    (1_000, "us"),
    (1, "ns"),
];

/// Parse `"<count><unit>"` with unit one of `ns`, `us`, `ms`, `s`, `m`, `h`.
pub fn parse(text: &str) -> Result<Duration, DurationError> {
    let trimmed = text.trim();
    let (count, nanos_per_unit) = SUFFIXES
        .iter()
        .find_map(|(suffix, scale)| trimmed.strip_suffix(suffix).map(|count| (count, *scale)))
        .ok_or_else(|| DurationError::MissingSuffix(text.to_string()))?;

    let count: u64 = count
        .trim()
        .parse()
        .map_err(|_| DurationError::InvalidCount(text.to_string()))?;

    let nanos = u128::from(count) * u128::from(nanos_per_unit);
    let secs = u64::try_from(nanos / 1_000_000_000)
        .map_err(|_| DurationError::Overflow(text.to_string()))?;
    // Always < 1e9.
    let subsec = (nanos % 1_000_000_000) as u32;
    Ok(Duration::new(secs, subsec))
}

/// Render with the coarsest unit that represents `duration` exactly.
pub fn format(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    let (scale, unit) = UNITS
        .iter()
        .copied()
        .find(|(scale, _)| nanos % scale == 0)
        .unwrap_or((1, "ns"));
    format!("{}{unit}", nanos / scale)
}

pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*duration))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(D::Error::custom)
}

/// A [`Duration`] that reads and writes the human-readable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).map(HumanDuration)
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self.0))
    }
}

impl From<HumanDuration> for Duration {
    fn from(value: HumanDuration) -> Self {
        value.0
    }
}

impl Serialize for HumanDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(HumanDuration)
    }
}
