//! Minute-precision local timestamps used by book records.
//!
//! # Invariants
//! - Seconds and sub-second parts are always zero, so a timestamp survives
//!   a text round-trip unchanged.
//! - Text form is `YYYY-Month-DD HH:MM`, e.g. `2024-October-19 14:08`.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `strftime` pattern of the persisted timestamp text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%B-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampError {
    pub input: String,
    pub message: String,
}

impl Display for TimestampError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timestamp `{}` (expected YYYY-Month-DD HH:MM): {}",
            self.input, self.message
        )
    }
}

impl Error for TimestampError {}

/// Local wall-clock time truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Captures the current local time.
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    pub fn from_naive(value: NaiveDateTime) -> Self {
        let truncated = value
            .with_second(0)
            .and_then(|value| value.with_nanosecond(0))
            .unwrap_or(value);
        Self(truncated)
    }

    /// Parses the persisted `YYYY-Month-DD HH:MM` text form.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
            .map(Self::from_naive)
            .map_err(|err| TimestampError {
                input: value.to_string(),
                message: err.to_string(),
            })
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
