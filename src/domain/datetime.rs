// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM DateTime Value Object
//!
//! CIM datetimes are fixed-width 25 character strings in one of two forms:
//!
//! ```text
//! timestamp: yyyymmddhhmmss.mmmmmmsutc   (s is '+' or '-', utc = offset minutes)
//! interval:  ddddddddhhmmss.mmmmmm:000
//! ```

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// DateTime validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("CIM datetime must be 25 characters, got {0}")]
    InvalidLength(usize),

    #[error("Malformed CIM datetime: {0}")]
    InvalidFormat(String),

    #[error("CIM datetime field {field} out of range: {value}")]
    FieldOutOfRange { field: &'static str, value: u32 },

    #[error("CIM datetime is an interval, not a timestamp")]
    NotATimestamp,

    #[error("CIM datetime is a timestamp, not an interval")]
    NotAnInterval,

    #[error("Value cannot be represented as a CIM datetime: {0}")]
    Unrepresentable(String),
}

/// Validated CIM datetime string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CimDateTime(String);

impl CimDateTime {
    /// Fixed length of every CIM datetime
    pub const LENGTH: usize = 25;

    /// Create from the 25 character CIM form with validation
    ///
    /// # Invariants
    /// - Exactly 25 ASCII characters
    /// - Digits everywhere except the '.' at 14 and the sign/':' at 21
    /// - Calendar and clock fields within range
    pub fn new(value: impl Into<String>) -> Result<Self, DateTimeError> {
        let value = value.into();

        if value.len() != Self::LENGTH || !value.is_ascii() {
            return Err(DateTimeError::InvalidLength(value.chars().count()));
        }

        let bytes = value.as_bytes();
        let digits_ok = bytes[..14]
            .iter()
            .chain(&bytes[15..21])
            .chain(&bytes[22..])
            .all(u8::is_ascii_digit);

        if bytes[14] != b'.' || !digits_ok {
            return Err(DateTimeError::InvalidFormat(value));
        }

        match bytes[21] {
            b':' => {
                if &value[22..] != "000" {
                    return Err(DateTimeError::InvalidFormat(value));
                }
                Self::check_clock(&value, 8)?;
            }
            b'+' | b'-' => {
                let year = field(&value, 0, 4);
                let month = field(&value, 4, 6);
                let day = field(&value, 6, 8);
                if !(1..=12).contains(&month) {
                    return Err(DateTimeError::FieldOutOfRange {
                        field: "month",
                        value: month,
                    });
                }
                if NaiveDate::from_ymd_opt(year as i32, month, day).is_none() {
                    return Err(DateTimeError::FieldOutOfRange {
                        field: "day",
                        value: day,
                    });
                }
                Self::check_clock(&value, 8)?;
            }
            _ => return Err(DateTimeError::InvalidFormat(value)),
        }

        Ok(Self(value))
    }

    fn check_clock(value: &str, start: usize) -> Result<(), DateTimeError> {
        let checks = [("hours", start, 24), ("minutes", start + 2, 60), ("seconds", start + 4, 60)];
        for (name, offset, limit) in checks {
            let v = field(value, offset, offset + 2);
            if v >= limit {
                return Err(DateTimeError::FieldOutOfRange { field: name, value: v });
            }
        }
        Ok(())
    }

    /// Build a timestamp from a chrono datetime
    pub fn from_timestamp(dt: &DateTime<FixedOffset>) -> Result<Self, DateTimeError> {
        if !(0..=9999).contains(&dt.year()) {
            return Err(DateTimeError::Unrepresentable(dt.to_rfc3339()));
        }

        let offset_minutes = dt.offset().local_minus_utc() / 60;
        let sign = if offset_minutes < 0 { '-' } else { '+' };
        let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;

        Self::new(format!(
            "{:04}{:02}{:02}{:02}{:02}{:02}.{:06}{}{:03}",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            micros,
            sign,
            offset_minutes.abs()
        ))
    }

    /// Build an interval from a non-negative chrono duration
    pub fn from_interval(duration: Duration) -> Result<Self, DateTimeError> {
        let total = duration
            .num_microseconds()
            .filter(|m| *m >= 0)
            .ok_or_else(|| DateTimeError::Unrepresentable(duration.to_string()))?;

        let micros = total % 1_000_000;
        let total_secs = total / 1_000_000;
        let days = total_secs / 86_400;
        if days > 99_999_999 {
            return Err(DateTimeError::Unrepresentable(duration.to_string()));
        }

        let rem = total_secs % 86_400;
        Self::new(format!(
            "{:08}{:02}{:02}{:02}.{:06}:000",
            days,
            rem / 3_600,
            (rem % 3_600) / 60,
            rem % 60,
            micros
        ))
    }

    /// Check if this value is an interval
    pub fn is_interval(&self) -> bool {
        self.0.as_bytes()[21] == b':'
    }

    /// Convert a timestamp to a chrono datetime in its own offset
    pub fn to_timestamp(&self) -> Result<DateTime<FixedOffset>, DateTimeError> {
        if self.is_interval() {
            return Err(DateTimeError::NotATimestamp);
        }

        let s = &self.0;
        let date = NaiveDate::from_ymd_opt(field(s, 0, 4) as i32, field(s, 4, 6), field(s, 6, 8))
            .ok_or_else(|| DateTimeError::InvalidFormat(s.clone()))?;
        let time = NaiveTime::from_hms_micro_opt(
            field(s, 8, 10),
            field(s, 10, 12),
            field(s, 12, 14),
            field(s, 15, 21),
        )
        .ok_or_else(|| DateTimeError::InvalidFormat(s.clone()))?;

        let minutes = field(s, 22, 25) as i32;
        let seconds = if s.as_bytes()[21] == b'-' { -minutes * 60 } else { minutes * 60 };
        let offset = FixedOffset::east_opt(seconds)
            .ok_or_else(|| DateTimeError::InvalidFormat(s.clone()))?;

        offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or_else(|| DateTimeError::InvalidFormat(s.clone()))
    }

    /// Convert an interval to a chrono duration
    pub fn to_interval(&self) -> Result<Duration, DateTimeError> {
        if !self.is_interval() {
            return Err(DateTimeError::NotAnInterval);
        }

        let s = &self.0;
        Ok(Duration::days(i64::from(field(s, 0, 8)))
            + Duration::hours(i64::from(field(s, 8, 10)))
            + Duration::minutes(i64::from(field(s, 10, 12)))
            + Duration::seconds(i64::from(field(s, 12, 14)))
            + Duration::microseconds(i64::from(field(s, 15, 21))))
    }

    /// Get the CIM string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Decimal field at `[start, end)`; callers validate digits first
fn field(s: &str, start: usize, end: usize) -> u32 {
    s[start..end].parse().unwrap_or(0)
}

impl fmt::Display for CimDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CimDateTime {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CimDateTime {
    type Error = DateTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CimDateTime> for String {
    fn from(value: CimDateTime) -> Self {
        value.0
    }
}
