//! Timestamp formatting utilities
//!
//! Named formats cover the common cases; anything else is a strftime string,
//! validated once when the configuration is built.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_ordered_logger::core::TimestampFormat;
///
/// let format: TimestampFormat = "unixMillis".parse().unwrap();
/// assert_eq!(format, TimestampFormat::UnixMillis);
///
/// let custom: TimestampFormat = "%H:%M:%S".parse().unwrap();
/// assert_eq!(custom, TimestampFormat::Custom("%H:%M:%S".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time with offset: `2025-01-08T10:30:45+0100`
    #[default]
    IsoDateTime,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 in UTC with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format, rendered in the timestamp's own timezone
    Custom(String),
}

impl TimestampFormat {
    /// Build a custom format, rejecting malformed strftime strings.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] for unknown specifiers.
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "dateformat",
                format!("invalid strftime pattern '{}'", pattern),
            ));
        }
        Ok(TimestampFormat::Custom(pattern))
    }

    /// Format a timestamp according to this format
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            TimestampFormat::IsoDateTime => datetime.format("%Y-%m-%dT%H:%M:%S%z").to_string(),
            TimestampFormat::Iso8601 => datetime
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Iso8601Micros => datetime
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.6fZ")
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}

impl FromStr for TimestampFormat {
    type Err = LoggerError;

    /// Parse a named format or, failing that, a strftime pattern
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "isoDateTime" => Ok(TimestampFormat::IsoDateTime),
            "iso8601" => Ok(TimestampFormat::Iso8601),
            "iso8601Micros" => Ok(TimestampFormat::Iso8601Micros),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix" => Ok(TimestampFormat::Unix),
            "unixMillis" => Ok(TimestampFormat::UnixMillis),
            "unixMicros" => Ok(TimestampFormat::UnixMicros),
            "" => Err(LoggerError::config("dateformat", "empty format")),
            other => TimestampFormat::custom(other),
        }
    }
}
