//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call, in ascending order.
///
/// `Disabled` is never used for a call; it only serves as a threshold that
/// suppresses everything, including `Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Log = 1,
    Trace = 2,
    Debug = 3,
    #[default]
    Info = 4,
    Warn = 5,
    Error = 6,
    Fatal = 7,
    Disabled = 8,
}

impl LogLevel {
    /// All levels a call can be made at, lowest first
    pub const CALL_LEVELS: [LogLevel; 7] = [
        LogLevel::Log,
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Log => "LOG",
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Disabled => "DISABLED",
        }
    }

    /// Numeric value exposed to templates as `{{level}}`
    #[inline]
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Whether a call at this level gets through `threshold`.
    ///
    /// `Fatal` ignores the threshold unless it is `Disabled`.
    #[inline]
    pub fn passes(self, threshold: LogLevel) -> bool {
        if threshold >= LogLevel::Disabled {
            return false;
        }
        self == LogLevel::Fatal || self >= threshold
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> Option<colored::Color> {
        match self {
            LogLevel::Warn => Some(colored::Color::Yellow),
            LogLevel::Error | LogLevel::Fatal => Some(colored::Color::Red),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOG" => Ok(LogLevel::Log),
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            "DISABLED" | "OFF" | "NONE" => Ok(LogLevel::Disabled),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_total() {
        let mut previous = LogLevel::Log;
        for level in LogLevel::CALL_LEVELS.iter().skip(1) {
            assert!(previous < *level);
            previous = *level;
        }
        assert!(LogLevel::Fatal < LogLevel::Disabled);
    }

    #[test]
    fn test_gate_below_threshold() {
        assert!(!LogLevel::Debug.passes(LogLevel::Info));
        assert!(LogLevel::Info.passes(LogLevel::Info));
        assert!(LogLevel::Warn.passes(LogLevel::Info));
    }

    #[test]
    fn test_fatal_bypasses_threshold_below_disabled() {
        // No threshold short of Disabled is above Fatal, but the bypass is explicit
        assert!(LogLevel::Fatal.passes(LogLevel::Fatal));
        assert!(LogLevel::Fatal.passes(LogLevel::Log));
        assert!(!LogLevel::Error.passes(LogLevel::Fatal));
    }

    #[test]
    fn test_disabled_suppresses_everything() {
        for level in LogLevel::CALL_LEVELS {
            assert!(!level.passes(LogLevel::Disabled), "{} leaked", level);
        }
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(LogLevel::Log.as_u8(), 1);
        assert_eq!(LogLevel::Warn.as_u8(), 5);
        assert_eq!(LogLevel::Fatal.as_u8(), 7);
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Log".parse::<LogLevel>(), Ok(LogLevel::Log));
        assert_eq!("off".parse::<LogLevel>(), Ok(LogLevel::Disabled));
        assert!("verbose".parse::<LogLevel>().is_err());
    }
}
