//! printf-style width pattern for the record index
//!
//! Accepts `%[-][0][width](s|d)`: `%03s` renders 7 as `007`, `%-4d` as `7   `.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFormat {
    pub width: usize,
    pub zero_pad: bool,
    pub left_align: bool,
}

impl IndexFormat {
    pub const fn new(width: usize, zero_pad: bool) -> Self {
        Self {
            width,
            zero_pad,
            left_align: false,
        }
    }

    /// Render an index value
    pub fn format(&self, index: u64) -> String {
        let width = self.width;
        if self.left_align {
            format!("{:<width$}", index)
        } else if self.zero_pad {
            format!("{:0>width$}", index)
        } else {
            format!("{:>width$}", index)
        }
    }
}

impl Default for IndexFormat {
    fn default() -> Self {
        Self::new(3, true)
    }
}

impl FromStr for IndexFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            LoggerError::config(
                "index_format",
                format!("expected %[-][0][width](s|d), got '{}'", s),
            )
        };

        let pattern = s.strip_prefix('%').ok_or_else(invalid)?;
        let pattern = pattern
            .strip_suffix('s')
            .or_else(|| pattern.strip_suffix('d'))
            .ok_or_else(invalid)?;

        let (left_align, pattern) = match pattern.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let (zero_pad, digits) = match pattern.strip_prefix('0') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };

        let width = if digits.is_empty() {
            0
        } else if digits.bytes().all(|b| b.is_ascii_digit()) {
            digits.parse().map_err(|_| invalid())?
        } else {
            return Err(invalid());
        };

        Ok(Self {
            width,
            zero_pad: zero_pad && !left_align,
            left_align,
        })
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("%")?;
        if self.left_align {
            f.write_str("-")?;
        }
        if self.zero_pad {
            f.write_str("0")?;
        }
        if self.width > 0 {
            write!(f, "{}", self.width)?;
        }
        f.write_str("s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pads_to_three_digits() {
        let format = IndexFormat::default();
        assert_eq!(format.format(1), "001");
        assert_eq!(format.format(42), "042");
        assert_eq!(format.format(1234), "1234");
        assert_eq!(format.to_string(), "%03s");
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("%03s".parse::<IndexFormat>().unwrap(), IndexFormat::default());
        assert_eq!("%5d".parse::<IndexFormat>().unwrap().format(7), "    7");
        assert_eq!("%-4s".parse::<IndexFormat>().unwrap().format(7), "7   ");
        assert_eq!("%s".parse::<IndexFormat>().unwrap().format(12), "12");
    }

    #[test]
    fn test_left_align_ignores_zero_flag() {
        let format: IndexFormat = "%-05s".parse().unwrap();
        assert!(!format.zero_pad);
        assert_eq!(format.format(3), "3    ");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "03s", "%3x", "%a3s", "%3", "%+3s"] {
            assert!(
                matches!(
                    bad.parse::<IndexFormat>(),
                    Err(LoggerError::InvalidConfiguration { .. })
                ),
                "accepted {bad:?}"
            );
        }
    }
}
