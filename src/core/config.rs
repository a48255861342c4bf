//! Logger configuration
//!
//! [`LogConfig`] is the resolved, immutable configuration of one logger.
//! It starts from defaults; [`ConfigOverrides`] (loadable from JSON) or the
//! builder setters replace individual fields.

use super::error::{LoggerError, Result};
use super::index_format::IndexFormat;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::template::placeholders;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default line template
pub const DEFAULT_FORMAT: &str = "{{timestamp}} <{{title}}>{{rhs}}{{file}}:{{line}}";

/// Default line width used to right-align the `{{rhs}}` segment
pub const DEFAULT_LINE_WIDTH: usize = 180;

/// Default bound on a single source-map lookup
pub const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholders that need a stack snapshot of the call site
pub const LOCATION_PLACEHOLDERS: [&str; 7] =
    ["callee", "method", "path", "line", "pos", "file", "folder"];

/// Line width, queried once per rendered record
pub type LineWidthFn = Arc<dyn Fn() -> usize + Send + Sync>;

/// Hook run on every record after location resolution and before rendering
pub type PreprocessHook = Arc<dyn Fn(&mut LogRecord) -> Result<()> + Send + Sync>;

/// Receiver for the logger's own failures (render, hook, transport, location)
pub type DiagnosticCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Default diagnostics: one line on stderr per failure
pub fn stderr_diagnostics() -> DiagnosticCallback {
    Arc::new(|error| {
        if error.is_location_error() {
            eprintln!("[LOGGER WARNING] Call site unavailable: {}", error);
        } else {
            eprintln!("[LOGGER ERROR] {}", error);
        }
    })
}

#[derive(Clone)]
pub struct LogConfig {
    pub format: String,
    pub timestamp_format: TimestampFormat,
    pub index_format: IndexFormat,
    pub characters_per_line: LineWidthFn,
    pub preprocess: PreprocessHook,
    /// Initial threshold; change it later with `Logger::set_level`
    pub level: LogLevel,
    /// Frame to report, counted from the caller of the logger
    pub stack_index: usize,
    /// Prefix stripped from frame paths by the default resolver
    pub root_dir: Option<PathBuf>,
    pub resolver_timeout: Option<Duration>,
    /// Escape `\n`, `\r` and `\t` in messages
    pub escape_control_chars: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            timestamp_format: TimestampFormat::default(),
            index_format: IndexFormat::default(),
            characters_per_line: Arc::new(|| DEFAULT_LINE_WIDTH),
            preprocess: Arc::new(|_: &mut LogRecord| Ok(())),
            level: LogLevel::default(),
            stack_index: 0,
            root_dir: None,
            resolver_timeout: Some(DEFAULT_RESOLVER_TIMEOUT),
            escape_control_chars: true,
        }
    }
}

impl LogConfig {
    /// Defaults with `overrides` applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] for a malformed
    /// `dateformat`, `index_format` or `level`.
    pub fn merge(overrides: ConfigOverrides) -> Result<Self> {
        Self::default().apply(overrides)
    }

    /// Parse [`ConfigOverrides`] from JSON and merge them over the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        Self::merge(overrides)
    }

    /// Replace every field that `overrides` sets
    pub fn apply(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(dateformat) = overrides.dateformat {
            self.timestamp_format = dateformat.parse()?;
        }
        if let Some(index_format) = overrides.index_format {
            self.index_format = index_format.parse()?;
        }
        if let Some(width) = overrides.characters_per_line {
            self.characters_per_line = Arc::new(move || width);
        }
        if let Some(level) = overrides.level {
            self.level = level
                .parse()
                .map_err(|message: String| LoggerError::config("level", message))?;
        }
        if let Some(stack_index) = overrides.stack_index {
            self.stack_index = stack_index;
        }
        if let Some(root_dir) = overrides.root_dir {
            self.root_dir = Some(root_dir);
        }
        if let Some(millis) = overrides.resolver_timeout_ms {
            self.resolver_timeout = (millis > 0).then(|| Duration::from_millis(millis));
        }
        if let Some(escape) = overrides.escape_control_chars {
            self.escape_control_chars = escape;
        }
        Ok(self)
    }

    /// Current line width
    pub fn line_width(&self) -> usize {
        (self.characters_per_line)()
    }

    /// Whether the format references the call site.
    ///
    /// Checked case-insensitively: `{{FILE}}` still triggers a stack capture,
    /// even though rendering it will fail lookup.
    pub fn needs_stack(&self) -> bool {
        placeholders(&self.format).any(|path| {
            LOCATION_PLACEHOLDERS
                .iter()
                .any(|key| path.eq_ignore_ascii_case(key))
        })
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogConfig")
            .field("format", &self.format)
            .field("timestamp_format", &self.timestamp_format)
            .field("index_format", &self.index_format)
            .field("characters_per_line", &self.line_width())
            .field("level", &self.level)
            .field("stack_index", &self.stack_index)
            .field("root_dir", &self.root_dir)
            .field("resolver_timeout", &self.resolver_timeout)
            .field("escape_control_chars", &self.escape_control_chars)
            .finish_non_exhaustive()
    }
}

/// User overrides; every present field replaces the default.
///
/// # Example
///
/// ```
/// use rust_ordered_logger::core::{LogConfig, LogLevel};
///
/// let config = LogConfig::from_json(r#"{
///     "format": "{{index}} {{message}}",
///     "index_format": "%05s",
///     "level": "debug"
/// }"#).unwrap();
///
/// assert_eq!(config.level, LogLevel::Debug);
/// assert_eq!(config.index_format.format(7), "00007");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub format: Option<String>,
    /// Named format (`isoDateTime`, `unixMillis`, ...) or strftime pattern
    pub dateformat: Option<String>,
    /// `%[-][0][width](s|d)`
    pub index_format: Option<String>,
    pub characters_per_line: Option<usize>,
    pub level: Option<String>,
    pub stack_index: Option<usize>,
    pub root_dir: Option<PathBuf>,
    /// `0` disables the timeout
    pub resolver_timeout_ms: Option<u64>,
    pub escape_control_chars: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.format, DEFAULT_FORMAT);
        assert_eq!(config.timestamp_format, TimestampFormat::IsoDateTime);
        assert_eq!(config.index_format.format(1), "001");
        assert_eq!(config.line_width(), 180);
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.stack_index, 0);
        assert_eq!(config.resolver_timeout, Some(DEFAULT_RESOLVER_TIMEOUT));
        assert!(config.escape_control_chars);
    }

    #[test]
    fn test_merge_replaces_present_fields_only() {
        let config = LogConfig::merge(ConfigOverrides {
            format: Some("{{message}}".to_string()),
            characters_per_line: Some(80),
            stack_index: Some(2),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.format, "{{message}}");
        assert_eq!(config.line_width(), 80);
        assert_eq!(config.stack_index, 2);
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.timestamp_format, TimestampFormat::IsoDateTime);
    }

    #[test]
    fn test_merge_rejects_malformed_values() {
        let bad_date = ConfigOverrides {
            dateformat: Some("%Y-%Q".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            LogConfig::merge(bad_date),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        let bad_index = ConfigOverrides {
            index_format: Some("3".to_string()),
            ..Default::default()
        };
        assert!(LogConfig::merge(bad_index).is_err());

        let bad_level = ConfigOverrides {
            level: Some("loud".to_string()),
            ..Default::default()
        };
        assert!(LogConfig::merge(bad_level).is_err());
    }

    #[test]
    fn test_from_json() {
        let config = LogConfig::from_json(
            r#"{"dateformat": "unix", "level": "off", "resolver_timeout_ms": 0}"#,
        )
        .unwrap();
        assert_eq!(config.timestamp_format, TimestampFormat::Unix);
        assert_eq!(config.level, LogLevel::Disabled);
        assert_eq!(config.resolver_timeout, None);

        assert!(LogConfig::from_json(r#"{"colour": true}"#).is_err());
    }

    #[test]
    fn test_needs_stack() {
        let mut config = LogConfig::default();
        assert!(config.needs_stack());

        config.format = "{{timestamp}} {{message}}".to_string();
        assert!(!config.needs_stack());

        config.format = "{{message}} at {{Pos}}".to_string();
        assert!(config.needs_stack());

        config.format = "{{method}}".to_string();
        assert!(config.needs_stack());
    }
}
