//! Console transport implementation

use crate::core::{LogLevel, LogRecord, Result, Transport};
#[cfg(feature = "console")]
use colored::Colorize;

/// Default transport: one rendered line per record.
///
/// WARN is yellow, ERROR and FATAL are red and go to stderr; everything else
/// is printed plain to stdout.
pub struct ConsoleTransport {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Apply the level's colour to a rendered line
    pub fn style(&self, record: &LogRecord) -> String {
        #[cfg(feature = "console")]
        {
            if let (true, Some(color)) = (self.use_colors, record.level.color_code()) {
                return record.output.color(color).to_string();
            }
        }
        record.output.clone()
    }

    fn is_error(level: LogLevel) -> bool {
        matches!(level, LogLevel::Error | LogLevel::Fatal)
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ConsoleTransport {
    fn dispatch(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.style(record);

        // Route Error and Fatal levels to stderr, others to stdout
        if Self::is_error(record.level) {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
