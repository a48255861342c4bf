//! JSON transport for structured logging

use crate::core::{LogRecord, Result, Transport};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON file transport for structured logging
///
/// Writes each record, location fields and rendered `output` included, as a
/// single-line JSON object (JSONL format).
pub struct JsonTransport {
    writer: BufWriter<File>,
    pretty: bool,
}

impl JsonTransport {
    /// Create a new JSON transport
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, false)
    }

    /// Create a new JSON transport with pretty printing
    pub fn new_pretty<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, true)
    }

    fn open<P: AsRef<Path>>(path: P, pretty: bool) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            pretty,
        })
    }
}

impl Transport for JsonTransport {
    fn name(&self) -> &str {
        "json"
    }

    fn dispatch(&mut self, record: &LogRecord) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };

        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonTransport {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, SourceLocation};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_transport() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let mut transport = JsonTransport::new(&log_path)?;

        let mut record = LogRecord::new(LogLevel::Info, "User logged in".to_string())
            .with_location(SourceLocation {
                callee: "login".to_string(),
                path: "./src/auth.rs".to_string(),
                file: "./src/auth.rs".to_string(),
                folder: "src/auth.rs".to_string(),
                line: 88,
                column: 13,
            });
        record.output = "rendered".to_string();

        transport.dispatch(&record)?;
        transport.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: serde_json::Value = serde_json::from_str(content.trim())?;
        assert_eq!(parsed["message"], "User logged in");
        assert_eq!(parsed["level"], 4);
        assert_eq!(parsed["callee"], "login");
        assert_eq!(parsed["method"], "login");
        assert_eq!(parsed["line"], 88);
        assert_eq!(parsed["pos"], 13);
        assert_eq!(parsed["output"], "rendered");

        Ok(())
    }

    #[test]
    fn test_json_transport_multiple_records() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test_multiple.jsonl");

        let mut transport = JsonTransport::new(&log_path)?;

        for i in 0..5 {
            let record = LogRecord::new(LogLevel::Debug, format!("Iteration {}", i));
            transport.dispatch(&record)?;
        }

        transport.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);

        // Each line should be valid JSON
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line)?;
            assert!(parsed["message"].is_string());
            assert!(parsed["level"].is_number());
        }

        Ok(())
    }
}
