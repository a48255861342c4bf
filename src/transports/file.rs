//! File transport implementation

use crate::core::{LogRecord, Result, Transport};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends each rendered line to a file
pub struct FileTransport {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Transport for FileTransport {
    fn dispatch(&mut self, record: &LogRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.output)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileTransport {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_transport_appends_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");

        let mut transport = FileTransport::new(&log_path)?;
        for i in 1..=3 {
            let mut record = LogRecord::new(LogLevel::Info, format!("entry {}", i));
            record.output = format!("00{} entry {}", i, i);
            transport.dispatch(&record)?;
        }
        transport.flush()?;

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content, "001 entry 1\n002 entry 2\n003 entry 3\n");
        Ok(())
    }

    #[test]
    fn test_file_transport_keeps_existing_content() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("existing.log");
        fs::write(&log_path, "previous run\n")?;

        {
            let mut transport = FileTransport::new(&log_path)?;
            let mut record = LogRecord::new(LogLevel::Warn, "again".to_string());
            record.output = "again".to_string();
            transport.dispatch(&record)?;
            // Dropping flushes
        }

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content, "previous run\nagain\n");
        Ok(())
    }
}
