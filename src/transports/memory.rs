//! In-memory transport

use crate::core::{LogRecord, Result, Transport};
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every dispatched record in memory.
///
/// Clones share the same buffer, so a clone can be handed to the logger and
/// the original kept for inspection.
///
/// # Example
///
/// ```
/// use rust_ordered_logger::prelude::*;
///
/// let memory = MemoryTransport::new();
/// let logger = Logger::builder()
///     .format("{{index}} {{message}}")
///     .transport(memory.clone())
///     .build()
///     .unwrap();
///
/// logger.info("hello");
/// logger.flush().unwrap();
/// assert_eq!(memory.outputs(), vec!["001 hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records received so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Rendered lines received so far
    pub fn outputs(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.output.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Transport for MemoryTransport {
    fn dispatch(&mut self, record: &LogRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_clones_share_buffer() {
        let memory = MemoryTransport::new();
        let mut sink = memory.clone();

        let mut record = LogRecord::new(LogLevel::Info, "kept".to_string());
        record.output = "001 kept".to_string();
        sink.dispatch(&record).unwrap();

        assert_eq!(memory.len(), 1);
        assert_eq!(memory.outputs(), vec!["001 kept".to_string()]);
        assert_eq!(memory.records()[0].message, "kept");

        memory.clear();
        assert!(sink.is_empty());
    }
}
