//! Transport trait for log output destinations

use super::{error::Result, log_record::LogRecord};
use std::fmt;

/// Final sink for rendered records.
///
/// Transports run on the queue worker, one record at a time and in call
/// order. `record.output` holds the rendered line.
pub trait Transport: Send {
    fn dispatch(&mut self, record: &LogRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Transport backed by a closure
///
/// # Example
///
/// ```
/// use rust_ordered_logger::core::{FnTransport, Transport};
///
/// let transport = FnTransport::new("stdout", |record| {
///     println!("{}", record.output);
///     Ok(())
/// });
/// assert_eq!(transport.name(), "stdout");
/// ```
pub struct FnTransport<F> {
    name: String,
    dispatch: F,
}

impl<F> FnTransport<F>
where
    F: FnMut(&LogRecord) -> Result<()> + Send,
{
    pub fn new(name: impl Into<String>, dispatch: F) -> Self {
        Self {
            name: name.into(),
            dispatch,
        }
    }
}

impl<F> Transport for FnTransport<F>
where
    F: FnMut(&LogRecord) -> Result<()> + Send,
{
    fn dispatch(&mut self, record: &LogRecord) -> Result<()> {
        (self.dispatch)(record)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransport").field("name", &self.name).finish()
    }
}
