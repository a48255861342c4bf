//! Record pipeline: assemble, locate, preprocess, render, dispatch
//!
//! Runs on the queue worker, one record at a time. The only suspension point
//! is the source-map lookup; everything after it is synchronous.

use super::config::{DiagnosticCallback, LogConfig};
use super::error::{panic_message, LoggerError, Result};
use super::locator::StackLocator;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::metrics::LoggerMetrics;
use super::resolver::SourceMapResolver;
use super::template::{align, render_value, split_rhs};
use super::transport::Transport;
use futures::FutureExt;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A log call that passed the level gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub level: LogLevel,
    pub message: String,
    /// Stack snapshot taken at the call site, if the format needs one
    pub stack: Option<String>,
}

impl LogRequest {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }
}

pub struct RecordPipeline {
    config: LogConfig,
    locator: StackLocator,
    transports: Vec<Mutex<Box<dyn Transport>>>,
    index: AtomicU64,
    metrics: Arc<LoggerMetrics>,
    diagnostics: DiagnosticCallback,
}

impl RecordPipeline {
    pub fn new(
        config: LogConfig,
        resolver: Arc<dyn SourceMapResolver>,
        transports: Vec<Box<dyn Transport>>,
        metrics: Arc<LoggerMetrics>,
        diagnostics: DiagnosticCallback,
    ) -> Self {
        let locator =
            StackLocator::new(resolver, config.stack_index).with_timeout(config.resolver_timeout);

        Self {
            config,
            locator,
            transports: transports.into_iter().map(Mutex::new).collect(),
            index: AtomicU64::new(0),
            metrics,
            diagnostics,
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Turn a request into a dispatched record.
    ///
    /// Failures are counted and reported to the diagnostic callback before
    /// being returned; only the failing record is lost.
    pub async fn process(&self, request: LogRequest) -> Result<LogRecord> {
        let result = self.build(request).await;
        match &result {
            Ok(_) => {
                self.metrics.record_dispatched();
            }
            Err(e) => {
                self.metrics.record_failed();
                self.report(e);
            }
        }
        result
    }

    async fn build(&self, request: LogRequest) -> Result<LogRecord> {
        let mut record = self.assemble(request.level, request.message);

        if let Some(stack) = request.stack {
            self.locate(&mut record, &stack).await;
        }

        self.preprocess(&mut record)?;
        record.output = self.render(&record)?;
        self.dispatch(&record)?;
        Ok(record)
    }

    fn assemble(&self, level: LogLevel, message: String) -> LogRecord {
        let sequence = self.index.fetch_add(1, Ordering::SeqCst) + 1;
        let message = if self.config.escape_control_chars {
            LogRecord::sanitize_message(&message)
        } else {
            message
        };

        let mut record = LogRecord::new(level, message);
        record.sequence = sequence;
        record.index = self.config.index_format.format(sequence);
        record.timestamp = self.config.timestamp_format.now();
        record
    }

    /// Fill the location fields; on any failure they stay empty
    async fn locate(&self, record: &mut LogRecord, stack: &str) {
        let located = AssertUnwindSafe(self.locator.locate(stack))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(LoggerError::resolver(
                    stack.lines().nth(1).unwrap_or(stack).trim(),
                    format!("resolver panicked: {}", panic_message(payload.as_ref())),
                ))
            });

        match located {
            Ok(location) => record.apply_location(location),
            Err(e) => {
                self.metrics.record_unresolved_location();
                self.report(&e);
            }
        }
    }

    fn preprocess(&self, record: &mut LogRecord) -> Result<()> {
        match catch_unwind(AssertUnwindSafe(|| (self.config.preprocess)(record))) {
            Ok(result) => result,
            Err(payload) => Err(LoggerError::hook("preprocess", panic_message(payload.as_ref()))),
        }
    }

    /// Render the configured format, right-aligning the `{{rhs}}` half
    pub fn render(&self, record: &LogRecord) -> Result<String> {
        let data = serde_json::to_value(record)?;

        match split_rhs(&self.config.format) {
            (lhs, Some(rhs)) => {
                let left = render_value(lhs, &data)?;
                let right = render_value(rhs, &data)?;
                Ok(align(&left, &right, self.config.line_width()))
            }
            (format, None) => render_value(format, &data),
        }
    }

    /// Hand the record to every transport; the first failure is returned.
    ///
    /// **Per-Transport Panic Isolation**: a transport that fails or panics
    /// does not stop the others from receiving the record.
    fn dispatch(&self, record: &LogRecord) -> Result<()> {
        self.for_each_transport(|transport| transport.dispatch(record))
    }

    /// Flush every transport
    pub fn flush_transports(&self) -> Result<()> {
        self.for_each_transport(|transport| transport.flush())
    }

    fn for_each_transport<F>(&self, mut op: F) -> Result<()>
    where
        F: FnMut(&mut dyn Transport) -> Result<()>,
    {
        let mut first_error = None;

        for transport in &self.transports {
            let mut transport = transport.lock();
            let error = match catch_unwind(AssertUnwindSafe(|| op(transport.as_mut()))) {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(payload) => LoggerError::TransportPanicked {
                    name: transport.name().to_string(),
                    message: panic_message(payload.as_ref()),
                },
            };

            if first_error.is_none() {
                first_error = Some(error);
            } else {
                self.report(&error);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn report(&self, error: &LoggerError) {
        (self.diagnostics)(error);
    }
}
