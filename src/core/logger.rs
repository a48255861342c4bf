//! Main logger implementation

use super::{
    config::{stderr_diagnostics, ConfigOverrides, DiagnosticCallback, LogConfig},
    error::{LoggerError, Result},
    index_format::IndexFormat,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    pipeline::{LogRequest, RecordPipeline},
    queue::{OrderedQueue, TaskHandle},
    resolver::{IdentityResolver, SourceMapResolver},
    stack::{BacktraceCapture, StackCapture},
    timestamp::TimestampFormat,
    transport::Transport,
};
use crate::transports::ConsoleTransport;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub use super::queue::DEFAULT_SHUTDOWN_TIMEOUT;

/// Ordered, source-located logger.
///
/// Every call that passes the level threshold becomes one record, rendered
/// and dispatched strictly in call order, even though resolving the call
/// site is asynchronous. Calls never block on that work and never fail;
/// problems are reported through the diagnostic callback instead.
///
/// # Example
///
/// ```
/// use rust_ordered_logger::prelude::*;
///
/// let memory = MemoryTransport::new();
/// let logger = Logger::builder()
///     .format("{{index}} <{{title}}> {{message}}")
///     .transport(memory.clone())
///     .build()
///     .unwrap();
///
/// logger.info("started");
/// logger.debug("hidden at the default INFO threshold");
/// logger.warn("disk at 91%");
/// logger.flush().unwrap();
///
/// assert_eq!(memory.outputs(), vec!["001 <INFO> started", "002 <WARN> disk at 91%"]);
/// ```
pub struct Logger {
    threshold: RwLock<LogLevel>,
    needs_stack: bool,
    stack_capture: Arc<dyn StackCapture>,
    pipeline: Arc<RecordPipeline>,
    queue: OrderedQueue,
    metrics: Arc<LoggerMetrics>,
    diagnostics: DiagnosticCallback,
}

impl Logger {
    /// Logger with the default configuration and console output
    pub fn new() -> Result<Self> {
        LoggerBuilder::new().build()
    }

    /// Logger for an already resolved configuration
    pub fn with_config(config: LogConfig) -> Result<Self> {
        LoggerBuilder::new().config(config).build()
    }

    #[inline(never)]
    pub fn log(&self, message: impl Into<String>) {
        let _ = self.enqueue(LogLevel::Log, message.into());
    }

    #[inline(never)]
    pub fn trace(&self, message: impl Into<String>) {
        let _ = self.enqueue(LogLevel::Trace, message.into());
    }

    #[inline(never)]
    pub fn debug(&self, message: impl Into<String>) {
        let _ = self.enqueue(LogLevel::Debug, message.into());
    }

    #[inline(never)]
    pub fn info(&self, message: impl Into<String>) {
        let _ = self.enqueue(LogLevel::Info, message.into());
    }

    #[inline(never)]
    pub fn warn(&self, message: impl Into<String>) {
        let _ = self.enqueue(LogLevel::Warn, message.into());
    }

    #[inline(never)]
    pub fn error(&self, message: impl Into<String>) {
        let _ = self.enqueue(LogLevel::Error, message.into());
    }

    #[inline(never)]
    pub fn fatal(&self, message: impl Into<String>) {
        let _ = self.enqueue(LogLevel::Fatal, message.into());
    }

    /// Log at a level chosen at runtime
    #[inline(never)]
    pub fn log_at(&self, level: LogLevel, message: impl Into<String>) {
        let _ = self.enqueue(level, message.into());
    }

    /// Log and keep a handle on the outcome.
    ///
    /// Returns `None` when the call is below the threshold. The handle settles
    /// with the dispatched record, or with the error that lost it.
    #[inline(never)]
    pub fn submit(
        &self,
        level: LogLevel,
        message: impl Into<String>,
    ) -> Option<TaskHandle<LogRecord>> {
        self.enqueue(level, message.into())
    }

    /// Gate, snapshot the stack, and queue the record.
    ///
    /// Must be called directly from the public methods above: the stack
    /// locator drops exactly two logger frames, this one and its caller.
    #[inline(never)]
    fn enqueue(&self, level: LogLevel, message: String) -> Option<TaskHandle<LogRecord>> {
        if !level.passes(*self.threshold.read()) {
            self.metrics.record_suppressed();
            return None;
        }

        if !self.queue.is_running() {
            (self.diagnostics)(&LoggerError::LoggerStopped);
            return Some(self.queue.enqueue(async { Err(LoggerError::LoggerStopped) }));
        }

        let stack = if self.needs_stack {
            self.stack_capture.capture()
        } else {
            None
        };

        self.metrics.record_submitted();
        let request = LogRequest::new(level, message).with_stack(stack);
        let pipeline = Arc::clone(&self.pipeline);
        Some(self.queue.enqueue(async move { pipeline.process(request).await }))
    }

    /// Change the threshold for subsequent calls
    pub fn set_level(&self, level: LogLevel) {
        *self.threshold.write() = level;
    }

    pub fn level(&self) -> LogLevel {
        *self.threshold.read()
    }

    pub fn config(&self) -> &LogConfig {
        self.pipeline.config()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_ordered_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .transport(MemoryTransport::new())
    ///     .build()
    ///     .unwrap();
    /// logger.trace("below threshold");
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.suppressed(), 1);
    /// println!("Failure rate: {:.2}%", metrics.failure_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Number of records queued and not yet settled
    pub fn pending(&self) -> usize {
        self.queue.pending()
    }

    /// Block until every earlier record is dispatched, then flush transports.
    ///
    /// # Panics
    ///
    /// Panics when called from async code; use [`Logger::flushed`] there.
    pub fn flush(&self) -> Result<()> {
        self.flush_barrier().wait()
    }

    /// Async form of [`Logger::flush`]
    pub async fn flushed(&self) -> Result<()> {
        self.flush_barrier().await
    }

    fn flush_barrier(&self) -> TaskHandle<()> {
        let pipeline = Arc::clone(&self.pipeline);
        self.queue.enqueue(async move { pipeline.flush_transports() })
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Pending records are dispatched and transports flushed before the
    /// worker stops. Calls made afterwards are reported and discarded.
    ///
    /// **Note**: When the logger is dropped without calling `shutdown()` explicitly,
    /// it uses [`DEFAULT_SHUTDOWN_TIMEOUT`] (5 seconds).
    ///
    /// # Returns
    ///
    /// `true` if shutdown completed successfully within timeout, `false` otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_ordered_logger::Logger;
    /// use std::time::Duration;
    ///
    /// let mut logger = Logger::new().unwrap();
    /// logger.info("Important message");
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        if !self.queue.is_running() {
            return true;
        }

        let mut flushed = self.flush_barrier();
        if !self.queue.shutdown(timeout) {
            return false;
        }

        match flushed.try_result() {
            Some(Ok(())) => true,
            Some(Err(e)) => {
                (self.diagnostics)(&e);
                false
            }
            None => false,
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        // Report any lost records
        let failed = self.metrics.failed();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} lost records (failure rate: {:.2}%)",
                failed,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Setters override the defaults of [`LogConfig`]. A malformed value is
/// reported by [`LoggerBuilder::build`].
///
/// # Example
/// ```
/// use rust_ordered_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .format("{{timestamp}} {{index}} <{{title}}> {{message}}")
///     .dateformat("%H:%M:%S")
///     .index_format("%05s")
///     .transport(MemoryTransport::new())
///     .diagnostics(|error| eprintln!("logger problem: {}", error))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    config: LogConfig,
    transports: Vec<Box<dyn Transport>>,
    resolver: Option<Arc<dyn SourceMapResolver>>,
    stack_capture: Arc<dyn StackCapture>,
    diagnostics: DiagnosticCallback,
    error: Option<LoggerError>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
            transports: Vec::new(),
            resolver: None,
            stack_capture: Arc::new(BacktraceCapture::new()),
            diagnostics: stderr_diagnostics(),
            error: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply user overrides on top of the current configuration
    #[must_use = "builder methods return a new value"]
    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        match self.config.clone().apply(overrides) {
            Ok(config) => self.config = config,
            Err(e) => self.fail(e),
        }
        self
    }

    /// Set the initial threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.config.format = format.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Named timestamp format or strftime pattern
    #[must_use = "builder methods return a new value"]
    pub fn dateformat(mut self, format: &str) -> Self {
        match format.parse() {
            Ok(format) => self.config.timestamp_format = format,
            Err(e) => self.fail(e),
        }
        self
    }

    /// printf-style index width such as `%03s`
    #[must_use = "builder methods return a new value"]
    pub fn index_format(mut self, format: &str) -> Self {
        match format.parse::<IndexFormat>() {
            Ok(format) => self.config.index_format = format,
            Err(e) => self.fail(e),
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn characters_per_line(mut self, width: usize) -> Self {
        self.config.characters_per_line = Arc::new(move || width);
        self
    }

    /// Line width computed per record, e.g. from the terminal size
    #[must_use = "builder methods return a new value"]
    pub fn line_width_fn<F>(mut self, width: F) -> Self
    where
        F: Fn() -> usize + Send + Sync + 'static,
    {
        self.config.characters_per_line = Arc::new(width);
        self
    }

    /// Hook that may rewrite each record before it is rendered
    #[must_use = "builder methods return a new value"]
    pub fn preprocess<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut LogRecord) -> Result<()> + Send + Sync + 'static,
    {
        self.config.preprocess = Arc::new(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stack_index(mut self, index: usize) -> Self {
        self.config.stack_index = index;
        self
    }

    /// Project root stripped from file paths by the default resolver
    #[must_use = "builder methods return a new value"]
    pub fn root_dir(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root_dir = Some(root.into());
        self
    }

    /// Bound on each source-map lookup; `None` waits indefinitely
    #[must_use = "builder methods return a new value"]
    pub fn resolver_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.resolver_timeout = timeout;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn escape_control_chars(mut self, escape: bool) -> Self {
        self.config.escape_control_chars = escape;
        self
    }

    /// Add a transport; without any, records go to the console
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transports.push(Box::new(transport));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn resolver<R: SourceMapResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stack_capture<C: StackCapture + 'static>(mut self, capture: C) -> Self {
        self.stack_capture = Arc::new(capture);
        self
    }

    /// Receive the logger's own failures instead of printing them to stderr
    #[must_use = "builder methods return a new value"]
    pub fn diagnostics<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LoggerError) + Send + Sync + 'static,
    {
        self.diagnostics = Arc::new(callback);
        self
    }

    fn fail(&mut self, error: LoggerError) {
        self.error.get_or_insert(error);
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting, or an IO error if the queue worker
    /// cannot be started.
    pub fn build(self) -> Result<Logger> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let config = self.config;
        let resolver = self.resolver.unwrap_or_else(|| {
            let resolver = match &config.root_dir {
                Some(root) => IdentityResolver::new().with_root_dir(root.clone()),
                None => IdentityResolver::new(),
            };
            Arc::new(resolver)
        });

        let mut transports = self.transports;
        if transports.is_empty() {
            transports.push(Box::new(ConsoleTransport::new()));
        }

        let metrics = Arc::new(LoggerMetrics::new());
        let threshold = RwLock::new(config.level);
        let needs_stack = config.needs_stack();
        let pipeline = RecordPipeline::new(
            config,
            resolver,
            transports,
            Arc::clone(&metrics),
            Arc::clone(&self.diagnostics),
        );

        Ok(Logger {
            threshold,
            needs_stack,
            stack_capture: self.stack_capture,
            pipeline: Arc::new(pipeline),
            queue: OrderedQueue::new()?,
            metrics,
            diagnostics: self.diagnostics,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
