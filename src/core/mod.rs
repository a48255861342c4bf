//! Core logger types and traits

pub mod config;
pub mod error;
pub mod index_format;
pub mod locator;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod pipeline;
pub mod queue;
pub mod resolver;
pub mod stack;
pub mod template;
pub mod timestamp;
pub mod transport;

pub use config::{
    stderr_diagnostics, ConfigOverrides, DiagnosticCallback, LineWidthFn, LogConfig,
    PreprocessHook, DEFAULT_FORMAT, DEFAULT_LINE_WIDTH, DEFAULT_RESOLVER_TIMEOUT,
};
pub use error::{LoggerError, Result};
pub use index_format::IndexFormat;
pub use locator::StackLocator;
pub use log_level::LogLevel;
pub use log_record::{LogRecord, SourceLocation};
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use pipeline::{LogRequest, RecordPipeline};
pub use queue::{OrderedQueue, TaskHandle};
pub use resolver::{IdentityResolver, ResolvedLocation, SourceMapResolver};
pub use stack::{BacktraceCapture, FrameShape, ParsedFrame, RawFrame, StackCapture};
pub use timestamp::TimestampFormat;
pub use transport::{FnTransport, Transport};
