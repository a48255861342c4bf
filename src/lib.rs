//! # Rust Ordered Logger
//!
//! A structured logger that keeps output in call order while resolving the
//! source location of every call asynchronously.
//!
//! ## Features
//!
//! - **Strict Ordering**: records are rendered and dispatched one at a time,
//!   in the order the calls were made, even when call-site resolution is slow
//! - **Source Locations**: `{{file}}`, `{{line}}`, `{{callee}}` and friends,
//!   resolved through a pluggable source-map resolver
//! - **Templates**: `{{dotted.path}}` placeholders with a `{{rhs}}` marker for
//!   right-aligned columns
//! - **Multiple Transports**: console, file, JSON lines, in-memory, closures
//!
//! ## Example
//!
//! ```
//! use rust_ordered_logger::prelude::*;
//! use rust_ordered_logger::info;
//!
//! let logger = Logger::builder()
//!     .format("{{index}} <{{title}}>{{rhs}}{{file}}:{{line}}")
//!     .characters_per_line(100)
//!     .transport(MemoryTransport::new())
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "listening on port {}", 8080);
//! logger.flush().unwrap();
//! ```

pub mod core;
pub mod macros;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        ConfigOverrides, FnTransport, IdentityResolver, LogConfig, LogLevel, LogRecord, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, ResolvedLocation, Result, SourceMapResolver,
        TaskHandle, TimestampFormat, Transport, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::transports::{ConsoleTransport, FileTransport, JsonTransport, MemoryTransport};
}

pub use core::{
    ConfigOverrides, FnTransport, IdentityResolver, LogConfig, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, ResolvedLocation, Result, SourceMapResolver,
    TaskHandle, TimestampFormat, Transport, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use transports::{ConsoleTransport, FileTransport, JsonTransport, MemoryTransport};
