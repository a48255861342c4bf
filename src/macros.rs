//! Logging macros for ergonomic log message formatting.
//!
//! These macros interpolate with `format!` and then call the matching
//! [`Logger`](crate::Logger) method directly, so the reported call site is
//! the macro invocation.
//!
//! # Examples
//!
//! ```
//! use rust_ordered_logger::prelude::*;
//! use rust_ordered_logger::{info, log_at};
//!
//! let logger = Logger::builder()
//!     .transport(MemoryTransport::new())
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! log_at!(logger, LogLevel::Warn, "Retry {} of {}", 2, 5);
//! ```

/// Log at the `LOG` severity, the lowest one.
///
/// # Examples
///
/// ```
/// # use rust_ordered_logger::prelude::*;
/// # let logger = Logger::builder().transport(MemoryTransport::new()).build().unwrap();
/// use rust_ordered_logger::log;
/// logger.set_level(LogLevel::Log);
/// log!(logger, "Simple message");
/// log!(logger, "Counter: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(format!($($arg)+))
    };
}

/// Log at a level chosen at runtime.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_ordered_logger::prelude::*;
/// # let logger = Logger::builder().transport(MemoryTransport::new()).build().unwrap();
/// use rust_ordered_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format!($($arg)+))
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_ordered_logger::prelude::*;
/// # let logger = Logger::builder().transport(MemoryTransport::new()).build().unwrap();
/// use rust_ordered_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}

/// Log a fatal-level message; passes every threshold except `Disabled`.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};
    use crate::transports::MemoryTransport;

    fn logger(memory: &MemoryTransport) -> Logger {
        Logger::builder()
            .format("{{title}} {{message}}")
            .level(LogLevel::Log)
            .transport(memory.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_severity_macros_format_arguments() {
        let memory = MemoryTransport::new();
        let logger = logger(&memory);

        log!(logger, "plain");
        trace!(logger, "Value: {}", 10);
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");
        logger.flush().unwrap();

        assert_eq!(
            memory.outputs(),
            vec![
                "LOG plain",
                "TRACE Value: 10",
                "DEBUG Count: 5",
                "INFO Items: 100",
                "WARN Retry 1 of 3",
                "ERROR Code: 500",
                "FATAL Critical failure: system",
            ]
        );
    }

    #[test]
    fn test_log_at_macro() {
        let memory = MemoryTransport::new();
        let logger = logger(&memory);

        let level = LogLevel::Error;
        log_at!(logger, level, "runtime level {}", level);
        logger.flush().unwrap();

        assert_eq!(memory.outputs(), vec!["ERROR runtime level ERROR"]);
    }
}
