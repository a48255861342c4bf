//! Error types for the logger system

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Template placeholder whose path is absent from the record
    #[error("Template key '{key}' not found in {tag}")]
    MissingKey { key: String, tag: String },

    /// Nothing left of the stack once the logger's own frames are dropped
    #[error("No stack frames available after dropping {dropped} leading lines")]
    NoFramesAvailable { dropped: usize },

    /// Selected stack frame matches none of the known dialects
    #[error("Unable to decode stack frame: {frame}")]
    StackParse { frame: String },

    /// Source-map resolver rejected the frame or returned nothing
    #[error("Source map resolution failed for '{frame}': {message}")]
    Resolver { frame: String, message: String },

    /// Source-map resolver did not settle in time
    #[error("Source map resolution for '{frame}' timed out after {timeout:?}")]
    ResolverTimeout { frame: String, timeout: Duration },

    /// User supplied hook returned an error
    #[error("{hook} hook failed: {message}")]
    Hook { hook: String, message: String },

    /// Transport panicked while dispatching a record
    #[error("Transport '{name}' panicked: {message}")]
    TransportPanicked { name: String, message: String },

    /// Queued task panicked
    #[error("Queued task panicked: {0}")]
    TaskPanicked(String),

    /// Logger already stopped
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Completion channel dropped before the task settled
    #[error("Failed to receive task result from queue worker")]
    ChannelReceiveError,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a missing template key error
    pub fn missing_key(key: impl Into<String>, tag: impl Into<String>) -> Self {
        LoggerError::MissingKey {
            key: key.into(),
            tag: tag.into(),
        }
    }

    /// Create a stack parse error
    pub fn stack_parse(frame: impl Into<String>) -> Self {
        LoggerError::StackParse {
            frame: frame.into(),
        }
    }

    /// Create a resolver failure
    pub fn resolver(frame: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Resolver {
            frame: frame.into(),
            message: message.into(),
        }
    }

    /// Create a hook failure
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Hook {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error only means the call site could not be determined.
    ///
    /// Location errors never fail a record; it is emitted without location fields.
    pub fn is_location_error(&self) -> bool {
        matches!(
            self,
            LoggerError::NoFramesAvailable { .. }
                | LoggerError::StackParse { .. }
                | LoggerError::Resolver { .. }
                | LoggerError::ResolverTimeout { .. }
        )
    }
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("IndexFormat", "width missing");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::missing_key("nope", "{{nope}}");
        assert!(matches!(err, LoggerError::MissingKey { .. }));

        let err = LoggerError::resolver("at main (app.js:1:1)", "no source map");
        assert!(matches!(err, LoggerError::Resolver { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::missing_key("nope", "{{nope}}");
        assert_eq!(err.to_string(), "Template key 'nope' not found in {{nope}}");

        let err = LoggerError::config("format", "empty template");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for format: empty template"
        );

        let err = LoggerError::ResolverTimeout {
            frame: "app.js@1:2".to_string(),
            timeout: Duration::from_millis(250),
        };
        assert_eq!(
            err.to_string(),
            "Source map resolution for 'app.js@1:2' timed out after 250ms"
        );
    }

    #[test]
    fn test_location_error_classification() {
        assert!(LoggerError::NoFramesAvailable { dropped: 3 }.is_location_error());
        assert!(LoggerError::stack_parse("garbage").is_location_error());
        assert!(LoggerError::resolver("f", "m").is_location_error());
        assert!(!LoggerError::missing_key("k", "{{k}}").is_location_error());
        assert!(!LoggerError::LoggerStopped.is_location_error());
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "Unknown panic");
    }
}
