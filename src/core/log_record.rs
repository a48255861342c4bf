//! Log record structure

use super::log_level::LogLevel;
use serde::{Serialize, Serializer};

/// Resolved call-site location of a log call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Original function name, empty when unknown
    pub callee: String,
    /// Raw location text as captured in the stack frame
    pub path: String,
    /// `./`-prefixed file path relative to the project root
    pub file: String,
    /// Short file path, without the `./` prefix
    pub folder: String,
    pub line: u32,
    pub column: u32,
}

/// A record in flight through the pipeline.
///
/// Serialized field names are the template placeholders (`{{index}}`,
/// `{{title}}`, `{{file}}`, ...). `level` renders as its numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Formatted per-logger index
    pub index: String,
    /// Raw per-logger index, starting at 1
    pub sequence: u64,
    pub timestamp: String,
    pub title: String,
    #[serde(serialize_with = "serialize_level")]
    pub level: LogLevel,
    pub message: String,
    pub callee: String,
    /// Same as `callee`
    pub method: String,
    pub path: String,
    pub file: String,
    pub folder: String,
    pub line: u32,
    pub pos: u32,
    /// Rendered line, filled last
    pub output: String,
}

fn serialize_level<S: Serializer>(level: &LogLevel, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(level.as_u8())
}

impl LogRecord {
    /// Escape newlines, carriage returns and tabs so one call yields one line
    pub fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            index: String::new(),
            sequence: 0,
            timestamp: String::new(),
            title: level.to_str().to_string(),
            level,
            message,
            callee: String::new(),
            method: String::new(),
            path: String::new(),
            file: String::new(),
            folder: String::new(),
            line: 0,
            pos: 0,
            output: String::new(),
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.apply_location(location);
        self
    }

    pub fn apply_location(&mut self, location: SourceLocation) {
        self.method = location.callee.clone();
        self.callee = location.callee;
        self.path = location.path;
        self.file = location.file;
        self.folder = location.folder;
        self.line = location.line;
        self.pos = location.column;
    }

    /// Whether stack resolution populated the location fields
    pub fn has_location(&self) -> bool {
        !self.file.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_empty_location() {
        let record = LogRecord::new(LogLevel::Warn, "disk low".to_string());
        assert_eq!(record.title, "WARN");
        assert_eq!(record.line, 0);
        assert_eq!(record.pos, 0);
        assert!(record.callee.is_empty());
        assert!(!record.has_location());
    }

    #[test]
    fn test_with_location() {
        let record = LogRecord::new(LogLevel::Info, "hi".to_string()).with_location(
            SourceLocation {
                callee: "setCounter".to_string(),
                path: "http://localhost:3000/src/counter.ts".to_string(),
                file: "./src/counter.ts".to_string(),
                folder: "src".to_string(),
                line: 12,
                column: 5,
            },
        );

        assert!(record.has_location());
        assert_eq!(record.callee, "setCounter");
        assert_eq!(record.line, 12);
        assert_eq!(record.pos, 5);
    }

    #[test]
    fn test_level_serializes_as_number() {
        let record = LogRecord::new(LogLevel::Error, "boom".to_string());
        let value = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(value["level"], 6);
        assert_eq!(value["title"], "ERROR");
    }

    #[test]
    fn test_sanitize_message() {
        assert_eq!(
            LogRecord::sanitize_message("a\nb\rc\td"),
            "a\\nb\\rc\\td"
        );
    }
}
