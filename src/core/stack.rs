//! Call stack capture and frame parsing
//!
//! A stack snapshot is plain text, one frame per line, in one of the common
//! dialects:
//!
//! ```text
//! Error
//!     at Logger.info (http://localhost:3000/src/logger.ts:90:10)
//!     at setCounter (http://localhost:3000/src/counter.ts:12:5)
//! ```
//!
//! or, without the leading `Error` line and in the `location@line:col` form
//! used by other engines. The logger's own call chain always occupies the
//! top two frames; [`select_frame`] drops them and picks the frame of
//! interest, and [`parse_frame`] turns it into a [`RawFrame`].

use super::error::{LoggerError, Result};
use regex::Regex;
use std::backtrace::Backtrace;
use std::sync::OnceLock;

/// Leading lines dropped from stacks that start with an `Error` line
pub const DROP_WITH_ERROR_LINE: usize = 3;

/// Leading lines dropped from stacks that start directly with frames
pub const DROP_WITHOUT_ERROR_LINE: usize = 2;

/// Captures the call stack synchronously at the log call site.
///
/// Implementations must return text whose first two frames (after an
/// optional `Error` line) are the logger's own: the internal enqueue step
/// and the public severity method.
pub trait StackCapture: Send + Sync {
    fn capture(&self) -> Option<String>;
}

/// Recognised frame dialects, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameShape {
    /// `at <callee> (<location>:<line>:<col>)`
    Named,
    /// `at <location>:<line>:<col>`
    Anonymous,
    /// `<location>@<line>:<col>`
    AtSign,
}

/// A stack frame split into its raw parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// The frame line as captured
    pub text: String,
    pub shape: FrameShape,
    pub callee: Option<String>,
    pub location: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFrame {
    Located(RawFrame),
    Unparsed(String),
}

fn frame_patterns() -> &'static [(FrameShape, Regex); 3] {
    static PATTERNS: OnceLock<[(FrameShape, Regex); 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |pattern: &str| Regex::new(pattern).expect("frame pattern is a valid regex");
        [
            (FrameShape::Named, compile(r"(?i)at\s+(.*)\s+\((.*):(\d+):(\d+)\)")),
            (FrameShape::Anonymous, compile(r"(?i)at\s+()(.*):(\d+):(\d+)")),
            (FrameShape::AtSign, compile(r"(?i).*?@()(.*):(\d+):(\d+)")),
        ]
    })
}

/// Number of leading lines that belong to the logger itself
pub fn dropped_lines(stack: &str) -> usize {
    if stack.starts_with("Error") {
        DROP_WITH_ERROR_LINE
    } else {
        DROP_WITHOUT_ERROR_LINE
    }
}

/// Pick the frame at `stack_index` once the logger's own lines are dropped.
///
/// Falls back to the first remaining frame when `stack_index` is out of range.
pub fn select_frame(stack: &str, stack_index: usize) -> Result<&str> {
    let dropped = dropped_lines(stack);
    let frames: Vec<&str> = stack.lines().skip(dropped).collect();

    frames
        .get(stack_index)
        .or_else(|| frames.first())
        .copied()
        .ok_or(LoggerError::NoFramesAvailable { dropped })
}

/// Match a frame line against the known dialects; first match wins
pub fn parse_frame(line: &str) -> ParsedFrame {
    for (shape, pattern) in frame_patterns() {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };

        let numbers = (
            caps.get(3).and_then(|m| m.as_str().parse::<u32>().ok()),
            caps.get(4).and_then(|m| m.as_str().parse::<u32>().ok()),
        );
        let (Some(line_no), Some(column)) = numbers else {
            continue;
        };

        let callee = caps
            .get(1)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let location = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

        return ParsedFrame::Located(RawFrame {
            text: line.trim().to_string(),
            shape: *shape,
            callee,
            location: location.to_string(),
            line: line_no,
            column,
        });
    }

    ParsedFrame::Unparsed(line.to_string())
}

/// [`select_frame`] then [`parse_frame`], failing on unparsed frames
pub fn locate_frame(stack: &str, stack_index: usize) -> Result<RawFrame> {
    match parse_frame(select_frame(stack, stack_index)?) {
        ParsedFrame::Located(frame) => Ok(frame),
        ParsedFrame::Unparsed(text) => Err(LoggerError::stack_parse(text)),
    }
}

/// Captures the native Rust call stack with [`std::backtrace::Backtrace`].
///
/// The backtrace is re-rendered in the `at <callee> (<file>:<line>:<col>)`
/// dialect behind an `Error` line, starting with the frame that called
/// [`StackCapture::capture`]. Symbols without debug info are rendered with
/// `<unknown>:0:0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture;

impl BacktraceCapture {
    pub fn new() -> Self {
        Self
    }
}

impl StackCapture for BacktraceCapture {
    #[inline(never)]
    fn capture(&self) -> Option<String> {
        let backtrace = Backtrace::force_capture();
        let rendered = render_backtrace(&backtrace.to_string());
        (rendered.lines().count() > 1).then_some(rendered)
    }
}

/// Convert `std::backtrace::Backtrace` display output into the V8 dialect.
///
/// Frames up to and including the capture machinery itself are skipped.
pub fn render_backtrace(backtrace: &str) -> String {
    let symbols = backtrace_symbols(backtrace);

    let start = symbols
        .iter()
        .rposition(|(name, _)| is_capture_machinery(name))
        .map_or(0, |i| i + 1);

    let mut out = String::from("Error");
    for (name, location) in &symbols[start..] {
        out.push_str("\n    at ");
        out.push_str(name);
        out.push_str(" (");
        out.push_str(location.as_deref().unwrap_or("<unknown>:0:0"));
        out.push(')');
    }
    out
}

fn is_capture_machinery(symbol: &str) -> bool {
    symbol.contains("BacktraceCapture")
        || symbol.starts_with("std::backtrace")
        || symbol.starts_with("<std::backtrace")
}

fn backtrace_symbols(backtrace: &str) -> Vec<(String, Option<String>)> {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    let numbered = NUMBERED
        .get_or_init(|| Regex::new(r"^\d+:\s+(.+)$").expect("symbol pattern is a valid regex"));

    let mut symbols: Vec<(String, Option<String>)> = Vec::new();
    for raw in backtrace.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = symbols.last_mut() {
                last.1.get_or_insert_with(|| location.trim().to_string());
            }
            continue;
        }

        // Inlined symbols are listed without a frame number
        let name = numbered
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map_or(line, |m| m.as_str());
        symbols.push((name.to_string(), None));
    }
    symbols
}
