//! Template rendering for log lines
//!
//! Formats contain `{{path}}` placeholders, where `path` is a dotted path
//! (`file`, `a.b.c`) into the serialized record. The placeholder grammar is
//! matched case-insensitively, but lookups are case-sensitive: `{{Title}}`
//! is recognised as a placeholder and then fails because the record only has
//! `title`.
//!
//! A format may contain the [`RHS_MARKER`]; the two halves are rendered
//! separately and joined with enough spaces to right-align the second half
//! at the configured line width (see [`align`]).

use super::error::{LoggerError, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

/// Marker splitting a format into left and right aligned halves
pub const RHS_MARKER: &str = "{{rhs}}";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\{\{\s*([a-z0-9_][.a-z0-9_]*)\s*\}\}")
            .expect("placeholder pattern is a valid regex")
    })
}

/// Render `template` against any serializable record.
///
/// # Errors
///
/// Returns [`LoggerError::MissingKey`] if a placeholder path is absent; no
/// partial output is produced.
///
/// # Example
///
/// ```
/// use rust_ordered_logger::core::template::render;
/// use serde_json::json;
///
/// let data = json!({ "index": "001", "title": "INFO", "message": "hello" });
/// let line = render("{{index}} <{{title}}> {{message}}", &data).unwrap();
/// assert_eq!(line, "001 <INFO> hello");
/// ```
pub fn render<T: Serialize + ?Sized>(template: &str, data: &T) -> Result<String> {
    let value = serde_json::to_value(data)?;
    render_value(template, &value)
}

/// Render `template` against an already serialized record
pub fn render_value(template: &str, data: &Value) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for caps in placeholder_pattern().captures_iter(template) {
        let (Some(tag), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let value = lookup(data, token.as_str())
            .ok_or_else(|| LoggerError::missing_key(token.as_str(), tag.as_str()))?;

        output.push_str(&template[last..tag.start()]);
        push_value(&mut output, value);
        last = tag.end();
    }

    output.push_str(&template[last..]);
    Ok(output)
}

/// Placeholder paths referenced by `template`, in order of appearance
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    placeholder_pattern()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Split a format on [`RHS_MARKER`].
///
/// The right half ends at the next marker; anything after a second marker
/// is not rendered.
pub fn split_rhs(format: &str) -> (&str, Option<&str>) {
    let mut parts = format.split(RHS_MARKER);
    let lhs = parts.next().unwrap_or_default();
    (lhs, parts.next())
}

/// Join `lhs` and `rhs` so that `rhs` ends at column `width`.
///
/// Lines already wider than `width` are joined as-is, never truncated.
pub fn align(lhs: &str, rhs: &str, width: usize) -> String {
    let used = lhs.chars().count() + rhs.chars().count();
    let pad = width.saturating_sub(used);

    let mut line = String::with_capacity(lhs.len() + pad + rhs.len());
    line.push_str(lhs);
    line.extend(std::iter::repeat(' ').take(pad));
    line.push_str(rhs);
    line
}

fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn push_value(output: &mut String, value: &Value) {
    match value {
        Value::String(s) => output.push_str(s),
        other => output.push_str(&other.to_string()),
    }
}
