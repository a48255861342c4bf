//! Source-map resolution of captured stack frames

use super::error::Result;
use super::stack::RawFrame;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// A frame mapped back to its original source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Original function name, if the source map knows it
    pub callee: Option<String>,
    /// Original file, relative to the project root
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// Maps generated coordinates back to original ones.
///
/// Resolution may perform network or disk I/O; the queue waits for it before
/// processing the next record. Only the first returned location is used.
///
/// # Example
///
/// ```no_run
/// use rust_ordered_logger::core::{RawFrame, ResolvedLocation, Result, SourceMapResolver};
/// use async_trait::async_trait;
///
/// struct FixedResolver;
///
/// #[async_trait]
/// impl SourceMapResolver for FixedResolver {
///     async fn resolve(&self, frame: &RawFrame) -> Result<Vec<ResolvedLocation>> {
///         Ok(vec![ResolvedLocation {
///             callee: frame.callee.clone(),
///             file: "src/app.ts".to_string(),
///             line: frame.line,
///             column: frame.column,
///         }])
///     }
/// }
/// ```
#[async_trait]
pub trait SourceMapResolver: Send + Sync {
    async fn resolve(&self, frame: &RawFrame) -> Result<Vec<ResolvedLocation>>;
}

/// Resolver that maps every frame to itself, only shortening the path.
///
/// URL origins and query strings are removed, then `root_dir` if the path
/// starts with it.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    root_dir: Option<PathBuf>,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    /// Shorten a raw frame location to a project-relative path
    pub fn short_path(&self, location: &str) -> String {
        let mut path = location;

        if let Some((_, rest)) = path.split_once("://") {
            path = rest.find('/').map_or("", |i| &rest[i..]);
        }
        if let Some((before, _)) = path.split_once('?') {
            path = before;
        }
        if let Some(root) = &self.root_dir {
            if let Ok(stripped) = Path::new(path).strip_prefix(root) {
                path = stripped.to_str().unwrap_or(path);
            }
        }

        path.trim_start_matches("./").trim_start_matches('/').to_string()
    }
}

#[async_trait]
impl SourceMapResolver for IdentityResolver {
    async fn resolve(&self, frame: &RawFrame) -> Result<Vec<ResolvedLocation>> {
        Ok(vec![ResolvedLocation {
            callee: frame.callee.clone(),
            file: self.short_path(&frame.location),
            line: frame.line,
            column: frame.column,
        }])
    }
}
