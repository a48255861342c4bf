//! Turns a stack snapshot into a resolved source location

use super::error::{LoggerError, Result};
use super::log_record::SourceLocation;
use super::resolver::{ResolvedLocation, SourceMapResolver};
use super::stack::{locate_frame, RawFrame};
use std::sync::Arc;
use std::time::Duration;

pub struct StackLocator {
    resolver: Arc<dyn SourceMapResolver>,
    stack_index: usize,
    timeout: Option<Duration>,
}

impl StackLocator {
    pub fn new(resolver: Arc<dyn SourceMapResolver>, stack_index: usize) -> Self {
        Self {
            resolver,
            stack_index,
            timeout: None,
        }
    }

    /// Bound each resolver call; `None` waits indefinitely
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Select, parse and resolve the frame of interest in `stack`.
    ///
    /// # Errors
    ///
    /// Fails with one of the location errors (see
    /// [`LoggerError::is_location_error`]).
    pub async fn locate(&self, stack: &str) -> Result<SourceLocation> {
        let frame = locate_frame(stack, self.stack_index)?;
        let resolved = self.resolve(&frame).await?;
        Ok(Self::to_location(frame, resolved))
    }

    async fn resolve(&self, frame: &RawFrame) -> Result<ResolvedLocation> {
        let pending = self.resolver.resolve(frame);
        let items = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, pending)
                .await
                .map_err(|_| LoggerError::ResolverTimeout {
                    frame: frame.text.clone(),
                    timeout,
                })??,
            None => pending.await?,
        };

        items
            .into_iter()
            .next()
            .ok_or_else(|| LoggerError::resolver(frame.text.clone(), "resolver returned no locations"))
    }

    fn to_location(frame: RawFrame, resolved: ResolvedLocation) -> SourceLocation {
        let short = resolved.file.trim_start_matches("./");

        SourceLocation {
            callee: resolved.callee.or(frame.callee).unwrap_or_default(),
            file: format!("./{}", short),
            folder: short.to_string(),
            path: frame.location,
            line: resolved.line,
            column: resolved.column,
        }
    }
}
