//! Logger metrics for observability
//!
//! Counters for monitoring logger health: how many calls were gated out,
//! how many records reached the transports, and how many were lost.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_ordered_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_submitted();
/// metrics.record_dispatched();
///
/// assert_eq!(metrics.submitted(), 1);
/// assert_eq!(metrics.in_flight(), 0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Calls that passed the level gate and were queued
    submitted: AtomicU64,

    /// Calls rejected by the level gate
    suppressed: AtomicU64,

    /// Records delivered to every transport
    dispatched: AtomicU64,

    /// Records lost to a render, hook or transport failure
    failed: AtomicU64,

    /// Records emitted without a call-site location
    unresolved_locations: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            unresolved_locations: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn unresolved_locations(&self) -> u64 {
        self.unresolved_locations.load(Ordering::Relaxed)
    }

    /// Records queued but not yet settled either way
    pub fn in_flight(&self) -> u64 {
        self.submitted()
            .saturating_sub(self.dispatched() + self.failed())
    }

    /// Record a queued call
    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a call rejected by the level gate
    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a record delivered to the transports
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a lost record
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a record whose call site could not be resolved
    #[inline]
    pub fn record_unresolved_location(&self) -> u64 {
        self.unresolved_locations.fetch_add(1, Ordering::Relaxed)
    }

    /// Get failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no records have settled.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let total = self.dispatched() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.submitted.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.unresolved_locations.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted()),
            suppressed: AtomicU64::new(self.suppressed()),
            dispatched: AtomicU64::new(self.dispatched()),
            failed: AtomicU64::new(self.failed()),
            unresolved_locations: AtomicU64::new(self.unresolved_locations()),
        }
    }
}
