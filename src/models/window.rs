//! Time window model.
//!
//! # Time Model
//! All times are in milliseconds relative to an epoch chosen by the caller
//! (e.g., midnight UTC of the planning horizon start).
//!
//! Windows are half-open: `[start_ms, end_ms)`. A voyage ending at `t`
//! and another starting at `t` on the same vessel do not conflict.

use serde::{Deserialize, Serialize};

/// A time interval [start, end).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (ms, inclusive).
    pub start_ms: i64,
    /// Interval end (ms, exclusive).
    pub end_ms: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Duration of this window (ms), saturating at the `i64` bounds.
    /// Negative for inverted windows.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Whether `start_ms < end_ms`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start_ms < self.end_ms
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start_ms && time_ms < self.end_ms
    }

    /// Whether `other` lies entirely inside this window.
    #[inline]
    pub fn contains_window(&self, other: &Self) -> bool {
        self.start_ms <= other.start_ms && other.end_ms <= self.end_ms
    }

    /// Whether two windows overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}
