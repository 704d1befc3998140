//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Local, TimeZone};

/// Format used for chat message timestamps (minute precision)
pub const MINUTE_TIMESTAMP_FORMAT: &str = "%H:%M";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current wall-clock time in the server's local offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation (uses actual local time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Format a time as `HH:MM`.
///
/// Seconds and anything finer are dropped, so two times within the same
/// minute produce the same string.
pub fn format_minute_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(MINUTE_TIMESTAMP_FORMAT).to_string()
}

/// Format a time as RFC 3339
pub fn to_rfc3339(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339()
}
