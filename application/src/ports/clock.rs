//! Clock port

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current time for eligibility evaluation.
pub trait Clock: Send + Sync {
    /// Current time in the user's local offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall-clock time in the system's local time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at a given instant.
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
