//! Clock abstraction so prompt timestamps can be pinned in tests.

use chrono::{DateTime, FixedOffset, Local};

/// Source of "now" for prompt assembly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
