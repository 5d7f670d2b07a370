//! Time source used to stamp venture records.
//!
//! # Invariants
//! - `SystemClock` truncates to millisecond precision, the resolution of the
//!   persisted timestamps.

use chrono::{DateTime, Duration, DurationRound, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of "now" for record timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        now.duration_trunc(Duration::milliseconds(1)).unwrap_or(now)
    }
}

/// Manually driven clock for deterministic tests and replays.
///
/// Clones share the same instant, so a test can keep a handle while the
/// store owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.set(instant);
    }

    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
