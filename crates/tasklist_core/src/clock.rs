//! Wall-clock source injected into stores and date checks.
//!
//! # Invariants
//! - `now_ms` is Unix epoch milliseconds.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Supplies "now" in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// Real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Settable clock for deterministic tests and replays.
#[derive(Debug, Default)]
pub struct FixedClock {
    now_ms: Cell<i64>,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    /// Builds a clock at `hour:00` local time on `date`.
    ///
    /// Returns `None` when that local time does not exist (DST gap).
    pub fn at_local(date: NaiveDate, hour: u32) -> Option<Self> {
        let naive = date.and_hms_opt(hour, 0, 0)?;
        let local = Local.from_local_datetime(&naive).earliest()?;
        Some(Self::new(local.timestamp_millis()))
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(1_000);
        clock.advance(500);
        assert_eq!(clock.now_ms(), 1_500);
        clock.set(10);
        assert_eq!((&clock).now_ms(), 10);
    }
}
