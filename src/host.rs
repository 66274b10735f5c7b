//! Injectable host capabilities
//!
//! The detection core never reaches for ambient globals. Anything it needs
//! from the host environment arrives either with each observation (scroll
//! samples carry their own document metrics) or through the small traits
//! here, so the engine runs and tests outside any specific host.

use chrono::{DateTime, Utc};
use std::cell::Cell;

/// Wall-clock source for session duration and event stamping.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock> Clock for std::rc::Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests and deterministic replay.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: Cell<i64>,
}

impl ManualClock {
    /// Create a clock fixed at the given instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now_ms: Cell::new(start.timestamp_millis()),
        }
    }

    /// Move the clock forward.
    pub fn advance_ms(&self, ms: i64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    /// Jump the clock to a specific instant.
    pub fn set(&self, at: DateTime<Utc>) {
        self.now_ms.set(at.timestamp_millis());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.now_ms.get())
            .unwrap_or_else(Utc::now)
    }
}
