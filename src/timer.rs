//! Tick sources used to time assertions, cases and units.
//!
//! Ticks are microseconds since an arbitrary origin. They are only ever
//! subtracted from each other, so the origin does not matter.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic source of microsecond ticks.
pub trait Clock {
    fn now_micros(&self) -> u64;
}

/// Real clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Deterministic clock that advances by a fixed step on every read.
///
/// Useful when a test needs non-zero, predictable intervals.
#[derive(Debug)]
pub struct SteppingClock {
    now: Cell<u64>,
    step: u64,
}

impl SteppingClock {
    pub fn new(step: u64) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }

    /// Moves the clock forward without reading it.
    pub fn advance(&self, micros: u64) {
        self.now.set(self.now.get().saturating_add(micros));
    }
}

impl Clock for SteppingClock {
    fn now_micros(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now.saturating_add(self.step));
        now
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }
}

/// Elapsed microseconds between two ticks, clamped at zero.
pub fn elapsed(start: u64, end: u64) -> u64 {
    end.saturating_sub(start)
}

/// Formats microseconds as milliseconds with three decimals.
pub fn format_millis(micros: u64) -> String {
    format!("{:.3} ms", micros as f64 / 1000.0)
}
