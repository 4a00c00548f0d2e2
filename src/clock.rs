// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Clocks
//!
//! Implementations of [`Clock`] for production and for tests.
//!
//! - [`SystemClock`] reads the local wall clock on every call.
//! - [`FixedClock`] always returns the same instant.
//! - [`SteppingClock`] advances by a fixed step each time it is read.

use chrono::{Duration, Local, NaiveDateTime};
use parking_lot::Mutex;

use crate::core::traits::Clock;

/// Clock backed by the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
///
/// ```
/// use chrono::NaiveDate;
/// use notiflow::clock::FixedClock;
/// use notiflow::core::traits::Clock;
///
/// let at = NaiveDate::from_ymd_opt(2024, 5, 1)
///     .and_then(|d| d.and_hms_opt(9, 30, 0))
///     .unwrap();
/// assert_eq!(FixedClock::new(at).now(), at);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

/// Clock that starts at a given instant and moves forward by `step` on
/// every read.
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<NaiveDateTime>,
    step: Duration,
}

impl SteppingClock {
    /// Creates a clock whose first reading is `start`.
    pub fn new(start: NaiveDateTime, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let mut next = self.next.lock();
        let current = *next;
        *next = current + self.step;
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_milli_opt(12, 0, 0, 250))
            .unwrap()
    }

    #[test]
    fn test_fixed_clock_never_moves() {
        let clock = FixedClock::new(instant());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_stepping_clock_advances() {
        let clock = SteppingClock::new(instant(), Duration::seconds(2));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(first, instant());
        assert_eq!(second - first, Duration::seconds(2));
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let before = clock.now();
        let after = clock.now();
        assert!(after >= before);
    }
}
