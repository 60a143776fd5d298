//! Time source and sleep primitive used by the workers.
//!
//! Workers only ever talk to a [`Clock`], so the realtime clock of the classic
//! tool and the default monotonic one are interchangeable.

use std::hint;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

pub trait Clock {
    /// Nanoseconds since a fixed, clock-specific epoch.
    fn now_ns(&self) -> u64;

    /// Best-effort sleep. Returning early is fine and is not retried.
    fn sleep_ns(&self, ns: u64);
}

#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn sleep_ns(&self, ns: u64) {
        os_sleep(ns);
    }
}

/// Wall-clock time. Adjustments to the system clock during a run will skew it.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealtimeClock;

impl Clock for RealtimeClock {
    fn now_ns(&self) -> u64 {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        u64::try_from(since_epoch.as_nanos()).unwrap_or(u64::MAX)
    }

    fn sleep_ns(&self, ns: u64) {
        os_sleep(ns);
    }
}

fn os_sleep(ns: u64) {
    if ns > 0 {
        thread::sleep(Duration::from_nanos(ns));
    }
}

/// Spin on `clock` until at least `ns` nanoseconds have passed.
pub fn busy_wait<C: Clock + ?Sized>(clock: &C, ns: u64) {
    let start = clock.now_ns();
    while clock.now_ns().saturating_sub(start) < ns {
        hint::spin_loop();
    }
}
