use std::time::Duration;

pub const DEFAULT_CYCLE_PERIOD: Duration = Duration::from_millis(10);

/// One busy/idle cycle. `busy_ns + idle_ns == period_ns` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleSplit {
    pub period_ns: u64,
    pub busy_ns: u64,
    pub idle_ns: u64,
}

impl CycleSplit {
    /// `load_percent` is expected in [0, 100]; anything else is clamped here too.
    pub fn new(period: Duration, load_percent: f64) -> Self {
        let period_ns = u64::try_from(period.as_nanos()).unwrap_or(u64::MAX);
        let fraction = crate::args::clamp_load(load_percent) / 100.0;

        // Truncates toward zero, matching an integer cast of the product.
        let busy_ns = ((period_ns as f64 * fraction) as u64).min(period_ns);

        Self {
            period_ns,
            busy_ns,
            idle_ns: period_ns - busy_ns,
        }
    }

    pub fn busy(&self) -> Duration {
        Duration::from_nanos(self.busy_ns)
    }

    pub fn idle(&self) -> Duration {
        Duration::from_nanos(self.idle_ns)
    }
}
