pub mod args;
pub mod clock;
pub mod cpu_stress;
pub mod cycle;
pub mod monitor;

pub use args::{Cli, ClockKind, LoadArgs, USAGE};
pub use clock::{busy_wait, Clock, MonotonicClock, RealtimeClock};
pub use cpu_stress::{run_worker, stress_cpu, LoadConfig, RunReport};
pub use cycle::{CycleSplit, DEFAULT_CYCLE_PERIOD};
pub use monitor::{CpuMonitor, UsageSummary};
