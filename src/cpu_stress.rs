use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result as AnyResult};
use tracing::{debug, info};

use crate::clock::{busy_wait, Clock};
use crate::cycle::CycleSplit;

const NS_PER_SEC: u64 = 1_000_000_000;

/// Everything a worker needs, fixed before the first worker starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadConfig {
    pub split: CycleSplit,
    pub deadline_ns: u64,
}

impl LoadConfig {
    /// A negative duration puts the deadline at "now", so nothing runs.
    pub fn new<C: Clock + ?Sized>(clock: &C, duration_secs: i64, split: CycleSplit) -> Self {
        let run_ns = u64::try_from(duration_secs)
            .unwrap_or(0)
            .saturating_mul(NS_PER_SEC);

        Self {
            split,
            deadline_ns: clock.now_ns().saturating_add(run_ns),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub workers: usize,
    pub cycles: Vec<u64>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn total_cycles(&self) -> u64 {
        self.cycles.iter().sum()
    }
}

/// Spin, then sleep, once per cycle until the deadline. Returns the cycle count.
///
/// The deadline is only checked between cycles, so a worker can run past it by
/// up to one cycle.
pub fn run_worker<C: Clock + ?Sized>(clock: &C, config: &LoadConfig) -> u64 {
    let mut cycles = 0;
    while clock.now_ns() < config.deadline_ns {
        busy_wait(clock, config.split.busy_ns);
        clock.sleep_ns(config.split.idle_ns);
        cycles += 1;
    }
    cycles
}

/// Run `threads` independent workers against the same config and wait for all of them.
pub fn stress_cpu<C>(clock: &C, config: &LoadConfig, threads: usize) -> AnyResult<RunReport>
where
    C: Clock + Sync + ?Sized,
{
    let started = Instant::now();

    let cycles = thread::scope(|scope| -> AnyResult<Vec<u64>> {
        let mut handles = Vec::with_capacity(threads);

        for worker in 0..threads {
            let handle = thread::Builder::new()
                .name(format!("cpu-worker-{worker}"))
                .spawn_scoped(scope, move || {
                    debug!(worker, "worker started");
                    let cycles = run_worker(clock, config);
                    debug!(worker, cycles, "worker finished");
                    cycles
                })
                .with_context(|| format!("failed to spawn worker {worker}"))?;
            handles.push(handle);
        }

        // Join everyone before reporting, so a second panic cannot escape the scope.
        let joined: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();
        joined
            .into_iter()
            .enumerate()
            .map(|(worker, outcome)| outcome.map_err(|_| anyhow!("worker {worker} panicked")))
            .collect()
    })?;

    let report = RunReport {
        workers: threads,
        cycles,
        elapsed: started.elapsed(),
    };

    info!(
        workers = report.workers,
        total_cycles = report.total_cycles(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "CPU load run completed"
    );

    Ok(report)
}
