//! Optional host CPU usage sampler.
//!
//! Only observes. The busy/idle split never reacts to what is measured here.

use std::io;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::{debug, warn};

pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

const POLL_STEP: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsageSummary {
    pub samples: usize,
    /// Percent of total host capacity, 0-100.
    pub mean: f32,
    pub peak: f32,
}

impl UsageSummary {
    pub fn from_samples(samples: &[f32]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let total: f32 = samples.iter().sum();
        let peak = samples.iter().copied().fold(f32::MIN, f32::max);

        Some(Self {
            samples: samples.len(),
            mean: total / samples.len() as f32,
            peak,
        })
    }
}

pub struct CpuMonitor {
    running: Arc<AtomicBool>,
    handle: JoinHandle<Vec<f32>>,
}

impl CpuMonitor {
    pub fn spawn() -> io::Result<Self> {
        Self::with_interval(DEFAULT_SAMPLE_INTERVAL)
    }

    /// Intervals below what sysinfo can resolve are raised to its minimum.
    pub fn with_interval(interval: Duration) -> io::Result<Self> {
        let interval = interval.max(MINIMUM_CPU_UPDATE_INTERVAL);
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("cpu-monitor".into())
            .spawn(move || sample_usage(interval, &running_clone))?;

        Ok(Self { running, handle })
    }

    /// Stop sampling and summarize. `None` if no sample was taken.
    pub fn finish(self) -> Option<UsageSummary> {
        self.running.store(false, Ordering::SeqCst);
        match self.handle.join() {
            Ok(samples) => UsageSummary::from_samples(&samples),
            Err(_) => {
                warn!("cpu monitor thread panicked");
                None
            }
        }
    }
}

fn sample_usage(interval: Duration, running: &AtomicBool) -> Vec<f32> {
    let mut sys = System::new();
    // First refresh only sets the baseline for the next delta.
    sys.refresh_cpu_usage();

    let mut samples = Vec::new();
    let mut last = Instant::now();

    while running.load(Ordering::SeqCst) {
        thread::sleep(POLL_STEP.min(interval));
        if last.elapsed() < interval {
            continue;
        }
        sys.refresh_cpu_usage();
        last = Instant::now();

        let usage = sys.global_cpu_usage();
        debug!(usage, "host cpu usage");
        samples.push(usage);
    }
    samples
}
