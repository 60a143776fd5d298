use anyhow::{Context, Result as AnyResult};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cpu_load::{
    stress_cpu, Cli, Clock, ClockKind, CpuMonitor, CycleSplit, LoadArgs, LoadConfig,
    MonotonicClock, RealtimeClock, RunReport, USAGE,
};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run<C: Clock + Sync>(
    clock: &C,
    args: LoadArgs,
    split: CycleSplit,
    threads: usize,
) -> AnyResult<RunReport> {
    let config = LoadConfig::new(clock, args.duration_secs, split);
    stress_cpu(clock, &config, threads)
}

fn main() -> AnyResult<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(args) = cli.load_args() else {
        println!("{USAGE}");
        return Ok(());
    };

    let threads = cli.worker_count();
    let split = CycleSplit::new(cli.cycle_period(), args.load_percent);
    debug!(?args, ?split, threads, clock = ?cli.clock, "resolved settings");

    println!(
        "Running for {} sec at {:.1}% load using {} threads",
        args.duration_secs, args.load_percent, threads
    );

    let monitor = if cli.monitor {
        Some(CpuMonitor::spawn().context("failed to start cpu monitor")?)
    } else {
        None
    };

    let report = match cli.clock {
        ClockKind::Monotonic => run(&MonotonicClock::new(), args, split, threads),
        ClockKind::Realtime => run(&RealtimeClock, args, split, threads),
    };

    if let Some(summary) = monitor.and_then(CpuMonitor::finish) {
        info!(
            samples = summary.samples,
            mean = summary.mean,
            peak = summary.peak,
            "observed host cpu usage"
        );
    }

    report.map(|_| ())
}
