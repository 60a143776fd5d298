use std::thread;
use std::time::Duration;

use cpu_load::CpuMonitor;

#[test]
fn monitor_collects_samples_while_running() {
    let monitor = CpuMonitor::with_interval(Duration::from_millis(250)).expect("monitor");
    thread::sleep(Duration::from_millis(1_200));

    let summary = monitor.finish().expect("at least one sample");
    assert!(summary.samples >= 1);
    assert!(summary.mean >= 0.0);
    assert!(summary.peak + 0.01 >= summary.mean);
}

#[test]
fn stopping_early_yields_no_summary() {
    let monitor = CpuMonitor::with_interval(Duration::from_secs(5)).expect("monitor");
    assert_eq!(monitor.finish(), None);
}
