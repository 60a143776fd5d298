use std::time::Duration;

use cpu_load::{CycleSplit, DEFAULT_CYCLE_PERIOD};

#[test]
fn default_period_is_ten_ms() {
    assert_eq!(DEFAULT_CYCLE_PERIOD, Duration::from_millis(10));
}

#[test]
fn busy_and_idle_always_fill_the_period() {
    for tenth in 0..=1000 {
        let load = f64::from(tenth) / 10.0;
        let split = CycleSplit::new(DEFAULT_CYCLE_PERIOD, load);
        assert_eq!(split.busy_ns + split.idle_ns, split.period_ns, "load {load}");
        assert_eq!(split.period_ns, 10_000_000);
    }
}

#[test]
fn zero_load_only_sleeps() {
    let split = CycleSplit::new(DEFAULT_CYCLE_PERIOD, 0.0);
    assert_eq!(split.busy_ns, 0);
    assert_eq!(split.idle(), DEFAULT_CYCLE_PERIOD);
}

#[test]
fn full_load_never_sleeps() {
    let split = CycleSplit::new(DEFAULT_CYCLE_PERIOD, 100.0);
    assert_eq!(split.idle_ns, 0);
    assert_eq!(split.busy(), DEFAULT_CYCLE_PERIOD);
}

#[test]
fn half_load_splits_evenly() {
    let split = CycleSplit::new(DEFAULT_CYCLE_PERIOD, 50.0);
    assert_eq!(split.busy(), Duration::from_millis(5));
    assert_eq!(split.idle(), Duration::from_millis(5));
}

#[test]
fn fractional_load_truncates_busy_time() {
    let split = CycleSplit::new(Duration::from_nanos(3), 50.0);
    assert_eq!(split.busy_ns, 1);
    assert_eq!(split.idle_ns, 2);
}

#[test]
fn out_of_range_load_uses_nearest_bound() {
    assert_eq!(
        CycleSplit::new(DEFAULT_CYCLE_PERIOD, 140.0),
        CycleSplit::new(DEFAULT_CYCLE_PERIOD, 100.0)
    );
    assert_eq!(
        CycleSplit::new(DEFAULT_CYCLE_PERIOD, -3.0),
        CycleSplit::new(DEFAULT_CYCLE_PERIOD, 0.0)
    );
}

#[test]
fn custom_period() {
    let split = CycleSplit::new(Duration::from_millis(20), 25.0);
    assert_eq!(split.busy(), Duration::from_millis(5));
    assert_eq!(split.idle(), Duration::from_millis(15));
}
