use std::num::NonZeroUsize;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::cycle::DEFAULT_CYCLE_PERIOD;

pub const USAGE: &str = "Usage: ./cpu <duration in sec> [load percentage 0-100]";

pub const DEFAULT_LOAD_PERCENT: f64 = 100.0;

/// Keep every processing unit busy for a share of each short cycle.
#[derive(Parser, Debug)]
#[command(name = "cpu", version)]
pub struct Cli {
    /// Seconds to run, then the optional load percentage (0-100, default 100)
    ///
    /// Options go before these. From the first value on, every token is taken
    /// as-is, so `-.5` or `-5%` reach the lenient number parsing. Values past
    /// the second are dropped, like the classic tool.
    #[arg(
        value_name = "DURATION [LOAD]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub values: Vec<String>,

    /// Number of workers (default: available processing units)
    #[arg(short, long)]
    pub threads: Option<NonZeroUsize>,

    /// Length of one busy/idle cycle in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub cycle_ms: Option<u64>,

    /// Time source used for the deadline and the spin loop
    #[arg(long, value_enum, default_value_t = ClockKind::Monotonic)]
    pub clock: ClockKind,

    /// Sample host-wide CPU usage while running and log a summary
    #[arg(long)]
    pub monitor: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ClockKind {
    Monotonic,
    Realtime,
}

/// Inputs after lenient parsing and clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadArgs {
    pub duration_secs: i64,
    pub load_percent: f64,
}

impl Cli {
    /// `None` means no duration was given and only the usage line should be printed.
    pub fn load_args(&self) -> Option<LoadArgs> {
        let duration = self.values.first()?;
        let load_percent = self
            .values
            .get(1)
            .map_or(DEFAULT_LOAD_PERCENT, |raw| clamp_load(parse_float_prefix(raw)));

        Some(LoadArgs {
            duration_secs: parse_int_prefix(duration),
            load_percent,
        })
    }

    pub fn cycle_period(&self) -> Duration {
        self.cycle_ms
            .map_or(DEFAULT_CYCLE_PERIOD, Duration::from_millis)
    }

    pub fn worker_count(&self) -> usize {
        self.threads.map_or_else(num_cpus::get, NonZeroUsize::get)
    }
}

pub fn clamp_load(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Integer prefix parse with `atoi` behavior: junk yields 0, overflow saturates.
pub fn parse_int_prefix(raw: &str) -> i64 {
    let s = raw.trim_start_matches(is_c_space);
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Longest decimal float prefix, `atof` style. Junk yields 0.0.
pub fn parse_float_prefix(raw: &str) -> f64 {
    let s = raw.trim_start_matches(is_c_space);
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    for word in ["infinity", "inf", "nan"] {
        let named = bytes
            .get(end..end + word.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(word.as_bytes()));
        if named {
            return s[..end + word.len()].parse().unwrap_or(0.0);
        }
    }

    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = count_digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}
