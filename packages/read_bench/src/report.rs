use std::time::{Duration, Instant};

use crate::Result;

/// Runs `op` exactly once, printing the elapsed wall-clock time together
/// with the strategy label when it succeeds.
///
/// The output format is one line per strategy: seconds with six decimal
/// places, then the label in parentheses, e.g. `0.012345 (sequential)`.
/// Time is taken from the monotonic clock, so wall-clock adjustments during
/// the run do not skew the measurement.
///
/// # Errors
///
/// If `op` fails, nothing is printed and the error is returned as-is.
pub fn time_strategy<F, R>(label: &str, op: F) -> Result<Duration>
where
    F: FnOnce() -> Result<R>,
{
    let started = Instant::now();

    // Whatever the operation produced is dropped; only the time matters.
    op()?;

    let elapsed = started.elapsed();

    println!("{:.6} ({label})", elapsed.as_secs_f64());

    Ok(elapsed)
}
