//! CLI output formatting.

use std::time::Duration;

use wxbench_core::aggregate::DailyStat;
use wxbench_orchestration::interfaces::ExperimentResult;

/// Format one day of a city report; days are shown 1-based.
#[must_use]
pub fn format_day_line(city: &str, stat: &DailyStat) -> String {
    format!(
        "City: {city}, Day: {}, Min: {:.2}, Max: {:.2}, Avg: {:.2}",
        stat.day + 1,
        stat.min,
        stat.max,
        stat.avg
    )
}

/// Format the summary line of one pool size.
#[must_use]
pub fn format_summary_line(result: &ExperimentResult) -> String {
    format!(
        "Average time for {} threads: {} ms",
        result.pool_size, result.mean_duration_millis
    )
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}
