//! Console presenters for city reports and suite results.

use std::io::{self, Write};
use std::time::Duration;

use wxbench_core::observer::ReportSink;
use wxbench_core::task::CityReport;
use wxbench_orchestration::interfaces::{ExperimentResult, ResultPresenter};

use crate::output::{format_day_line, format_duration, format_summary_line};

/// Prints one line per day of every successful city task.
pub struct ConsoleReportSink;

impl ReportSink for ConsoleReportSink {
    fn on_report(&self, report: &CityReport) {
        // Hold the lock so a city's days are not interleaved with another's.
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = write_report(&mut out, report) {
            tracing::debug!(city = %report.city.name, error = %e, "dropping day lines");
        }
    }
}

/// Write every day line of `report`, stopping at the first write error.
fn write_report(out: &mut impl Write, report: &CityReport) -> io::Result<()> {
    for stat in &report.days {
        writeln!(out, "{}", format_day_line(&report.city.name, stat))?;
    }
    Ok(())
}

/// Output style for suite results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    /// One summary line per pool size, printed as it finishes.
    Text,
    /// A single JSON array printed once the suite finishes.
    Json,
}

/// CLI result presenter.
pub struct CLIResultPresenter {
    format: ResultFormat,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(format: ResultFormat) -> Self {
        Self { format }
    }

    #[must_use]
    pub fn format(&self) -> ResultFormat {
        self.format
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, result: &ExperimentResult) {
        if result.failed_trials > 0 {
            let mean = Duration::from_secs_f64(result.mean_duration_millis / 1000.0);
            eprintln!(
                "Warning: {} of {} trials failed for {} threads (mean {})",
                result.failed_trials,
                result.trials,
                result.pool_size,
                format_duration(mean)
            );
        }
        if self.format == ResultFormat::Text {
            println!("{}", format_summary_line(result));
        }
    }

    fn present_summary(&self, results: &[ExperimentResult]) {
        if self.format != ResultFormat::Json {
            return;
        }
        match serde_json::to_string_pretty(results) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "could not serialize results"),
        }
    }
}
