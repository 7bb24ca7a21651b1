//! Sink for per-city results produced by tasks.

use crate::task::CityReport;

/// Receives the report of every city task that completes successfully.
///
/// Sinks are shared by all workers of a trial, so implementations must be
/// `Send + Sync`. A failed task never reaches the sink.
pub trait ReportSink: Send + Sync {
    /// Receive one city's daily statistics.
    fn on_report(&self, report: &CityReport);
}
