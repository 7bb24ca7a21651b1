//! Orchestration interfaces.

use serde::Serialize;

/// Mean trial duration for one pool size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentResult {
    /// Maximum number of concurrently running city tasks.
    pub pool_size: usize,
    /// Arithmetic mean of every trial's wall-clock time, failed trials included.
    pub mean_duration_millis: f64,
    /// Trials run for this pool size.
    pub trials: u32,
    /// Trials whose batch surfaced an error.
    pub failed_trials: u32,
}

/// Trait for presenting suite results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present the result of one pool size as soon as its trials finish.
    fn present_result(&self, result: &ExperimentResult);

    /// Present every result once the whole suite has finished.
    fn present_summary(&self, results: &[ExperimentResult]);
}

/// Null presenter (does nothing).
pub struct NullPresenter;

impl ResultPresenter for NullPresenter {
    fn present_result(&self, _result: &ExperimentResult) {}
    fn present_summary(&self, _results: &[ExperimentResult]) {}
}
