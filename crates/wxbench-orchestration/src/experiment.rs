//! One bounded-concurrency pass over every city.
//!
//! Each trial builds its own scoped `rayon` pool with exactly `pool_size`
//! workers, runs one `CityTask` per city inside it, and tears the pool down
//! before returning. Worker threads are joined before `run_once` returns,
//! whether the batch succeeded or not, and the measured time includes that
//! teardown.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, warn};

use wxbench_core::catalog::City;
use wxbench_core::error::WeatherError;
use wxbench_core::options::DateRange;
use wxbench_core::task::{CityReport, CityTask};

/// How `run_once` waits for its batch when a task fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Run every task to completion, then report the first failure in
    /// submission order.
    #[default]
    DrainAll,
    /// Stop starting new tasks once any task has failed. Tasks already
    /// running finish; the first failure in submission order among the
    /// tasks that ran is reported.
    FailFast,
}

/// A trial that surfaced an error, with the time it took anyway.
#[derive(Debug, Clone, thiserror::Error)]
#[error("trial failed after {elapsed:?}: {error}")]
pub struct TrialFailure {
    pub elapsed: Duration,
    #[source]
    pub error: WeatherError,
}

/// Runs every city task once under a bounded worker pool.
pub struct Experiment {
    task: CityTask,
    policy: JoinPolicy,
    live_workers: Arc<AtomicUsize>,
}

impl Experiment {
    #[must_use]
    pub fn new(task: CityTask) -> Self {
        Self {
            task,
            policy: JoinPolicy::default(),
            live_workers: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn with_join_policy(mut self, policy: JoinPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn join_policy(&self) -> JoinPolicy {
        self.policy
    }

    /// Days every task of this experiment fetches.
    #[must_use]
    pub fn task_range(&self) -> DateRange {
        self.task.range()
    }

    /// Pool threads currently alive across every trial of this experiment.
    #[must_use]
    pub fn live_workers(&self) -> usize {
        self.live_workers.load(Ordering::SeqCst)
    }

    /// Run one task per city with at most `pool_size` running at once.
    ///
    /// Returns the wall-clock time from pool creation to the last worker
    /// being joined.
    pub fn run_once(&self, cities: &[City], pool_size: usize) -> Result<Duration, TrialFailure> {
        if pool_size == 0 {
            return Err(TrialFailure {
                elapsed: Duration::ZERO,
                error: WeatherError::Config("pool size must be at least 1".into()),
            });
        }

        let start = Instant::now();
        let live = &self.live_workers;
        let built = rayon::ThreadPoolBuilder::new()
            .num_threads(pool_size)
            .thread_name(|i| format!("wxbench-worker-{i}"))
            .build_scoped(
                |thread| {
                    live.fetch_add(1, Ordering::SeqCst);
                    thread.run();
                    live.fetch_sub(1, Ordering::SeqCst);
                },
                |pool| pool.install(|| self.join(cities)),
            );
        let elapsed = start.elapsed();

        let outcome = built
            .map_err(|e| WeatherError::Pool(e.to_string()))
            .and_then(|batch| batch);

        match outcome {
            Ok(reports) => {
                debug!(pool_size, cities = reports.len(), ?elapsed, "trial complete");
                Ok(elapsed)
            }
            Err(error) => {
                warn!(pool_size, ?elapsed, %error, "trial failed");
                Err(TrialFailure { elapsed, error })
            }
        }
    }

    fn join(&self, cities: &[City]) -> Result<Vec<CityReport>, WeatherError> {
        let outcomes: Vec<Option<Result<CityReport, WeatherError>>> = match self.policy {
            JoinPolicy::DrainAll => cities
                .par_iter()
                .map(|city| Some(self.task.run(city)))
                .collect(),
            JoinPolicy::FailFast => {
                let failed = AtomicBool::new(false);
                cities
                    .par_iter()
                    .map(|city| {
                        if failed.load(Ordering::SeqCst) {
                            return None;
                        }
                        let outcome = self.task.run(city);
                        if outcome.is_err() {
                            failed.store(true, Ordering::SeqCst);
                        }
                        Some(outcome)
                    })
                    .collect()
            }
        };

        // Skipped tasks only exist after a failure, so one of the collected
        // outcomes is an error whenever a `None` is present.
        outcomes.into_iter().flatten().collect()
    }
}
