//! Repeated trials across pool sizes.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use wxbench_core::catalog::City;
use wxbench_core::error::WeatherError;
use wxbench_core::options::SuiteOptions;

use crate::experiment::Experiment;
use crate::interfaces::{ExperimentResult, NullPresenter, ResultPresenter};

/// Runs an experiment `trials` times for each configured pool size.
pub struct ExperimentSuite {
    experiment: Experiment,
    presenter: Arc<dyn ResultPresenter>,
}

impl ExperimentSuite {
    #[must_use]
    pub fn new(experiment: Experiment) -> Self {
        Self {
            experiment,
            presenter: Arc::new(NullPresenter),
        }
    }

    /// Present each pool size's result as soon as its trials finish.
    #[must_use]
    pub fn with_presenter(mut self, presenter: Arc<dyn ResultPresenter>) -> Self {
        self.presenter = presenter;
        self
    }

    #[must_use]
    pub fn experiment(&self) -> &Experiment {
        &self.experiment
    }

    /// Run the pool sizes and trial count from `opts`.
    ///
    /// `opts.date_range` must match the range the experiment's task fetches.
    pub fn run_with_options(
        &self,
        opts: &SuiteOptions,
        cities: &[City],
    ) -> Result<Vec<ExperimentResult>, WeatherError> {
        let task_range = self.experiment.task_range();
        if opts.date_range != task_range {
            return Err(WeatherError::Config(format!(
                "options ask for {} but the task fetches {task_range}",
                opts.date_range
            )));
        }
        self.run(&opts.pool_sizes, opts.trials, cities)
    }

    /// Benchmark every pool size in `configs`, in order.
    ///
    /// Trials run strictly one after another. A failing trial is not retried
    /// and still counts toward the mean with the time it took; the suite
    /// always moves on to the next trial and pool size. Only invalid
    /// configuration is returned as an error, before any trial runs.
    pub fn run(
        &self,
        configs: &[usize],
        trials: u32,
        cities: &[City],
    ) -> Result<Vec<ExperimentResult>, WeatherError> {
        SuiteOptions {
            pool_sizes: configs.to_vec(),
            trials,
            date_range: self.experiment.task_range(),
        }
        .validate()?;

        let mut results = Vec::with_capacity(configs.len());
        for &pool_size in configs {
            let result = self.run_config(pool_size, trials, cities);
            self.presenter.present_result(&result);
            results.push(result);
        }
        self.presenter.present_summary(&results);
        Ok(results)
    }

    fn run_config(&self, pool_size: usize, trials: u32, cities: &[City]) -> ExperimentResult {
        let mut total = Duration::ZERO;
        let mut failed_trials = 0u32;

        for trial in 1..=trials {
            match self.experiment.run_once(cities, pool_size) {
                Ok(elapsed) => total += elapsed,
                Err(failure) => {
                    warn!(pool_size, trial, error = %failure.error, "trial failed, timing kept");
                    total += failure.elapsed;
                    failed_trials += 1;
                }
            }
        }

        let mean_duration_millis = total.as_secs_f64() * 1000.0 / f64::from(trials);
        info!(pool_size, trials, failed_trials, mean_duration_millis, "pool size done");

        ExperimentResult {
            pool_size,
            mean_duration_millis,
            trials,
            failed_trials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use wxbench_core::source::{DataSource, ForecastRequest, MemorySource};
    use wxbench_core::task::CityTask;
    use wxbench_core::options::DateRange;

    #[allow(clippy::cast_precision_loss)]
    fn cities(n: usize) -> Vec<City> {
        (0..n)
            .map(|i| City::new(format!("C{i}"), i as f64, 1.0))
            .collect()
    }

    fn full_source(cities: &[City], days: usize) -> MemorySource {
        let mut source = MemorySource::new();
        for city in cities {
            source.insert_series(city, &vec![18.5; days * 24]);
        }
        source
    }

    fn suite_over(source: Arc<dyn DataSource>) -> ExperimentSuite {
        ExperimentSuite::new(Experiment::new(CityTask::new(source, DateRange::default())))
    }

    #[derive(Default)]
    struct RecordingPresenter {
        seen: Mutex<Vec<usize>>,
        summaries: AtomicUsize,
    }

    impl ResultPresenter for RecordingPresenter {
        fn present_result(&self, result: &ExperimentResult) {
            self.seen.lock().push(result.pool_size);
        }

        fn present_summary(&self, _results: &[ExperimentResult]) {
            self.summaries.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Counts fetches across all trials.
    struct CountingSource {
        inner: MemorySource,
        calls: AtomicUsize,
    }

    impl DataSource for CountingSource {
        fn fetch(&self, request: &ForecastRequest) -> Result<String, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(request)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn one_result_per_config_in_order() {
        let cities = cities(4);
        let suite = suite_over(Arc::new(full_source(&cities, 31)));
        let results = suite.run(&[1, 3], 5, &cities).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].pool_size, 1);
        assert_eq!(results[1].pool_size, 3);
        for r in &results {
            assert!(r.mean_duration_millis >= 0.0);
            assert_eq!(r.trials, 5);
            assert_eq!(r.failed_trials, 0);
        }
    }

    #[test]
    fn every_trial_refetches() {
        let cities = cities(3);
        let source = Arc::new(CountingSource {
            inner: full_source(&cities, 31),
            calls: AtomicUsize::new(0),
        });
        let suite = suite_over(source.clone());
        suite.run(&[1, 2], 4, &cities).unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2 * 4 * 3);
    }

    #[test]
    fn failing_trials_are_counted_not_fatal() {
        let cities = cities(3);
        // Only two of three cities have data; every trial fails.
        let source = full_source(&cities[..2], 31);
        let suite = suite_over(Arc::new(source));
        let results = suite.run(&[1, 2], 3, &cities).unwrap();

        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.failed_trials, 3);
            assert!(r.mean_duration_millis >= 0.0);
        }
        assert_eq!(suite.experiment().live_workers(), 0);
    }

    #[test]
    fn presenter_sees_each_config() {
        let cities = cities(2);
        let presenter = Arc::new(RecordingPresenter::default());
        let suite = suite_over(Arc::new(full_source(&cities, 31))).with_presenter(presenter.clone());
        suite.run(&[3, 1, 9], 1, &cities).unwrap();

        assert_eq!(*presenter.seen.lock(), vec![3, 1, 9]);
        assert_eq!(presenter.summaries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalid_configs_rejected_before_running() {
        let cities = cities(2);
        let source = Arc::new(CountingSource {
            inner: full_source(&cities, 31),
            calls: AtomicUsize::new(0),
        });
        let suite = suite_over(source.clone());

        assert!(matches!(suite.run(&[], 1, &cities), Err(WeatherError::Config(_))));
        assert!(matches!(suite.run(&[2, 0], 1, &cities), Err(WeatherError::Config(_))));
        assert!(matches!(suite.run(&[2], 0, &cities), Err(WeatherError::Config(_))));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn run_with_options_uses_pool_sizes_and_trials() {
        let cities = cities(2);
        let suite = suite_over(Arc::new(full_source(&cities, 31)));
        let opts = SuiteOptions {
            pool_sizes: vec![2, 1],
            trials: 2,
            ..Default::default()
        };
        let results = suite.run_with_options(&opts, &cities).unwrap();
        assert_eq!(results.iter().map(|r| r.pool_size).collect::<Vec<_>>(), vec![2, 1]);
        assert!(results.iter().all(|r| r.trials == 2));
    }

    #[test]
    fn run_with_options_rejects_a_different_range() {
        let cities = cities(2);
        let source = Arc::new(CountingSource {
            inner: full_source(&cities, 1),
            calls: AtomicUsize::new(0),
        });
        let suite = suite_over(source.clone());
        let one_day = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
        let opts = SuiteOptions {
            pool_sizes: vec![1],
            trials: 1,
            date_range: one_day,
        };

        assert!(matches!(
            suite.run_with_options(&opts, &cities),
            Err(WeatherError::Config(_))
        ));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn run_with_options_honors_a_matching_range() {
        let cities = cities(2);
        let one_day = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
        let task = CityTask::new(Arc::new(full_source(&cities, 1)), one_day);
        let suite = ExperimentSuite::new(Experiment::new(task));
        let opts = SuiteOptions {
            pool_sizes: vec![2],
            trials: 2,
            date_range: one_day,
        };

        let results = suite.run_with_options(&opts, &cities).unwrap();
        assert_eq!(results[0].failed_trials, 0);
    }
}
