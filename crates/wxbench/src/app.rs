//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use wxbench_cli::presenter::{CLIResultPresenter, ConsoleReportSink, ResultFormat};
use wxbench_core::catalog::catalog;
use wxbench_core::observer::ReportSink;
use wxbench_core::observers::LoggingSink;
use wxbench_core::options::SuiteOptions;
use wxbench_core::source::{DataSource, OpenMeteoSource};
use wxbench_core::task::CityTask;
use wxbench_orchestration::experiment::Experiment;
use wxbench_orchestration::interfaces::ExperimentResult;
use wxbench_orchestration::suite::ExperimentSuite;

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        wxbench_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let opts = config.suite_options()?;
    let timeout = config.timeout_duration()?;
    let source: Arc<dyn DataSource> = Arc::new(OpenMeteoSource::new(&config.endpoint, timeout));

    run_suite(config, &opts, source)?;
    Ok(())
}

/// Benchmark every configured pool size against `source`.
pub fn run_suite(
    config: &AppConfig,
    opts: &SuiteOptions,
    source: Arc<dyn DataSource>,
) -> Result<Vec<ExperimentResult>> {
    let cities = catalog();

    // Day lines would break the JSON document on stdout.
    let sink: Arc<dyn ReportSink> = if config.quiet || config.json {
        Arc::new(LoggingSink)
    } else {
        Arc::new(ConsoleReportSink)
    };
    let format = if config.json {
        ResultFormat::Json
    } else {
        ResultFormat::Text
    };

    let task = CityTask::new(source, opts.date_range).with_sink(sink);
    let experiment = Experiment::new(task).with_join_policy(config.join_policy.into());
    let suite =
        ExperimentSuite::new(experiment).with_presenter(Arc::new(CLIResultPresenter::new(format)));

    info!(
        cities = cities.len(),
        pool_sizes = ?opts.pool_sizes,
        trials = opts.trials,
        range = %opts.date_range,
        "starting suite"
    );
    Ok(suite.run_with_options(opts, &cities)?)
}
