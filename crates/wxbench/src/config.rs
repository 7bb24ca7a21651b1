//! Application configuration from CLI flags and environment.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use wxbench_core::constants::{DEFAULT_ENDPOINT, DEFAULT_TRIALS};
use wxbench_core::error::WeatherError;
use wxbench_core::options::{DateRange, SuiteOptions};
use wxbench_orchestration::experiment::JoinPolicy;

/// Measure how fetching and aggregating hourly weather data for
/// every city scales with the size of a bounded worker pool.
#[derive(Parser, Debug)]
#[command(name = "wxbench", version, about)]
pub struct AppConfig {
    /// Pool sizes to benchmark, comma separated.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "1,3,9,27",
        env = "WXBENCH_POOL_SIZES"
    )]
    pub pool_sizes: Vec<usize>,

    /// Trials run per pool size.
    #[arg(short, long, default_value_t = DEFAULT_TRIALS, env = "WXBENCH_TRIALS")]
    pub trials: u32,

    /// First day requested (YYYY-MM-DD).
    #[arg(long, default_value = "2024-01-01")]
    pub start: String,

    /// Last day requested, inclusive (YYYY-MM-DD).
    #[arg(long, default_value = "2024-01-31")]
    pub end: String,

    /// Forecast API endpoint.
    #[arg(long, default_value = DEFAULT_ENDPOINT, env = "WXBENCH_ENDPOINT")]
    pub endpoint: String,

    /// Per-request timeout (e.g., "30s", "500ms", "2m"). No timeout by default.
    #[arg(long)]
    pub timeout: Option<String>,

    /// What a trial does when a city fails.
    #[arg(long, value_enum, default_value = "drain-all")]
    pub join_policy: JoinPolicyArg,

    /// Do not print the per-day city lines.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print results as JSON instead of summary lines.
    #[arg(long)]
    pub json: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

/// Join policy as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JoinPolicyArg {
    /// Let every city finish, then report the first failure.
    DrainAll,
    /// Stop starting cities after the first failure.
    FailFast,
}

impl From<JoinPolicyArg> for JoinPolicy {
    fn from(arg: JoinPolicyArg) -> Self {
        match arg {
            JoinPolicyArg::DrainAll => JoinPolicy::DrainAll,
            JoinPolicyArg::FailFast => JoinPolicy::FailFast,
        }
    }
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Build validated suite options from the flags.
    pub fn suite_options(&self) -> Result<SuiteOptions, WeatherError> {
        let opts = SuiteOptions {
            pool_sizes: self.pool_sizes.clone(),
            trials: self.trials,
            date_range: DateRange::parse(&self.start, &self.end)?,
        };
        opts.validate()?;
        Ok(opts)
    }

    /// Parse the timeout flag, if given.
    pub fn timeout_duration(&self) -> Result<Option<Duration>, WeatherError> {
        self.timeout
            .as_deref()
            .map(|s| {
                parse_duration(s)
                    .ok_or_else(|| WeatherError::Config(format!("invalid timeout `{s}`")))
            })
            .transpose()
    }
}

/// Parse a duration string like "5m", "1h", "30s", "250ms".
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(3600)?))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_secs(n))
    }
}
