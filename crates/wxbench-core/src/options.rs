//! Benchmark options and the requested date window.

use std::fmt;

use time::macros::format_description;
use time::Date;

use crate::constants::{DEFAULT_END_DATE, DEFAULT_POOL_SIZES, DEFAULT_START_DATE, DEFAULT_TRIALS};
use crate::error::WeatherError;

/// Inclusive range of calendar days requested from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Create a range, rejecting an end that precedes the start.
    pub fn new(start: Date, end: Date) -> Result<Self, WeatherError> {
        if end < start {
            return Err(WeatherError::Config(format!(
                "date range ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a pair of `YYYY-MM-DD` dates.
    pub fn parse(start: &str, end: &str) -> Result<Self, WeatherError> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of days covered, counting both ends.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn num_days(&self) -> usize {
        (self.end - self.start).whole_days() as usize + 1
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_DATE,
            end: DEFAULT_END_DATE,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

fn parse_iso_date(s: &str) -> Result<Date, WeatherError> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| WeatherError::Config(format!("invalid date `{s}`: {e}")))
}

/// Options for a benchmark suite run.
#[derive(Debug, Clone)]
pub struct SuiteOptions {
    /// Pool sizes benchmarked, in order.
    pub pool_sizes: Vec<usize>,
    /// Trials run back-to-back per pool size.
    pub trials: u32,
    /// Days fetched for every city.
    pub date_range: DateRange,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            pool_sizes: DEFAULT_POOL_SIZES.to_vec(),
            trials: DEFAULT_TRIALS,
            date_range: DateRange::default(),
        }
    }
}

impl SuiteOptions {
    /// Check the options without substituting defaults.
    pub fn validate(&self) -> Result<(), WeatherError> {
        if self.pool_sizes.is_empty() {
            return Err(WeatherError::Config("no pool sizes configured".into()));
        }
        if let Some(pos) = self.pool_sizes.iter().position(|&n| n == 0) {
            return Err(WeatherError::Config(format!(
                "pool size at position {pos} must be at least 1"
            )));
        }
        if self.trials == 0 {
            return Err(WeatherError::Config("trials per pool size must be at least 1".into()));
        }
        Ok(())
    }
}
