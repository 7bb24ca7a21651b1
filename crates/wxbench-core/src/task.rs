//! The per-city unit of work: one fetch followed by one aggregation.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::{aggregate, DailyStat};
use crate::catalog::City;
use crate::error::WeatherError;
use crate::observer::ReportSink;
use crate::observers::NoOpSink;
use crate::options::DateRange;
use crate::source::{parse_hourly_series, DataSource, ForecastRequest};

/// Daily statistics computed for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityReport {
    pub city: City,
    pub days: Vec<DailyStat>,
}

/// Fetches and aggregates one city's hourly series over a fixed date range.
///
/// A task is shared by every worker of a trial; `run` may be called
/// concurrently for different cities.
#[derive(Clone)]
pub struct CityTask {
    source: Arc<dyn DataSource>,
    range: DateRange,
    sink: Arc<dyn ReportSink>,
}

impl CityTask {
    /// Create a task reading from `source` that reports nowhere.
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, range: DateRange) -> Self {
        Self {
            source,
            range,
            sink: Arc::new(NoOpSink::new()),
        }
    }

    /// Send successful reports to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Fetch and aggregate `city`. Nothing is reported unless every day
    /// could be computed.
    pub fn run(&self, city: &City) -> Result<CityReport, WeatherError> {
        debug!(city = %city.name, source = self.source.name(), "task started");
        match self.fetch_and_aggregate(city) {
            Ok(report) => {
                self.sink.on_report(&report);
                debug!(city = %city.name, days = report.days.len(), "task finished");
                Ok(report)
            }
            Err(e) => {
                warn!(city = %city.name, error = %e, "task failed");
                Err(e)
            }
        }
    }

    fn fetch_and_aggregate(&self, city: &City) -> Result<CityReport, WeatherError> {
        let request = ForecastRequest::for_city(city, self.range);
        let body = self.source.fetch(&request)?;
        let series = parse_hourly_series(&body)?;
        let days = aggregate(&series, self.range.num_days())?;
        Ok(CityReport {
            city: city.clone(),
            days,
        })
    }
}
