//! Data sources returning hourly forecast documents.
//!
//! `DataSource` is the contract the task depends on: given a coordinate and a
//! date window, return the raw JSON document. `OpenMeteoSource` talks to the
//! forecast API over HTTP; `MemorySource` serves canned documents keyed by
//! coordinate, for offline runs and tests.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use time::Date;
use tracing::debug;

use crate::aggregate::HourlySeries;
use crate::catalog::City;
use crate::constants::{COORDINATE_PRECISION, DEFAULT_ENDPOINT, HOURLY_VARIABLE};
use crate::error::WeatherError;
use crate::options::DateRange;

/// Everything a data source needs to answer for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start: Date,
    pub end: Date,
}

impl ForecastRequest {
    #[must_use]
    pub fn for_city(city: &City, range: DateRange) -> Self {
        Self {
            latitude: city.latitude,
            longitude: city.longitude,
            start: range.start(),
            end: range.end(),
        }
    }

    /// Query parameters in the order the forecast API documents them.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 5] {
        [
            ("latitude", format_coordinate(self.latitude)),
            ("longitude", format_coordinate(self.longitude)),
            ("hourly", HOURLY_VARIABLE.to_string()),
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
        ]
    }
}

/// Format a coordinate with at most five fractional digits, trimming zeros.
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    let s = format!("{value:.prec$}", prec = COORDINATE_PRECISION);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Provider of hourly forecast documents.
pub trait DataSource: Send + Sync {
    /// Fetch the raw JSON document covering the request.
    fn fetch(&self, request: &ForecastRequest) -> Result<String, WeatherError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

#[derive(Deserialize)]
struct ForecastDocument {
    hourly: HourlyBlock,
}

#[derive(Deserialize)]
struct HourlyBlock {
    temperature_2m: Vec<f64>,
}

/// Extract `hourly.temperature_2m` from a forecast document.
pub fn parse_hourly_series(body: &str) -> Result<HourlySeries, WeatherError> {
    let doc: ForecastDocument = serde_json::from_str(body)?;
    Ok(HourlySeries::new(doc.hourly.temperature_2m))
}

/// Forecast API client over blocking HTTP.
pub struct OpenMeteoSource {
    agent: ureq::Agent,
    endpoint: String,
}

impl OpenMeteoSource {
    /// Create a client for `endpoint`, optionally bounding each request.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OpenMeteoSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }
}

impl DataSource for OpenMeteoSource {
    fn fetch(&self, request: &ForecastRequest) -> Result<String, WeatherError> {
        let pairs = request.query_pairs();
        let mut call = self.agent.get(&self.endpoint);
        for (key, value) in &pairs {
            call = call.query(key, value);
        }
        debug!(url = %call.url(), "GET forecast");

        let response = match call.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(WeatherError::Status {
                    status,
                    url: response.get_url().to_string(),
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(WeatherError::Transport(transport.to_string()))
            }
        };

        response
            .into_string()
            .map_err(|e| WeatherError::Transport(format!("reading body: {e}")))
    }

    fn name(&self) -> &str {
        "open-meteo"
    }
}

/// Serves canned documents keyed by coordinate.
#[derive(Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the document returned for `city`.
    pub fn insert(&mut self, city: &City, document: impl Into<String>) {
        self.documents
            .insert(coordinate_key(city.latitude, city.longitude), document.into());
    }

    /// Register a document built from a plain series of readings.
    pub fn insert_series(&mut self, city: &City, readings: &[f64]) {
        let doc = serde_json::json!({ "hourly": { HOURLY_VARIABLE: readings } });
        self.insert(city, doc.to_string());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, request: &ForecastRequest) -> Result<String, WeatherError> {
        let key = coordinate_key(request.latitude, request.longitude);
        self.documents
            .get(&key)
            .cloned()
            .ok_or_else(|| WeatherError::Status {
                status: 404,
                url: format!("memory://{key}"),
            })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn coordinate_key(latitude: f64, longitude: f64) -> String {
    format!(
        "{},{}",
        format_coordinate(latitude),
        format_coordinate(longitude)
    )
}
