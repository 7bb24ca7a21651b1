//! Error type shared by every wxbench crate.

/// Error type for fetching, parsing, and benchmarking.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeatherError {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The data source answered with a non-success status.
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body is not the expected JSON document.
    #[error("parse error: {0}")]
    Parse(String),

    /// The hourly series does not cover the requested days.
    #[error("hourly series too short: need {expected} readings, got {actual}")]
    IncompleteSeries { expected: usize, actual: usize },

    /// Invalid benchmark configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The worker pool could not be built or torn down.
    #[error("worker pool error: {0}")]
    Pool(String),
}

impl WeatherError {
    /// Whether the failure happened while talking to the data source.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// Whether the data source answered but the document was unusable.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::IncompleteSeries { .. })
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
