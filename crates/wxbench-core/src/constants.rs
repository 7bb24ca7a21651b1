//! Constants for the benchmark defaults and the forecast API.

use time::macros::date;
use time::Date;

/// Number of hourly readings that make up one day.
pub const HOURS_PER_DAY: usize = 24;

/// Pool sizes benchmarked when none are configured.
pub const DEFAULT_POOL_SIZES: [usize; 4] = [1, 3, 9, 27];

/// Trials run per pool size when not configured.
pub const DEFAULT_TRIALS: u32 = 10;

/// First day of the default request window.
pub const DEFAULT_START_DATE: Date = date!(2024 - 01 - 01);

/// Last day (inclusive) of the default request window.
pub const DEFAULT_END_DATE: Date = date!(2024 - 01 - 31);

/// Forecast endpoint queried by the HTTP data source.
pub const DEFAULT_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly variable requested from the forecast API.
pub const HOURLY_VARIABLE: &str = "temperature_2m";

/// Fractional digits kept when formatting coordinates for a request.
pub const COORDINATE_PRECISION: usize = 5;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
