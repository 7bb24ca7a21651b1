//! # wxbench-core
//!
//! Core library for the wxbench pool-size benchmark: the city catalog, the
//! daily aggregation of hourly temperature series, the data source contract,
//! and the per-city fetch-and-aggregate task.

pub mod aggregate;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod observer;
pub mod observers;
pub mod options;
pub mod source;
pub mod task;

// Re-exports
pub use aggregate::{aggregate, DailyStat, HourlySeries};
pub use catalog::{catalog, City};
pub use constants::{
    exit_codes, DEFAULT_END_DATE, DEFAULT_ENDPOINT, DEFAULT_POOL_SIZES, DEFAULT_START_DATE,
    DEFAULT_TRIALS, HOURS_PER_DAY,
};
pub use error::WeatherError;
pub use observer::ReportSink;
pub use options::{DateRange, SuiteOptions};
pub use source::{DataSource, ForecastRequest, MemorySource, OpenMeteoSource};
pub use task::{CityReport, CityTask};
