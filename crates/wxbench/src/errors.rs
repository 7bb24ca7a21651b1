//! Error handling and exit codes.

use wxbench_core::constants::exit_codes;
use wxbench_core::error::WeatherError;

/// Map a benchmark error to its process exit code.
pub fn handle_error(err: &WeatherError) -> i32 {
    match err {
        WeatherError::Config(_) => exit_codes::ERROR_CONFIG,
        WeatherError::Transport(_)
        | WeatherError::Status { .. }
        | WeatherError::Parse(_)
        | WeatherError::IncompleteSeries { .. }
        | WeatherError::Pool(_) => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any error surfaced by [`crate::app::run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<WeatherError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
