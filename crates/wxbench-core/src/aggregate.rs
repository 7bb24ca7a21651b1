//! Daily reduction of an hourly temperature series.

use serde::Serialize;

use crate::constants::HOURS_PER_DAY;
use crate::error::WeatherError;

/// Hourly temperature readings starting at hour 0 of the first requested day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    readings: Vec<f64>,
}

impl HourlySeries {
    #[must_use]
    pub fn new(readings: Vec<f64>) -> Self {
        Self { readings }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.readings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl From<Vec<f64>> for HourlySeries {
    fn from(readings: Vec<f64>) -> Self {
        Self::new(readings)
    }
}

/// Minimum, maximum, and mean temperature of one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyStat {
    /// Zero-based day offset from the start of the range.
    pub day: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Reduce `num_days` consecutive days of hourly readings to daily statistics.
///
/// The series must hold at least `num_days * 24` readings; anything shorter
/// is rejected before a single day is produced. Readings beyond the last
/// requested day are ignored.
///
/// # Example
/// ```
/// use wxbench_core::aggregate::{aggregate, HourlySeries};
///
/// let series = HourlySeries::new((0..24).map(f64::from).collect());
/// let days = aggregate(&series, 1).unwrap();
/// assert_eq!(days[0].min, 0.0);
/// assert_eq!(days[0].max, 23.0);
/// assert_eq!(days[0].avg, 11.5);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(series: &HourlySeries, num_days: usize) -> Result<Vec<DailyStat>, WeatherError> {
    let expected = num_days
        .checked_mul(HOURS_PER_DAY)
        .ok_or_else(|| WeatherError::Config(format!("{num_days} days overflows the series")))?;
    let readings = series.as_slice();
    if readings.len() < expected {
        return Err(WeatherError::IncompleteSeries {
            expected,
            actual: readings.len(),
        });
    }

    let stats = readings[..expected]
        .chunks_exact(HOURS_PER_DAY)
        .enumerate()
        .map(|(day, hours)| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            let mut sum = 0.0;
            for &t in hours {
                if t < min {
                    min = t;
                }
                if t > max {
                    max = t;
                }
                sum += t;
            }
            DailyStat {
                day,
                min,
                max,
                avg: sum / HOURS_PER_DAY as f64,
            }
        })
        .collect();

    Ok(stats)
}
