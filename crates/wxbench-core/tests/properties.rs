//! Property-based tests for the daily aggregation.

use proptest::prelude::*;

use wxbench_core::aggregate::{aggregate, HourlySeries};
use wxbench_core::error::WeatherError;

const EPS: f64 = 1e-9;

fn series_for_days(max_days: usize) -> impl Strategy<Value = (usize, Vec<f64>)> {
    (0..=max_days).prop_flat_map(|days| {
        (
            Just(days),
            prop::collection::vec(-60.0f64..60.0, days * 24),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Exactly one stat per day, each with min <= avg <= max.
    #[test]
    fn one_stat_per_day_and_ordered((days, readings) in series_for_days(40)) {
        let stats = aggregate(&HourlySeries::new(readings), days).unwrap();
        prop_assert_eq!(stats.len(), days);
        for (i, s) in stats.iter().enumerate() {
            prop_assert_eq!(s.day, i);
            prop_assert!(s.min <= s.avg + EPS, "day {}: min {} > avg {}", i, s.min, s.avg);
            prop_assert!(s.avg <= s.max + EPS, "day {}: avg {} > max {}", i, s.avg, s.max);
        }
    }

    /// Each day's values match a direct computation over its 24 readings.
    #[test]
    fn matches_direct_computation((days, readings) in series_for_days(10)) {
        let stats = aggregate(&HourlySeries::new(readings.clone()), days).unwrap();
        for s in &stats {
            let hours = &readings[s.day * 24..(s.day + 1) * 24];
            let min = hours.iter().copied().fold(f64::INFINITY, f64::min);
            let max = hours.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg = hours.iter().sum::<f64>() / 24.0;
            prop_assert_eq!(s.min, min);
            prop_assert_eq!(s.max, max);
            prop_assert!((s.avg - avg).abs() < EPS);
        }
    }

    /// Aggregating the same series twice gives the same answer.
    #[test]
    fn idempotent((days, readings) in series_for_days(10)) {
        let series = HourlySeries::new(readings);
        prop_assert_eq!(aggregate(&series, days).unwrap(), aggregate(&series, days).unwrap());
    }

    /// A series missing any reading is rejected, never truncated.
    #[test]
    fn short_series_rejected(days in 1usize..40, missing in 1usize..24) {
        let readings = vec![20.0; days * 24 - missing];
        let result = aggregate(&HourlySeries::new(readings), days);
        prop_assert_eq!(
            result,
            Err(WeatherError::IncompleteSeries { expected: days * 24, actual: days * 24 - missing })
        );
    }
}
