//! Concrete report sink implementations.

use parking_lot::Mutex;
use tracing::debug;

use crate::observer::ReportSink;
use crate::task::CityReport;

/// Sink that discards every report.
pub struct NoOpSink;

impl NoOpSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for NoOpSink {
    fn on_report(&self, _report: &CityReport) {}
}

/// Sink that logs one debug event per day.
pub struct LoggingSink;

impl ReportSink for LoggingSink {
    fn on_report(&self, report: &CityReport) {
        for stat in &report.days {
            debug!(
                city = %report.city.name,
                day = stat.day + 1,
                min = stat.min,
                max = stat.max,
                avg = stat.avg,
                "daily temperature"
            );
        }
    }
}

/// Sink that keeps every report in arrival order.
pub struct CollectingSink {
    reports: Mutex<Vec<CityReport>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
        }
    }

    /// Number of reports received so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    /// Take the collected reports, leaving the sink empty.
    pub fn drain(&self) -> Vec<CityReport> {
        std::mem::take(&mut *self.reports.lock())
    }

    /// Clone the report for `city`, if one arrived.
    #[must_use]
    pub fn find(&self, city: &str) -> Option<CityReport> {
        self.reports
            .lock()
            .iter()
            .find(|r| r.city.name == city)
            .cloned()
    }
}

impl Default for CollectingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for CollectingSink {
    fn on_report(&self, report: &CityReport) {
        self.reports.lock().push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DailyStat;
    use crate::catalog::City;

    fn report(name: &str) -> CityReport {
        CityReport {
            city: City::new(name, 0.0, 0.0),
            days: vec![DailyStat {
                day: 0,
                min: 1.0,
                max: 3.0,
                avg: 2.0,
            }],
        }
    }

    #[test]
    fn noop_sink_accepts_reports() {
        NoOpSink::new().on_report(&report("A"));
    }

    #[test]
    fn logging_sink_accepts_reports() {
        LoggingSink.on_report(&report("A"));
    }

    #[test]
    fn collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());
        sink.on_report(&report("A"));
        sink.on_report(&report("B"));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.find("B").unwrap().city.name, "B");
        assert!(sink.find("C").is_none());

        let drained = sink.drain();
        assert_eq!(drained[0].city.name, "A");
        assert!(sink.is_empty());
    }

    #[test]
    fn collecting_sink_is_shareable() {
        use std::sync::Arc;

        let sink = Arc::new(CollectingSink::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || sink.on_report(&report(&format!("C{i}"))))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(sink.len(), 4);
    }
}
