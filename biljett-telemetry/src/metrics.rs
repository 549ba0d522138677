//! ## biljett-telemetry::metrics
//! **Prometheus counters for the reservation workload**
//!
//! One counter per operation outcome plus a histogram of time spent blocked
//! in admission, the signal that shows the table saturating.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub inquiries: prometheus::Counter,
    pub bookings: prometheus::Counter,
    pub cancellations: prometheus::Counter,
    pub rejections: prometheus::Counter,
    pub admission_wait: prometheus::Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();

        let inquiries =
            Counter::new("biljett_inquiries_total", "Completed seat inquiries").unwrap();
        let bookings = Counter::new("biljett_bookings_total", "Confirmed seat bookings").unwrap();
        let cancellations =
            Counter::new("biljett_cancellations_total", "Confirmed seat cancellations").unwrap();
        let rejections = Counter::new(
            "biljett_rejections_total",
            "Bookings and cancellations rejected by the capacity rules",
        )
        .unwrap();

        let admission_wait = Histogram::with_opts(
            HistogramOpts::new(
                "biljett_admission_wait_seconds",
                "Time spent blocked in admission acquire",
            )
            .buckets(vec![0.001, 0.01, 0.1, 1.0, 5.0, 30.0]),
        )
        .unwrap();

        registry.register(Box::new(inquiries.clone())).unwrap();
        registry.register(Box::new(bookings.clone())).unwrap();
        registry.register(Box::new(cancellations.clone())).unwrap();
        registry.register(Box::new(rejections.clone())).unwrap();
        registry.register(Box::new(admission_wait.clone())).unwrap();

        Self {
            registry,
            inquiries,
            bookings,
            cancellations,
            rejections,
            admission_wait,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_contains_registered_metrics() {
        let metrics = MetricsRecorder::new();
        metrics.bookings.inc();
        metrics.admission_wait.observe(0.05);

        let rendered = metrics.gather_metrics().unwrap();
        assert!(rendered.contains("biljett_bookings_total"));
        assert!(rendered.contains("biljett_admission_wait_seconds"));
    }
}
