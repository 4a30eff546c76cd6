//! Request duration histogram and its text exposition.

use prometheus::{Encoder, HistogramOpts, HistogramTimer, HistogramVec, Registry, TextEncoder};

/// Histogram name for request durations.
pub const REQUEST_DURATION: &str = "catalog_http_request_duration_seconds";

const BUCKETS: [f64; 12] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Request metrics, recorded into a registry owned by this value.
///
/// Cheap to clone: the registry and histogram are `Arc`-backed.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    request_duration: HistogramVec,
}

impl Metrics {
    /// Create a fresh registry with the request duration histogram registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram definition is rejected.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let request_duration = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION, "HTTP request duration in seconds")
                .buckets(BUCKETS.to_vec()),
            &["method", "route"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;
        Ok(Self {
            registry,
            request_duration,
        })
    }

    /// Start timing a request. The duration is observed when the timer drops.
    pub fn start_timer(&self, method: &str, route: &str) -> HistogramTimer {
        self.request_duration
            .with_label_values(&[method, route])
            .start_timer()
    }

    /// Number of observations recorded for `method` + `route`.
    #[cfg(test)]
    pub fn sample_count(&self, method: &str, route: &str) -> u64 {
        self.request_duration
            .with_label_values(&[method, route])
            .get_sample_count()
    }

    /// Render all registered metrics. Returns `(content_type, body)`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(&self) -> Result<(String, Vec<u8>), prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok((encoder.format_type().to_owned(), buffer))
    }
}
