//! Prometheus instrumentation for the gateway.
//!
//! A [`Metrics`] instance owns its own [`Registry`], created once at startup
//! and shared through the server state.

use crate::Result;
use prometheus::{
    core::Collector,
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_latency: HistogramVec,
    inference_latency: Histogram,
    inference_errors: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("app_requests_total", "Total HTTP requests"),
            &["endpoint", "method", "http_status"],
        )?;
        let request_latency = HistogramVec::new(
            HistogramOpts::new(
                "app_request_latency_seconds",
                "Latency of requests in seconds",
            ),
            &["endpoint"],
        )?;
        let inference_latency = Histogram::with_opts(HistogramOpts::new(
            "app_inference_latency_seconds",
            "Latency of external AI inference in seconds",
        ))?;
        let inference_errors = IntCounter::new(
            "app_inference_errors_total",
            "Total errors from external AI inference",
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;
        registry.register(Box::new(inference_latency.clone()))?;
        registry.register(Box::new(inference_errors.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_latency,
            inference_latency,
            inference_errors,
        })
    }

    pub fn record_request(&self, endpoint: &str, method: &str, status: u16) {
        let status = status.to_string();
        self.requests_total
            .with_label_values(&[endpoint, method, status.as_str()])
            .inc();
    }

    pub fn observe_request_latency(&self, endpoint: &str, elapsed: Duration) {
        self.request_latency
            .with_label_values(&[endpoint])
            .observe(elapsed.as_secs_f64());
    }

    pub fn observe_inference_latency(&self, elapsed: Duration) {
        self.inference_latency.observe(elapsed.as_secs_f64());
    }

    pub fn record_inference_error(&self) {
        self.inference_errors.inc();
    }

    /// Current value of one `app_requests_total` series; reading never creates it.
    pub fn request_count(&self, endpoint: &str, method: &str, status: u16) -> u64 {
        let status = status.to_string();
        let wanted = [
            ("endpoint", endpoint),
            ("method", method),
            ("http_status", status.as_str()),
        ];

        self.requests_total
            .collect()
            .iter()
            .flat_map(|family| family.get_metric())
            .find(|metric| {
                wanted.iter().all(|(name, value)| {
                    metric
                        .get_label()
                        .iter()
                        .any(|pair| pair.get_name() == *name && pair.get_value() == *value)
                })
            })
            .map(|metric| metric.get_counter().get_value() as u64)
            .unwrap_or(0)
    }

    pub fn inference_error_count(&self) -> u64 {
        self.inference_errors.get()
    }

    /// Renders every registered metric in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| crate::Error::internal(e.to_string()))
    }
}
