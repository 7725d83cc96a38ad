// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

// Re-export for public API
pub use server::metrics_handler;

// ============================================================================
// Metrics Module - Prometheus metrics for both services
// ============================================================================
//
// - HTTP requests by route and status
// - Orders created and rejected
// - Prediction outcomes and latency
// - Upstream circuit breaker state
//
// Each service builds its own registry and serves it on /metrics.
//
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // HTTP
    pub http_requests_total: IntCounterVec,

    // Order store
    pub orders_created_total: IntCounter,
    pub orders_rejected_total: IntCounterVec,

    // Prediction
    pub predictions_total: IntCounterVec,
    pub prediction_duration: HistogramVec,

    // Upstream
    pub upstream_circuit_state: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests handled"),
            &["route", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let orders_created_total = IntCounter::new("orders_created_total", "Orders accepted into the store")?;
        registry.register(Box::new(orders_created_total.clone()))?;

        let orders_rejected_total = IntCounterVec::new(
            Opts::new("orders_rejected_total", "Orders rejected by the store"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_rejected_total.clone()))?;

        let predictions_total = IntCounterVec::new(
            Opts::new("predictions_total", "Price predictions by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let prediction_duration = HistogramVec::new(
            HistogramOpts::new("prediction_duration_seconds", "Fetch plus fit plus evaluate time")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(prediction_duration.clone()))?;

        let upstream_circuit_state = IntGauge::new(
            "upstream_circuit_state",
            "Order service circuit breaker state (0=Closed, 1=Open, 2=HalfOpen)",
        )?;
        registry.register(Box::new(upstream_circuit_state.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            orders_created_total,
            orders_rejected_total,
            predictions_total,
            prediction_duration,
            upstream_circuit_state,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_request(&self, route: &str, status: u16) {
        self.http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    pub fn record_order_created(&self) {
        self.orders_created_total.inc();
    }

    pub fn record_order_rejected(&self, reason: &str) {
        self.orders_rejected_total.with_label_values(&[reason]).inc();
    }

    pub fn record_prediction(&self, outcome: &str, duration_secs: f64) {
        self.predictions_total.with_label_values(&[outcome]).inc();
        self.prediction_duration
            .with_label_values(&[outcome])
            .observe(duration_secs);
    }

    pub fn set_upstream_circuit_state(&self, state: i64) {
        self.upstream_circuit_state.set(state);
    }
}
