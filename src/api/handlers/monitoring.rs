//! Prometheus metrics endpoint

use axum::extract::State;
use metrics_exporter_prometheus::PrometheusHandle;

/// Metrics state
#[derive(Clone)]
pub struct MetricsState {
    pub prometheus: PrometheusHandle,
}

/// Renders the recorder's current state in Prometheus text format.
pub async fn render_metrics(State(state): State<MetricsState>) -> String {
    state.prometheus.render()
}
