// src/feed/mod.rs
pub mod poller;
pub mod source;
pub mod types;

pub use poller::{KillfeedPoller, OnUpdate};
pub use source::{FeedSource, HttpFeedSource};
pub use types::{FeedEnvelope, FeedState, KillEvent, STATUS_SUCCESSFUL};

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::config::FeedConfig;

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("killfeed_polls_total", "Poll cycles attempted.");
        describe_counter!(
            "killfeed_poll_errors_total",
            "Cycles that produced no update (transport/protocol/payload/status failures)."
        );
        describe_counter!("killfeed_events_total", "Events merged from successful polls.");
        describe_histogram!("killfeed_fetch_ms", "Fetch duration in milliseconds.");
        describe_gauge!(
            "killfeed_last_success_ts",
            "Unix ts of the last successful poll."
        );
        describe_gauge!(
            "killfeed_poll_interval_ms",
            "Configured spacing between poll cycles."
        );
    });
}

/// Prometheus recorder for the poll-loop series, plus its `/metrics` route.
///
/// Install once at startup, before the poller starts ticking, so the very
/// first cycle's counters land in the recorder.
pub struct FeedTelemetry {
    handle: PrometheusHandle,
}

impl FeedTelemetry {
    pub fn install(cfg: &FeedConfig) -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("installing prometheus recorder")?;

        ensure_metrics_described();
        gauge!("killfeed_poll_interval_ms").set(cfg.interval_ms as f64);

        Ok(Self { handle })
    }

    /// Router exposing `/metrics` in the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        )
    }
}
