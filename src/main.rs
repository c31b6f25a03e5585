//! Killfeed Poller — Binary Entrypoint
//! Starts the poll loop against the killfeed endpoint and serves the
//! read-only HTTP surface (snapshot, latest kill, detail, /metrics).

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use killfeed_poller::api::{create_router, AppState};
use killfeed_poller::feed::{FeedTelemetry, HttpFeedSource, KillfeedPoller};
use killfeed_poller::{config, FeedState};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("killfeed=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = config::load_default()?;
    let telemetry = FeedTelemetry::install(&cfg)?;

    let source = HttpFeedSource::from_config(&cfg)?;
    let poller = Arc::new(KillfeedPoller::new(Box::new(source)));
    poller.start(
        Duration::from_millis(cfg.interval_ms),
        Box::new(|snap: FeedState| {
            tracing::info!(
                target: "killfeed",
                latest = snap.latest_batch.len(),
                history = snap.history.len(),
                loading = snap.loading,
                "poll tick"
            );
        }),
    );

    let state = AppState {
        poller: Arc::clone(&poller),
    };
    let router = create_router(state).merge(telemetry.router());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(
        target: "killfeed",
        addr = %cfg.bind_addr,
        endpoint = %cfg.endpoint,
        "serving killfeed api"
    );
    axum::serve(listener, router).await?;

    Ok(())
}
