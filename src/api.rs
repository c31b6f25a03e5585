// src/api.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::display;
use crate::feed::types::{FeedState, KillEvent};
use crate::feed::KillfeedPoller;

#[derive(Clone)]
pub struct AppState {
    pub poller: Arc<KillfeedPoller>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/killfeed", get(killfeed))
        .route("/killfeed/latest", get(latest_kill))
        .route("/killfeed/{index}", get(kill_detail))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Full snapshot: the latest batch plus the cumulative newest-first history.
async fn killfeed(State(state): State<AppState>) -> Json<FeedState> {
    Json(state.poller.snapshot())
}

#[derive(serde::Serialize)]
struct LatestKillOut {
    headline: String,
    final_blow: String,
    event: KillEvent,
}

/// The banner item: first event of the most recent successful batch, or
/// `null` before any batch has arrived.
async fn latest_kill(State(state): State<AppState>) -> Json<Option<LatestKillOut>> {
    let snap = state.poller.snapshot();
    let out = snap.latest_batch.first().map(|ev| LatestKillOut {
        headline: display::headline(ev),
        final_blow: display::final_blow(ev),
        event: ev.clone(),
    });
    Json(out)
}

#[derive(serde::Serialize)]
struct KillDetailOut {
    headline: String,
    lines: Vec<String>,
    event: KillEvent,
}

/// Detail view for `history[index]`; 404 past the end.
async fn kill_detail(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<KillDetailOut>, StatusCode> {
    let snap = state.poller.snapshot();
    match snap.history.get(index) {
        Some(ev) => Ok(Json(KillDetailOut {
            headline: display::headline(ev),
            lines: display::detail_lines(ev),
            event: ev.clone(),
        })),
        None => Err(StatusCode::NOT_FOUND),
    }
}
