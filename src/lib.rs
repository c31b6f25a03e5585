// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod display;
pub mod feed;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::FeedConfig;
pub use crate::feed::{
    FeedEnvelope, FeedSource, FeedState, FeedTelemetry, KillEvent, KillfeedPoller,
};
