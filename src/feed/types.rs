// src/feed/types.rs
use serde::{Deserialize, Serialize};

/// Envelope `status` value that carries a mergeable payload.
pub const STATUS_SUCCESSFUL: &str = "successful";

/// One kill event as delivered by the killfeed endpoint.
///
/// The endpoint guarantees no unique or stable identifier, so the same event
/// may legitimately appear more than once across polls; callers must not
/// assume otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub source_character: String,
    pub source_player_id: String,
    pub target_character: String,
    pub target_player_id: String,
    pub method: String,
    pub damage: f64,
    pub platform: String,
    pub region: String,
}

/// Wire envelope: `{ "status": "...", "payload": [ ... ] }`.
///
/// `payload` is absent on non-successful responses (observed:
/// `{"status":"failed"}`), so it defaults to empty.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedEnvelope {
    pub status: String,
    #[serde(default)]
    pub payload: Vec<KillEvent>,
}

impl FeedEnvelope {
    pub fn successful(payload: Vec<KillEvent>) -> Self {
        Self {
            status: STATUS_SUCCESSFUL.to_string(),
            payload,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.status == STATUS_SUCCESSFUL
    }
}

/// Accumulated feed state, owned by the poller and cloned out to consumers.
///
/// `history` is newest-batch-first: after N successful polls it equals the
/// concatenation of batch N down to batch 1, with intra-batch order intact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedState {
    pub latest_batch: Vec<KillEvent>,
    pub history: Vec<KillEvent>,
    /// True until the first poll attempt completes, success or failure.
    pub loading: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            latest_batch: Vec::new(),
            history: Vec::new(),
            loading: true,
        }
    }
}

impl FeedState {
    /// Complete one poll attempt against this state.
    ///
    /// A successful envelope replaces `latest_batch` and prepends it to
    /// `history`; any other status, and any fetch/parse error, leaves both
    /// lists untouched. `loading` drops to false either way and never
    /// reverts.
    pub fn complete_attempt(&mut self, outcome: anyhow::Result<FeedEnvelope>) {
        if let Ok(envelope) = outcome {
            if envelope.is_successful() {
                let mut merged = envelope.payload.clone();
                merged.append(&mut self.history);
                self.latest_batch = envelope.payload;
                self.history = merged;
            }
        }
        self.loading = false;
    }
}
