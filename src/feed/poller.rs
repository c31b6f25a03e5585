// src/feed/poller.rs
use std::sync::{Arc, Mutex};
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use tokio::task::JoinHandle;

use crate::feed::source::FeedSource;
use crate::feed::types::FeedState;

/// Callback invoked with a fresh state snapshot after every poll attempt.
pub type OnUpdate = Box<dyn Fn(FeedState) + Send + Sync + 'static>;

/// Owns the feed state and the repeating fetch loop.
///
/// One poller maps to one screen-lifetime of the feed: create it on mount,
/// `start` it, and `stop` (or drop) it on unmount. All cycles run
/// sequentially inside a single spawned task, and every state change is one
/// whole-value replacement under the lock, so `snapshot` never observes a
/// partial merge.
pub struct KillfeedPoller {
    inner: Arc<Inner>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

struct Inner {
    source: Box<dyn FeedSource>,
    state: Mutex<FeedState>,
    /// Gate for `on_update`: the loop checks-and-calls under this lock, and
    /// `stop` sets it under the same lock, so once `stop` returns no further
    /// callback can begin.
    stopped: Mutex<bool>,
}

impl KillfeedPoller {
    pub fn new(source: Box<dyn FeedSource>) -> Self {
        crate::feed::ensure_metrics_described();
        Self {
            inner: Arc::new(Inner {
                source,
                state: Mutex::new(FeedState::default()),
                stopped: Mutex::new(false),
            }),
            handle: Mutex::new(None),
        }
    }

    /// Current feed state. Cheap clone; callers hold no lock afterwards.
    pub fn snapshot(&self) -> FeedState {
        self.inner.state.lock().expect("feed state mutex poisoned").clone()
    }

    /// Run exactly one fetch/parse/merge cycle and return the updated state.
    ///
    /// Failures of any kind (transport, non-2xx, malformed body, or a
    /// non-"successful" status) are logged and absorbed: the lists stay as
    /// they were and the next tick is the retry.
    pub async fn fetch_once(&self) -> FeedState {
        self.inner.run_cycle().await
    }

    /// Begin polling every `interval`, invoking `on_update` after each
    /// attempt. The first poll fires immediately on start; subsequent polls
    /// follow at `interval` spacing.
    ///
    /// A second `start` replaces the previous loop, including after `stop`.
    pub fn start(&self, interval: Duration, on_update: OnUpdate) {
        *self.inner.stopped.lock().expect("stop gate mutex poisoned") = false;

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let snapshot = inner.run_cycle().await;
                let stopped = inner.stopped.lock().expect("stop gate mutex poisoned");
                if *stopped {
                    break;
                }
                // Called with the gate held: `stop` cannot slip between the
                // check and the callback.
                on_update(snapshot);
            }
        });
        let mut slot = self.handle.lock().expect("poller handle mutex poisoned");
        if let Some(old) = slot.replace(task) {
            old.abort();
        }
    }

    /// Cancel the poll loop. Idempotent; safe before `start` or after a
    /// previous `stop`. No `on_update` begins after this returns, even for a
    /// fetch already in flight; a callback already executing is waited out.
    pub fn stop(&self) {
        *self.inner.stopped.lock().expect("stop gate mutex poisoned") = true;
        let mut slot = self.handle.lock().expect("poller handle mutex poisoned");
        if let Some(task) = slot.take() {
            task.abort();
        }
    }
}

impl Drop for KillfeedPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Inner {
    async fn run_cycle(&self) -> FeedState {
        let t0 = std::time::Instant::now();
        counter!("killfeed_polls_total").increment(1);

        let outcome = self.source.fetch().await;
        histogram!("killfeed_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        match &outcome {
            Ok(envelope) if envelope.is_successful() => {
                counter!("killfeed_events_total").increment(envelope.payload.len() as u64);
                gauge!("killfeed_last_success_ts")
                    .set(chrono::Utc::now().timestamp().max(0) as f64);
            }
            Ok(envelope) => {
                tracing::warn!(
                    status = %envelope.status,
                    source = self.source.name(),
                    "killfeed reported non-successful status"
                );
                counter!("killfeed_poll_errors_total").increment(1);
            }
            Err(e) => {
                tracing::warn!(error = ?e, source = self.source.name(), "killfeed fetch failed");
                counter!("killfeed_poll_errors_total").increment(1);
            }
        }

        let mut state = self.state.lock().expect("feed state mutex poisoned");
        state.complete_attempt(outcome);
        state.clone()
    }
}
