// src/feed/source.rs
use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::FeedConfig;
use crate::feed::types::FeedEnvelope;

/// Something the poller can ask for the current killfeed envelope.
///
/// The production implementation is [`HttpFeedSource`]; tests script their
/// own sources to drive the poller deterministically.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<FeedEnvelope>;
    fn name(&self) -> &'static str;
}

/// Fetches the killfeed envelope with a single GET per poll.
///
/// Non-2xx responses are promoted to errors so the poller treats them the
/// same as transport failures. The request timeout bounds how long a cycle
/// can hold an in-flight request when the endpoint is slower than the poll
/// interval.
pub struct HttpFeedSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn from_config(cfg: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .context("building killfeed http client")?;
        Ok(Self {
            endpoint: cfg.endpoint.clone(),
            client,
        })
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            endpoint: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<FeedEnvelope> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .context("killfeed http get()")?;
        let resp = resp
            .error_for_status()
            .context("killfeed non-success http status")?;
        let envelope = resp
            .json::<FeedEnvelope>()
            .await
            .context("parsing killfeed json envelope")?;
        Ok(envelope)
    }

    fn name(&self) -> &'static str {
        "killfeed"
    }
}
