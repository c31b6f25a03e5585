// src/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "KILLFEED_CONFIG_PATH";
const ENV_ENDPOINT: &str = "KILLFEED_ENDPOINT";
const ENV_INTERVAL_MS: &str = "KILLFEED_INTERVAL_MS";
const ENV_TIMEOUT_MS: &str = "KILLFEED_TIMEOUT_MS";
const ENV_BIND_ADDR: &str = "KILLFEED_BIND_ADDR";

pub const DEFAULT_ENDPOINT: &str = "http://interview.wptdev.com/api/killfeed";
pub const DEFAULT_INTERVAL_MS: u64 = 3_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub interval_ms: u64,
    pub request_timeout_ms: u64,
    pub bind_addr: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            interval_ms: DEFAULT_INTERVAL_MS,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Load config from an explicit TOML path.
pub fn load_from(path: &Path) -> Result<FeedConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading killfeed config from {}", path.display()))?;
    let cfg: FeedConfig = toml::from_str(&content)
        .with_context(|| format!("parsing killfeed config from {}", path.display()))?;
    Ok(cfg)
}

/// Load config using env var + fallbacks, then apply per-field env overrides:
/// 1) $KILLFEED_CONFIG_PATH
/// 2) config/killfeed.toml
/// 3) built-in defaults
pub fn load_default() -> Result<FeedConfig> {
    let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if !pb.exists() {
            return Err(anyhow!("KILLFEED_CONFIG_PATH points to non-existent path"));
        }
        load_from(&pb)?
    } else {
        let toml_p = PathBuf::from("config/killfeed.toml");
        if toml_p.exists() {
            load_from(&toml_p)?
        } else {
            FeedConfig::default()
        }
    };
    apply_env_overrides(&mut cfg)?;
    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut FeedConfig) -> Result<()> {
    if let Ok(v) = std::env::var(ENV_ENDPOINT) {
        if !v.trim().is_empty() {
            cfg.endpoint = v.trim().to_string();
        }
    }
    if let Ok(v) = std::env::var(ENV_INTERVAL_MS) {
        cfg.interval_ms = v
            .trim()
            .parse::<u64>()
            .context("KILLFEED_INTERVAL_MS must be a positive integer")?;
    }
    if let Ok(v) = std::env::var(ENV_TIMEOUT_MS) {
        cfg.request_timeout_ms = v
            .trim()
            .parse::<u64>()
            .context("KILLFEED_TIMEOUT_MS must be a positive integer")?;
    }
    if let Ok(v) = std::env::var(ENV_BIND_ADDR) {
        if !v.trim().is_empty() {
            cfg.bind_addr = v.trim().to_string();
        }
    }
    Ok(())
}
