use crate::config::Config;
use crate::error::Result;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use reqwest::{redirect, Client};
use std::time::Duration;

const POOL_IDLE_TIMEOUT_SEC: u64 = 90;
const POOL_MAX_IDLE_PER_HOST: usize = 32;

/// Settings that change how a client is built. Batch concurrency does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    timeout_ms: u64,
    max_redirects: usize,
    user_agent: String,
}

impl From<&Config> for ClientKey {
    fn from(cfg: &Config) -> Self {
        Self {
            timeout_ms: cfg.timeout_ms,
            max_redirects: cfg.max_redirects,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

static CLIENT_CACHE: Lazy<DashMap<ClientKey, Client>> = Lazy::new(DashMap::new);

/// Get the cached client for this config, building it on first use.
pub(crate) fn client_for(cfg: &Config) -> Result<Client> {
    let key = ClientKey::from(cfg);
    if let Some(client) = CLIENT_CACHE.get(&key) {
        return Ok(client.clone());
    }

    let client = build_client(&key)?;
    CLIENT_CACHE.insert(key, client.clone());
    Ok(client)
}

fn build_client(key: &ClientKey) -> Result<Client> {
    let client = Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::limited(key.max_redirects))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .user_agent(key.user_agent.as_str())
        .timeout(Duration::from_millis(key.timeout_ms))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .build()?;
    tracing::debug!(timeout_ms = key.timeout_ms, "built http client");
    Ok(client)
}
