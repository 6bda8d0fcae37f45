//! Sunlight API client.
//!
//! Every business call goes through the same two stages: get a bearer token
//! (from cache, or from the token endpoint on a miss) and then issue the call
//! with the platform `Authorization` header plus `SFAccessToken: Bearer ..`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::Client;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::token_cache::ExpiringCache;
use crate::cache::ACCESS_TOKEN_KEY;
use crate::config::types::{BaseUrls, Config, ConfigUpdate};
use crate::helpers::time::{system_clock, Clock};
use crate::transport::Transport;

pub mod api_error;
pub mod endpoints;
pub mod pipeline;

/// Clones share configuration and the token cache.
#[derive(Debug, Clone)]
pub struct SunlightClient<T = Client> {
    transport: T,
    base_urls: BaseUrls,
    config: Arc<RwLock<Config>>,
    /// Bumped under the config write lock on every update
    config_generation: Arc<AtomicU64>,
    pub(crate) token_cache: ExpiringCache<String>,
}

impl SunlightClient<Client> {
    pub fn new() -> Self {
        Self::with_transport(Client::new())
    }
}

impl Default for SunlightClient<Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> SunlightClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_urls: BaseUrls::default(),
            config: Arc::new(RwLock::new(Config::default())),
            config_generation: Arc::new(AtomicU64::new(0)),
            token_cache: ExpiringCache::with_clock(system_clock()),
        }
    }

    /// Replace the test/production roots the client picks from
    pub fn with_base_urls(mut self, base_urls: BaseUrls) -> Self {
        self.base_urls = base_urls;
        self
    }

    /// Clock used for token expiry; starts with an empty cache
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.token_cache = ExpiringCache::with_clock(clock);
        self
    }

    /// Merge `update` into the configuration and drop the cached token.
    ///
    /// The token is dropped on every call, even if no credential changed.
    pub async fn update_config(&self, update: ConfigUpdate) {
        {
            let mut config = self.config.write().await;
            config.merge(&update, &self.base_urls);
            self.config_generation.fetch_add(1, Ordering::SeqCst);
            info!(
                base_url = config.base_url.as_deref().unwrap_or_default(),
                token_cache_expiry_ms = u64::try_from(config.access_token_cache_expiry.as_millis()).unwrap_or(u64::MAX),
                "sunlight config updated"
            );
        }
        self.token_cache.reset(ACCESS_TOKEN_KEY).await;
    }

    /// Snapshot of the current configuration
    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }

    /// Root every relative path is resolved against
    pub async fn base_url(&self) -> String {
        self.config
            .read()
            .await
            .base_url
            .clone()
            .unwrap_or_else(|| self.base_urls.production.clone())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
