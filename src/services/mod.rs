//! Services module
//!
//! This module contains the collector client, the token cache and the
//! registration service built on them.

pub mod auth;
pub mod cache;
pub mod collector;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used services
pub use auth::AuthService;
pub use cache::{MemoryTokenCache, RedisTokenCache, TokenCache};
pub use collector::{CollectorApi, HttpCollectorClient};

use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use crate::config::{Settings, StoreBackend};
use crate::state::{MemoryStateStore, RedisStateStore, StateStore};
use crate::utils::errors::Result;

/// Service factory for creating the backends selected in configuration
#[derive(Clone)]
pub struct ServiceFactory {
    pub state_store: Arc<dyn StateStore>,
    pub token_cache: Arc<dyn TokenCache>,
    pub collector: Arc<dyn CollectorApi>,
}

impl ServiceFactory {
    /// Create all services from settings, connecting to Redis when selected
    pub async fn new(settings: &Settings) -> Result<Self> {
        let state_store: Arc<dyn StateStore> = match settings.state.backend {
            // state.ttl_seconds only applies to Redis; memory state lives until cleared
            StoreBackend::Memory => {
                info!("Using in-memory conversation state");
                Arc::new(MemoryStateStore::new())
            }
            StoreBackend::Redis => {
                info!("Connecting to Redis for conversation state...");
                let store = RedisStateStore::new(&settings.redis, settings.state.ttl()).await?;
                store.test_connection().await?;
                Arc::new(store)
            }
        };

        let token_cache: Arc<dyn TokenCache> = match settings.auth.token_cache {
            StoreBackend::Memory => Arc::new(MemoryTokenCache::new(settings.auth.token_ttl())),
            StoreBackend::Redis => {
                info!("Connecting to Redis for the token cache...");
                Arc::new(RedisTokenCache::new(&settings.redis, settings.auth.token_ttl()).await?)
            }
        };

        let collector = Arc::new(HttpCollectorClient::new(&settings.collector)?);

        Ok(Self {
            state_store,
            token_cache,
            collector,
        })
    }
}

/// Username the bot answers to in `/command@username`
///
/// A configured name wins; otherwise it is fetched with `getMe`.
pub async fn resolve_bot_username(bot: &Bot, configured: &str) -> Result<String> {
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }

    let me = bot.get_me().await?;
    let username = me.username().to_string();
    info!(username = %username, "Resolved bot username from Telegram");
    Ok(username)
}
