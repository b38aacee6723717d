//! Auth token cache
//!
//! Keeps the collector token of registered users so the registration gate does
//! not hit the collector on every message.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;
use crate::config::RedisConfig;
use crate::state::AuthToken;
use crate::utils::errors::Result;

/// Storage for per-user auth tokens
#[async_trait]
pub trait TokenCache: Send + Sync {
    async fn get(&self, user_id: i64) -> Result<Option<AuthToken>>;

    async fn set(&self, user_id: i64, token: &AuthToken) -> Result<()>;
}

/// Process-local token cache with a fixed time-to-live
#[derive(Debug)]
pub struct MemoryTokenCache {
    entries: Mutex<HashMap<i64, (AuthToken, Instant)>>,
    ttl: Duration,
}

impl MemoryTokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of cached tokens, expired ones not yet swept included
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get(&self, user_id: i64) -> Result<Option<AuthToken>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let cached = entries
            .get(&user_id)
            .map(|(token, stored_at)| (token.clone(), stored_at.elapsed() >= self.ttl));

        match cached {
            Some((_, true)) => {
                entries.remove(&user_id);
                Ok(None)
            }
            Some((token, false)) => Ok(Some(token)),
            None => Ok(None),
        }
    }

    async fn set(&self, user_id: i64, token: &AuthToken) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, (_, stored_at)| stored_at.elapsed() < self.ttl);
        entries.insert(user_id, (token.clone(), Instant::now()));
        Ok(())
    }
}

/// Redis-backed token cache
#[derive(Clone)]
pub struct RedisTokenCache {
    connection_manager: redis::aio::ConnectionManager,
    prefix: String,
    ttl: Duration,
}

impl RedisTokenCache {
    pub async fn new(config: &RedisConfig, ttl: Duration) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            prefix: config.prefix.clone(),
            ttl,
        })
    }
}

/// Redis key holding the token of a user
pub fn token_key(prefix: &str, user_id: i64) -> String {
    format!("{}cache:{}", prefix, user_id)
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get(&self, user_id: i64) -> Result<Option<AuthToken>> {
        let mut conn = self.connection_manager.clone();
        let value: Option<String> = conn.get(token_key(&self.prefix, user_id)).await?;
        Ok(value.map(AuthToken::new))
    }

    async fn set(&self, user_id: i64, token: &AuthToken) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let ttl_seconds = self.ttl.as_secs().max(1);
        let _: () = conn
            .set_ex(token_key(&self.prefix, user_id), token.as_str(), ttl_seconds)
            .await?;
        debug!(user_id = user_id, ttl_seconds = ttl_seconds, "Cached auth token");
        Ok(())
    }
}
