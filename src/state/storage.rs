//! State storage implementation
//!
//! One conversational label per user identity. Two backends: a process-local
//! map behind a single lock, and Redis with a bounded time-to-live so that
//! abandoned conversations expire on their own.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, error, warn};
use crate::config::RedisConfig;
use crate::utils::errors::Result;
use super::label::{ConversationLabel, UserState};

/// Storage for per-user conversation labels
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Overwrite the label of a user
    async fn set_state(&self, user_id: i64, label: ConversationLabel) -> Result<()>;

    /// Current label of a user; `Ok(None)` when nothing is stored
    async fn get_state(&self, user_id: i64) -> Result<Option<ConversationLabel>>;

    /// Remove the label of a user; clearing a missing entry is not an error
    async fn clear_state(&self, user_id: i64) -> Result<()>;
}

/// Process-local state storage, lost on restart
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    states: Mutex<HashMap<i64, UserState>>,
    ttl: Option<Duration>,
}

impl MemoryStateStore {
    /// Create a store whose entries never expire
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose entries expire after `ttl`
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.states.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn set_state(&self, user_id: i64, label: ConversationLabel) -> Result<()> {
        let mut entry = UserState::new(user_id, label);
        if let Some(ttl) = self.ttl {
            let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365));
            entry = entry.expiring_in(ttl);
        }

        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        if self.ttl.is_some() {
            states.retain(|_, state| !state.is_expired());
        }
        states.insert(user_id, entry);
        debug!(user_id = user_id, label = %label, "State saved in memory");
        Ok(())
    }

    async fn get_state(&self, user_id: i64) -> Result<Option<ConversationLabel>> {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        match states.get(&user_id).map(|entry| (entry.label, entry.is_expired())) {
            Some((_, true)) => {
                debug!(user_id = user_id, "State expired, removing");
                states.remove(&user_id);
                Ok(None)
            }
            Some((label, false)) => Ok(Some(label)),
            None => Ok(None),
        }
    }

    async fn clear_state(&self, user_id: i64) -> Result<()> {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        if states.remove(&user_id).is_some() {
            debug!(user_id = user_id, "Cleared state");
        }
        Ok(())
    }
}

/// Redis-based state storage
#[derive(Clone)]
pub struct RedisStateStore {
    connection_manager: redis::aio::ConnectionManager,
    prefix: String,
    ttl: Duration,
}

impl RedisStateStore {
    /// Connect to Redis and create a new state store
    pub async fn new(config: &RedisConfig, ttl: Duration) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            prefix: config.prefix.clone(),
            ttl,
        })
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// Redis key holding the label of a user
pub fn state_key(prefix: &str, user_id: i64) -> String {
    format!("{}state:{}", prefix, user_id)
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn set_state(&self, user_id: i64, label: ConversationLabel) -> Result<()> {
        let key = state_key(&self.prefix, user_id);
        let mut conn = self.connection_manager.clone();

        let ttl_seconds = self.ttl.as_secs().max(1);
        match conn.set_ex::<_, _, ()>(&key, label.as_str(), ttl_seconds).await {
            Ok(()) => {
                debug!(user_id = user_id, label = %label, ttl_seconds = ttl_seconds, "State saved to Redis");
                Ok(())
            }
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to save state to Redis");
                Err(e.into())
            }
        }
    }

    async fn get_state(&self, user_id: i64) -> Result<Option<ConversationLabel>> {
        let key = state_key(&self.prefix, user_id);
        let mut conn = self.connection_manager.clone();

        let stored: Option<String> = match conn.get::<_, Option<String>>(&key).await {
            Ok(value) => value,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to get state from Redis");
                return Err(e.into());
            }
        };

        match stored {
            Some(value) => match value.parse::<ConversationLabel>() {
                Ok(label) => Ok(Some(label)),
                Err(e) => {
                    warn!(user_id = user_id, value = %value, "Unknown label stored in Redis");
                    Err(e)
                }
            },
            None => Ok(None),
        }
    }

    async fn clear_state(&self, user_id: i64) -> Result<()> {
        let key = state_key(&self.prefix, user_id);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        if deleted > 0 {
            debug!(user_id = user_id, "Deleted state from Redis");
        }
        Ok(())
    }
}
