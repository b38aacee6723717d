//! Authentication service implementation
//!
//! Registration of Telegram users in the collector service and lookup of
//! their auth token, backed by a token cache.

use std::sync::Arc;
use tracing::{debug, error, info};
use crate::models::{CheckUserRequest, RegisterRequest, TelegramUser};
use crate::state::AuthToken;
use crate::utils::errors::{CollectorError, OupheError, Result};
use crate::utils::logging::log_error;
use super::cache::TokenCache;
use super::collector::CollectorApi;

/// Authentication service for registration checks
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn CollectorApi>,
    cache: Arc<dyn TokenCache>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(api: Arc<dyn CollectorApi>, cache: Arc<dyn TokenCache>) -> Self {
        Self { api, cache }
    }

    /// Token of a registered user, or `None` when the user is not registered
    ///
    /// Collector failures are logged and count as "not registered".
    pub async fn is_registered(&self, user_id: i64) -> Option<AuthToken> {
        match self.cache.get(user_id).await {
            Ok(Some(token)) => {
                debug!(user_id = user_id, "User found in token cache");
                return Some(token);
            }
            Ok(None) => {}
            Err(e) => log_error(&e, Some(user_id), "Failed to read token cache"),
        }

        let response = match self.api.check_user(&CheckUserRequest { telegram_id: user_id }).await {
            Ok(response) => response,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to check registration in collector service");
                return None;
            }
        };

        if !response.success || response.token.is_empty() {
            debug!(user_id = user_id, "User is not registered");
            return None;
        }

        info!(user_id = user_id, "User found in collector service");
        let token = AuthToken::new(response.token);
        self.remember(user_id, &token).await;
        Some(token)
    }

    /// Register a user in the collector service and cache the issued token
    pub async fn register(&self, user: &TelegramUser) -> Result<AuthToken> {
        info!(user_id = user.id, "Registering user");

        let response = self.api.register_user(&RegisterRequest::from(user)).await?;
        if response.token.is_empty() {
            return Err(OupheError::Collector(CollectorError::InvalidResponse(
                "registration returned an empty token".to_string(),
            )));
        }

        let token = AuthToken::new(response.token);
        self.remember(user.id, &token).await;
        Ok(token)
    }

    async fn remember(&self, user_id: i64, token: &AuthToken) {
        if let Err(e) = self.cache.set(user_id, token).await {
            log_error(&e, Some(user_id), "Failed to cache auth token");
        }
    }
}
