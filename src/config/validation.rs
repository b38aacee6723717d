//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{OupheError, Result};
use super::{Settings, StoreBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_collector_config(&settings.collector)?;
    validate_state_config(&settings.state)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;

    let needs_redis = settings.state.backend == StoreBackend::Redis
        || settings.auth.token_cache == StoreBackend::Redis;
    if needs_redis {
        validate_redis_config(&settings.redis)?;
    }

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(OupheError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate collector service configuration
fn validate_collector_config(config: &super::CollectorConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(OupheError::Config(
            "Collector URL is required".to_string()
        ));
    }

    let url = url::Url::parse(&config.url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(OupheError::Config(
            format!("Collector URL must be http(s), got {}", url.scheme())
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(OupheError::Config(
            "Collector timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate conversation state configuration
fn validate_state_config(config: &super::StateConfig) -> Result<()> {
    if config.ttl_seconds == 0 {
        return Err(OupheError::Config(
            "State TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate token cache configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.token_ttl_seconds == 0 {
        return Err(OupheError::Config(
            "Token cache TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(OupheError::Config(
            "Redis URL is required when a Redis backend is selected".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(OupheError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(OupheError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
