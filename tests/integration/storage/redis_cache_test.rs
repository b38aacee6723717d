//! Auth token cache in Redis

use std::time::Duration;
use redis::AsyncCommands;
use serial_test::serial;
use CollectorOuphe::services::cache::token_key;
use CollectorOuphe::services::{RedisTokenCache, TokenCache};
use CollectorOuphe::state::AuthToken;
use crate::helpers::TestRedis;

#[tokio::test]
#[serial]
async fn test_token_roundtrip() {
    let redis = TestRedis::new().await;
    let cache = RedisTokenCache::new(&redis.config, Duration::from_secs(60)).await.unwrap();

    assert_eq!(cache.get(5).await.unwrap(), None);
    cache.set(5, &AuthToken::new("jwt-5")).await.unwrap();
    assert_eq!(cache.get(5).await.unwrap(), Some(AuthToken::new("jwt-5")));

    let mut conn = redis.connection().await;
    let raw: Option<String> = conn.get(token_key(&redis.config.prefix, 5)).await.unwrap();
    assert_eq!(raw.as_deref(), Some("jwt-5"));
}

#[tokio::test]
#[serial]
async fn test_token_expires_after_ttl() {
    let redis = TestRedis::new().await;
    let cache = RedisTokenCache::new(&redis.config, Duration::from_secs(1)).await.unwrap();
    cache.set(5, &AuthToken::new("jwt-5")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(cache.get(5).await.unwrap(), None);
}
