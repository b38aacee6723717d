//! Test Redis helper
//!
//! Connects to `TEST_REDIS_URL` when it is set (CI), otherwise starts a
//! throwaway Redis container. Every instance gets its own key prefix.

use std::sync::atomic::{AtomicUsize, Ordering};
use redis::aio::ConnectionManager;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::{Redis, REDIS_PORT};
use CollectorOuphe::config::RedisConfig;

static NEXT_PREFIX: AtomicUsize = AtomicUsize::new(0);

/// Redis server for one test
pub struct TestRedis {
    pub config: RedisConfig,
    _container: Option<ContainerAsync<Redis>>,
}

impl TestRedis {
    pub async fn new() -> Self {
        super::init_test_logging();

        let (url, container) = match std::env::var("TEST_REDIS_URL") {
            Ok(url) => (url, None),
            Err(_) => {
                let container = Redis::default().start().await.expect("Failed to start redis container");
                let port = container.get_host_port_ipv4(REDIS_PORT).await.expect("Failed to get port");
                (format!("redis://127.0.0.1:{}", port), Some(container))
            }
        };

        let prefix = format!(
            "ouphe-test-{}-{}:",
            std::process::id(),
            NEXT_PREFIX.fetch_add(1, Ordering::SeqCst)
        );

        Self {
            config: RedisConfig { url, prefix },
            _container: container,
        }
    }

    /// Plain connection for poking at keys behind the store's back
    pub async fn connection(&self) -> ConnectionManager {
        let client = redis::Client::open(self.config.url.as_str()).expect("Invalid redis url");
        ConnectionManager::new(client).await.expect("Failed to connect to redis")
    }
}
