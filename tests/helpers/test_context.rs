//! Test context for router-level tests

use std::sync::Arc;
use std::time::Duration;
use CollectorOuphe::handlers::BotRouter;
use CollectorOuphe::services::testing::RecordingCollector;
use CollectorOuphe::services::MemoryTokenCache;
use CollectorOuphe::state::{ConversationLabel, MemoryStateStore, StateStore};
use super::{init_test_logging, text_message, ALICE, ALICE_TOKEN, BOB, BOB_TOKEN, BOT_USERNAME};

/// Router wired to in-memory backends and a recording collector
pub struct TestContext {
    pub store: Arc<MemoryStateStore>,
    pub collector: Arc<RecordingCollector>,
    pub router: BotRouter,
}

impl TestContext {
    /// Alice and Bob registered, no collections
    pub fn new() -> Self {
        Self::with_collector(
            RecordingCollector::new()
                .with_user(ALICE, ALICE_TOKEN)
                .with_user(BOB, BOB_TOKEN),
        )
    }

    pub fn with_collector(collector: RecordingCollector) -> Self {
        init_test_logging();

        let store = Arc::new(MemoryStateStore::new());
        let collector = Arc::new(collector);
        let cache = Arc::new(MemoryTokenCache::new(Duration::from_secs(60)));
        let router = BotRouter::new(store.clone(), collector.clone(), cache, BOT_USERNAME);

        Self { store, collector, router }
    }

    /// Send a text message as `user_id` and return the reply
    pub async fn send(&self, user_id: i64, text: &str) -> Option<String> {
        self.router.handle(text_message(user_id, text)).await
    }

    /// Stored label of a user, `Default` when nothing is stored
    pub async fn label(&self, user_id: i64) -> ConversationLabel {
        self.store
            .get_state(user_id)
            .await
            .expect("memory store never fails")
            .unwrap_or_default()
    }
}
