//! Registration gate scenarios

use CollectorOuphe::handlers::replies;
use CollectorOuphe::services::testing::{CollectorCall, RecordingCollector};
use CollectorOuphe::state::ConversationLabel;
use crate::helpers::{TestContext, ALICE, CAROL};

#[tokio::test]
async fn test_unregistered_user_is_rejected() {
    let ctx = TestContext::new();

    for text in ["/collection_new", "/collections", "/start", "/help", "Modern Staples"] {
        let reply = ctx.send(CAROL, text).await;
        assert_eq!(reply.as_deref(), Some(replies::NOT_REGISTERED), "{text}");
    }
    assert_eq!(ctx.label(CAROL).await, ConversationLabel::Default);
    assert!(ctx.collector.mutations().is_empty());
}

#[tokio::test]
async fn test_register_then_use_bot() {
    let ctx = TestContext::new();

    let reply = ctx.send(CAROL, "/register").await;
    assert_eq!(reply.as_deref(), Some(replies::REGISTERED));
    assert!(ctx.collector.calls().contains(&CollectorCall::RegisterUser(CAROL)));

    let reply = ctx.send(CAROL, "/collection_new").await;
    assert_eq!(reply, Some(replies::ask_create()));

    let reply = ctx.send(CAROL, "/register").await;
    assert_eq!(reply.as_deref(), Some(replies::ALREADY_REGISTERED));
}

#[tokio::test]
async fn test_registration_failure() {
    let ctx = TestContext::with_collector(RecordingCollector::new());
    ctx.collector.set_failing(true);

    let reply = ctx.send(CAROL, "/register").await;
    assert_eq!(reply.as_deref(), Some(replies::REGISTRATION_FAILED));
}

#[tokio::test]
async fn test_cached_token_survives_collector_outage() {
    let ctx = TestContext::new();

    ctx.send(ALICE, "/help").await;
    ctx.collector.set_failing(true);

    let reply = ctx.send(ALICE, "/collection_new").await;
    assert_eq!(reply, Some(replies::ask_create()));
}

#[tokio::test]
async fn test_message_without_sender_is_dropped() {
    use teloxide::types::ChatId;
    use CollectorOuphe::handlers::InboundMessage;

    let ctx = TestContext::new();
    let reply = ctx.router.handle(InboundMessage::new(None, ChatId(-100), "/help")).await;

    assert!(reply.is_none());
    assert!(ctx.collector.calls().is_empty());
}
