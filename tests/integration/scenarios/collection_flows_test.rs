//! Create, rename and delete flows

use CollectorOuphe::handlers::replies;
use CollectorOuphe::services::testing::{CollectorCall, RecordingCollector};
use CollectorOuphe::state::ConversationLabel;
use crate::helpers::{TestContext, ALICE, ALICE_TOKEN};

#[tokio::test]
async fn test_create_collection_flow() {
    let ctx = TestContext::new();

    let prompt = ctx.send(ALICE, "/collection_new").await;
    assert_eq!(prompt, Some(replies::ask_create()));
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::AwaitingCreateName);

    let reply = ctx.send(ALICE, "Modern Staples").await;
    assert_eq!(reply, Some(replies::created("Modern Staples")));
    assert_eq!(ctx.collector.mutations(), vec![CollectorCall::Create("Modern Staples".to_string())]);
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::Default);
}

#[tokio::test]
async fn test_create_with_too_long_name() {
    let ctx = TestContext::new();

    ctx.send(ALICE, "/collection_new").await;
    let reply = ctx.send(ALICE, "Twenty-one characters").await;

    assert_eq!(reply, Some(replies::name_too_long()));
    assert!(ctx.collector.mutations().is_empty());
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::Default);
}

#[tokio::test]
async fn test_create_counts_characters_not_bytes() {
    let ctx = TestContext::new();

    ctx.send(ALICE, "/collection_new").await;
    let reply = ctx.send(ALICE, "Коллекция").await;

    assert_eq!(reply, Some(replies::created("Коллекция")));
}

#[tokio::test]
async fn test_rename_with_single_token_resets() {
    let ctx = TestContext::with_collector(
        RecordingCollector::new()
            .with_user(ALICE, ALICE_TOKEN)
            .with_collection(ALICE_TOKEN, "OldName"),
    );

    ctx.send(ALICE, "/collection_rename").await;
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::AwaitingRenameNames);

    let reply = ctx.send(ALICE, "OldName").await;
    assert_eq!(reply.as_deref(), Some(replies::RENAME_FORMAT));
    assert!(ctx.collector.mutations().is_empty());
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::Default);
}

#[tokio::test]
async fn test_rename_flow() {
    let ctx = TestContext::with_collector(
        RecordingCollector::new()
            .with_user(ALICE, ALICE_TOKEN)
            .with_collection(ALICE_TOKEN, "Modern"),
    );

    ctx.send(ALICE, "/collection_rename").await;
    let reply = ctx.send(ALICE, "Modern Pioneer").await;

    assert_eq!(reply, Some(replies::renamed("Modern", "Pioneer")));
    assert_eq!(ctx.collector.collection_names(ALICE_TOKEN), vec!["Pioneer".to_string()]);
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::Default);
}

#[tokio::test]
async fn test_delete_checks_existence() {
    let ctx = TestContext::with_collector(
        RecordingCollector::new()
            .with_user(ALICE, ALICE_TOKEN)
            .with_collection(ALICE_TOKEN, "Commander"),
    );

    ctx.send(ALICE, "/collection_delete").await;
    let reply = ctx.send(ALICE, "Legacy").await;
    assert_eq!(reply.as_deref(), Some(replies::COLLECTION_NOT_FOUND));
    assert!(ctx.collector.mutations().is_empty());
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::Default);

    ctx.send(ALICE, "/collection_delete").await;
    let reply = ctx.send(ALICE, "Commander").await;
    assert_eq!(reply, Some(replies::deleted("Commander")));
    assert!(ctx.collector.collection_names(ALICE_TOKEN).is_empty());
}

#[tokio::test]
async fn test_backend_failure_resets_without_retry() {
    let ctx = TestContext::new();

    ctx.send(ALICE, "/collection_new").await;
    ctx.collector.set_failing(true);
    let reply = ctx.send(ALICE, "Pauper").await;

    assert_eq!(reply.as_deref(), Some(replies::OPERATION_FAILED));
    assert_eq!(ctx.collector.mutations(), vec![CollectorCall::Create("Pauper".to_string())]);
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::Default);
}

#[tokio::test]
async fn test_list_collections() {
    let ctx = TestContext::with_collector(
        RecordingCollector::new()
            .with_user(ALICE, ALICE_TOKEN)
            .with_collection(ALICE_TOKEN, "Commander")
            .with_collection(ALICE_TOKEN, "Pauper"),
    );

    let reply = ctx.send(ALICE, "/collections").await;
    assert_eq!(reply, Some(replies::collection_list(["Commander", "Pauper"])));
}
