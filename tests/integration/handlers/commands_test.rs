//! Command routing

use CollectorOuphe::handlers::commands::help::help_text;
use CollectorOuphe::handlers::replies;
use CollectorOuphe::state::ConversationLabel;
use crate::helpers::{TestContext, ALICE, BOT_USERNAME};

#[tokio::test]
async fn test_start_and_help() {
    let ctx = TestContext::new();

    assert_eq!(ctx.send(ALICE, "/start").await.as_deref(), Some(replies::WELCOME));
    assert_eq!(ctx.send(ALICE, "/help").await, Some(help_text()));
    assert_eq!(
        ctx.send(ALICE, &format!("/help@{}", BOT_USERNAME)).await,
        Some(help_text())
    );
}

#[tokio::test]
async fn test_unknown_command_leaves_state_alone() {
    let ctx = TestContext::new();

    ctx.send(ALICE, "/collection_new").await;
    let reply = ctx.send(ALICE, "/search Lightning Bolt").await;

    assert_eq!(reply.as_deref(), Some(replies::UNKNOWN_COMMAND));
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::AwaitingCreateName);
}

#[tokio::test]
async fn test_command_arguments_are_ignored() {
    let ctx = TestContext::new();

    let reply = ctx.send(ALICE, "/collection_new Modern Staples").await;

    assert_eq!(reply, Some(replies::ask_create()));
    assert!(ctx.collector.mutations().is_empty());
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::AwaitingCreateName);
}

#[tokio::test]
async fn test_idle_text_gets_help_hint() {
    let ctx = TestContext::new();

    let reply = ctx.send(ALICE, "what can you do?").await;

    assert_eq!(reply.as_deref(), Some(replies::USE_HELP));
    assert!(ctx.collector.mutations().is_empty());
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::Default);
}

#[tokio::test]
async fn test_listing_during_flow_keeps_state() {
    let ctx = TestContext::new();

    ctx.send(ALICE, "/collection_new").await;
    ctx.send(ALICE, "/collections").await;

    assert_eq!(ctx.label(ALICE).await, ConversationLabel::AwaitingCreateName);
}
