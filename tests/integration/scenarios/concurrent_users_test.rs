//! Several users at once

use std::sync::Arc;
use CollectorOuphe::handlers::replies;
use CollectorOuphe::services::testing::CollectorCall;
use CollectorOuphe::state::ConversationLabel;
use crate::helpers::{text_message, TestContext, ALICE, ALICE_TOKEN, BOB};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_users_do_not_share_state() {
    let ctx = Arc::new(TestContext::new());

    let (a, b) = tokio::join!(ctx.send(ALICE, "/collection_new"), ctx.send(BOB, "/collection_delete"));
    assert_eq!(a, Some(replies::ask_create()));
    assert_eq!(b.as_deref(), Some(replies::ASK_DELETE));

    assert_eq!(ctx.label(ALICE).await, ConversationLabel::AwaitingCreateName);
    assert_eq!(ctx.label(BOB).await, ConversationLabel::AwaitingDeleteName);

    let reply = ctx.send(ALICE, "Vintage").await;
    assert_eq!(reply, Some(replies::created("Vintage")));
    assert_eq!(ctx.collector.collection_names(ALICE_TOKEN), vec!["Vintage".to_string()]);
    assert_eq!(ctx.label(BOB).await, ConversationLabel::AwaitingDeleteName);
}

#[tokio::test]
async fn test_ask_while_busy_keeps_flow() {
    let ctx = TestContext::new();

    ctx.send(ALICE, "/collection_new").await;
    let reply = ctx.send(ALICE, "/collection_delete").await;

    assert_eq!(reply.as_deref(), Some(replies::BUSY));
    assert_eq!(ctx.label(ALICE).await, ConversationLabel::AwaitingCreateName);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_user_messages_are_serialized() {
    let ctx = Arc::new(TestContext::new());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let ctx = ctx.clone();
            tokio::spawn(async move { ctx.router.handle(text_message(ALICE, "/collection_new")).await })
        })
        .collect();

    let mut prompts = 0;
    let mut busy = 0;
    for task in tasks {
        match task.await.unwrap() {
            Some(reply) if reply == replies::ask_create() => prompts += 1,
            Some(reply) if reply == replies::BUSY => busy += 1,
            other => panic!("unexpected reply {:?}", other),
        }
    }

    assert_eq!(prompts, 1);
    assert_eq!(busy, 7);
    assert!(ctx.collector.mutations().is_empty());
    assert!(ctx.collector.calls().iter().all(|call| *call == CollectorCall::CheckUser(ALICE)));
}
