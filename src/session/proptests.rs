//! Property-based tests for the session
//!
//! - The backend projection drops exactly the notices, in order
//! - However triggers interleave, at most one backend call is in flight
//! - The gate is free once every flow has finished

use super::testing::{comparison_set, MockBackend};
use super::Session;
use crate::backend::{BackendError, CompareResponse, ExtractResponse, GenerateResponse};
use crate::config::ClientConfig;
use crate::conversation::ConversationLog;
use crate::flow::{FlowOutcome, FlowRejected, FlowResult};
use crate::memory::MemorySnapshot;
use futures::future::join_all;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Generators
// ============================================================================

#[derive(Debug, Clone)]
enum Append {
    User(String),
    Assistant(String),
    Notice(String),
}

fn arb_append() -> impl Strategy<Value = Append> {
    prop_oneof![
        "[a-zA-Z0-9 ]{1,20}".prop_map(Append::User),
        "[a-zA-Z0-9 ]{1,20}".prop_map(Append::Assistant),
        "[a-zA-Z0-9 :]{1,20}".prop_map(Append::Notice),
    ]
}

#[derive(Debug, Clone)]
enum Trigger {
    Send(String),
    Extract,
    Compare(String),
}

fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z]{1,10}",
        1 => Just("   ".to_string()),
    ]
}

fn arb_trigger() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        arb_input().prop_map(Trigger::Send),
        Just(Trigger::Extract),
        arb_input().prop_map(Trigger::Compare),
    ]
}

#[derive(Debug, Clone, Copy)]
enum Answer {
    Success,
    Refusal,
    Unreachable,
}

fn arb_answer() -> impl Strategy<Value = Answer> {
    prop_oneof![
        Just(Answer::Success),
        Just(Answer::Refusal),
        Just(Answer::Unreachable),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

fn queue_answers(backend: &MockBackend, answers: &[Answer]) {
    for answer in answers {
        match answer {
            Answer::Success => {
                backend.queue_reply(Ok(GenerateResponse::reply("ok")));
                backend.queue_extraction(Ok(MemorySnapshot {
                    summary: Some("s".to_string()),
                    ..MemorySnapshot::default()
                }
                .into()));
                backend.queue_comparison(Ok(CompareResponse::with(comparison_set(&[(
                    "neutral", "Neutral", "ok",
                )]))));
            }
            Answer::Refusal => {
                backend.queue_reply(Ok(GenerateResponse::failed("nope")));
                backend.queue_extraction(Ok(ExtractResponse::failed("nope")));
                backend.queue_comparison(Ok(CompareResponse::failed("nope")));
            }
            Answer::Unreachable => {
                backend.queue_reply(Err(BackendError::transport("down")));
                backend.queue_extraction(Err(BackendError::transport("down")));
                backend.queue_comparison(Err(BackendError::status(503, "down")));
            }
        }
    }
}

async fn fire(session: &Session<Arc<MockBackend>>, trigger: Trigger) -> FlowResult {
    match trigger {
        Trigger::Send(text) => {
            session.set_input(text);
            session.send().await
        }
        Trigger::Extract => session.extract_memory().await,
        Trigger::Compare(text) => {
            session.set_input(text);
            session.compare().await
        }
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_projection_drops_only_notices(
        appends in proptest::collection::vec(arb_append(), 0..30),
    ) {
        let mut log = ConversationLog::new();
        let mut expected = Vec::new();
        for append in appends {
            match append {
                Append::User(text) => {
                    expected.push(text.clone());
                    log.append_user(text);
                }
                Append::Assistant(text) => {
                    expected.push(text.clone());
                    log.append_assistant(text);
                }
                Append::Notice(text) => log.append_system_notice(text),
            }
        }

        let projected: Vec<String> = log.for_backend().map(|m| m.content.clone()).collect();
        prop_assert_eq!(projected, expected);
        prop_assert!(log.for_backend().all(|m| !m.is_system));
    }

    #[test]
    fn prop_concurrent_triggers_never_overlap(
        triggers in proptest::collection::vec(arb_trigger(), 1..8),
        answers in proptest::collection::vec(arb_answer(), 8),
        yields in 1usize..4,
    ) {
        let backend = Arc::new(MockBackend::new().with_yields(yields));
        queue_answers(&backend, &answers);
        let session = Session::new(backend.clone(), ClientConfig::default());

        let results = runtime().block_on(async {
            // Give extract something to send
            session.set_input("seed");
            let _ = session.send().await;
            join_all(triggers.into_iter().map(|t| fire(&session, t))).await
        });

        prop_assert!(backend.max_in_flight() <= 1);
        prop_assert!(!session.is_busy());

        // Every flow that got past its preconditions made exactly one call
        let ran = results.iter().filter(|r| r.is_ok()).count();
        prop_assert_eq!(backend.calls(), ran + 1);
    }

    #[test]
    fn prop_sequential_triggers_never_busy(
        triggers in proptest::collection::vec(arb_trigger(), 1..8),
        answers in proptest::collection::vec(arb_answer(), 8),
    ) {
        let backend = Arc::new(MockBackend::new().with_yields(1));
        queue_answers(&backend, &answers);
        let session = Session::new(backend.clone(), ClientConfig::default());

        let results = runtime().block_on(async {
            let mut results = Vec::new();
            for trigger in triggers {
                let result = fire(&session, trigger.clone()).await;
                assert!(!session.is_busy());
                results.push((trigger, result));
            }
            results
        });

        prop_assert!(!results.iter().any(|(_, r)| *r == Err(FlowRejected::Busy)));

        // Each flow leaves at most one notice: every failure, the empty-log
        // and blank-probe rejections, and a successful comparison
        let expected_notices: usize = results
            .iter()
            .map(|(trigger, result)| match (trigger, result) {
                (_, Ok(FlowOutcome::Recovered(_)))
                | (Trigger::Extract, Err(FlowRejected::EmptyLog))
                | (
                    Trigger::Compare(_),
                    Ok(FlowOutcome::Completed) | Err(FlowRejected::EmptyInput),
                ) => 1,
                _ => 0,
            })
            .sum();
        let notices = session.transcript().iter().filter(|m| m.is_system).count();
        prop_assert_eq!(notices, expected_notices);
    }
}
