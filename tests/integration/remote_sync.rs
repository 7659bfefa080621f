//! Integration tests for the remote session against an in-process task
//! service.
//!
//! Verifies the sync adapter's request/response behavior, round-trip
//! consistency with the external store (PATCH then GET observes the
//! update), and the chat forwarding path including `function_result`
//! rendering and the cache refetch it triggers.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use termtask::session::{Session, SessionEvent, TaskBackend};
use termtask::sync::RemoteStore;
use termtask::transcript::ChatTranscript;
use termtask_core::store::{StoreError, TaskStore};
use termtask_core::task::{Task, TaskId};
use termtask_server::service::{ServiceState, start_server_with_state};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Starts the task service in-process and returns a sync adapter for it.
async fn start_service() -> (RemoteStore, tokio::task::JoinHandle<()>) {
    let (addr, handle) = start_server_with_state("127.0.0.1:0", Arc::new(ServiceState::new()))
        .await
        .expect("failed to start test service");
    (RemoteStore::new(&format!("http://{addr}")), handle)
}

/// Receives the next session event, failing the test after a grace period.
async fn next_event(rx: &mut mpsc::Receiver<SessionEvent>) -> SessionEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for session event")
        .expect("event channel closed")
}

// ---------------------------------------------------------------------------
// Sync adapter CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_list_round_trip() {
    let (store, _handle) = start_service().await;

    let task = store.add("buy milk").await.unwrap();
    assert_eq!(task.id, TaskId::new(1), "service assigns ids from 1");
    assert!(!task.completed);

    let tasks = store.list().await.unwrap();
    assert_eq!(tasks, vec![task]);
}

#[tokio::test]
async fn add_empty_title_maps_to_server_error() {
    let (store, _handle) = start_service().await;

    let err = store.add("   ").await.unwrap_err();
    assert_eq!(err, StoreError::Server("Title is required".to_string()));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn patch_then_get_observes_completed() {
    let (store, _handle) = start_service().await;

    let task = store.add("buy milk").await.unwrap();
    let patched = store.set_completed(task.id, true).await.unwrap();
    assert!(patched.completed);

    // Round-trip consistency with the external store.
    let tasks = store.list().await.unwrap();
    assert!(tasks[0].completed);
}

#[tokio::test]
async fn rename_round_trips() {
    let (store, _handle) = start_service().await;

    let task = store.add("old").await.unwrap();
    let renamed = store.rename(task.id, "new title").await.unwrap();
    assert_eq!(renamed.title, "new title");
    assert_eq!(store.list().await.unwrap()[0].title, "new title");
}

#[tokio::test]
async fn remove_then_operations_report_not_found() {
    let (store, _handle) = start_service().await;

    let task = store.add("doomed").await.unwrap();
    store.remove(task.id).await.unwrap();
    assert!(store.list().await.unwrap().is_empty());

    assert_eq!(
        store.remove(task.id).await.unwrap_err(),
        StoreError::NotFound(task.id)
    );
    assert_eq!(
        store.set_completed(task.id, true).await.unwrap_err(),
        StoreError::NotFound(task.id)
    );
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Discard-port style address nothing listens on.
    let store = RemoteStore::new("http://127.0.0.1:9");
    match store.list().await {
        Err(StoreError::Network(_)) => {}
        other => panic!("expected Network error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Chat forwarding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_forwards_raw_text_and_returns_effect() {
    let (store, _handle) = start_service().await;

    let response = store.chat("add buy milk").await.unwrap();
    assert_eq!(response.reply.as_deref(), Some("Added task 'buy milk'."));
    assert!(response.error.is_none());

    let effect = response.function_result.unwrap();
    assert_eq!(effect.task.unwrap().title, "buy milk");

    // The remote mutation is visible on the next fetch.
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn chat_rejection_arrives_as_error_body() {
    let (store, _handle) = start_service().await;

    let response = store.chat("   ").await.unwrap();
    assert_eq!(response.error.as_deref(), Some("Message is required"));
    assert!(response.reply.is_none());
}

// ---------------------------------------------------------------------------
// Full session over the remote backend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remote_session_add_task_flows_through_service() {
    let (store, _handle) = start_service().await;
    let (session, mut rx) = Session::new(
        TaskBackend::Remote(store),
        Duration::from_millis(0),
        32,
    );

    session.add_task("buy milk");
    match next_event(&mut rx).await {
        SessionEvent::TasksRefreshed(tasks) => {
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].id, TaskId::new(1));
        }
        other => panic!("expected TasksRefreshed, got {other:?}"),
    }
}

#[tokio::test]
async fn remote_session_chat_renders_effect_and_refetches() {
    let (store, _handle) = start_service().await;
    let (session, mut rx) = Session::new(
        TaskBackend::Remote(store),
        Duration::from_millis(0),
        32,
    );
    let mut transcript = ChatTranscript::new("%H:%M");

    let token = transcript.begin_pending();
    session.send_chat("add buy milk".to_string(), token);

    match next_event(&mut rx).await {
        SessionEvent::ReplyReady {
            token: got,
            reply,
            function_result,
        } => {
            assert_eq!(got, token);
            assert_eq!(reply, "Added task 'buy milk'.");
            // The structured outcome is rendered verbatim as JSON.
            let raw = function_result.expect("mutating command carries an effect");
            assert!(raw.contains(r#""status":"success""#));
            assert!(raw.contains(r#""title":"buy milk""#));
        }
        other => panic!("expected ReplyReady, got {other:?}"),
    }

    match next_event(&mut rx).await {
        SessionEvent::TasksRefreshed(tasks) => assert_eq!(tasks.len(), 1),
        other => panic!("expected TasksRefreshed, got {other:?}"),
    }
}

#[tokio::test]
async fn remote_session_chat_transport_failure_is_generic_message() {
    let store = RemoteStore::new("http://127.0.0.1:9");
    let (session, mut rx) = Session::new(
        TaskBackend::Remote(store),
        Duration::from_millis(0),
        32,
    );
    let mut transcript = ChatTranscript::new("%H:%M");

    let token = transcript.begin_pending();
    session.send_chat("add buy milk".to_string(), token);

    match next_event(&mut rx).await {
        SessionEvent::ReplyReady { reply, .. } => {
            assert_eq!(reply, "Failed to contact server");
        }
        other => panic!("expected ReplyReady, got {other:?}"),
    }
}

#[tokio::test]
async fn two_adapters_share_one_service_store() {
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", Arc::new(ServiceState::new()))
        .await
        .expect("failed to start test service");
    let a = RemoteStore::new(&format!("http://{addr}"));
    let b = RemoteStore::new(&format!("http://{addr}"));

    a.add("from a").await.unwrap();
    let seen_by_b: Vec<Task> = b.list().await.unwrap();
    assert_eq!(seen_by_b.len(), 1);
    assert_eq!(seen_by_b[0].title, "from a");
}
