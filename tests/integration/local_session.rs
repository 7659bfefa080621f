//! Integration tests for the local (in-process) session.
//!
//! Drives the `Session` controller end-to-end over an in-memory backend:
//! task operations deliver wholesale list refetches, chat commands flow
//! through the interpreter after the artificial delay, and pending
//! placeholders resolve by token even when sends overlap.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use termtask::session::{Session, SessionEvent, TaskBackend};
use termtask::transcript::{ChatTranscript, PendingToken};
use termtask_core::MemoryStore;
use termtask_core::task::Task;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const REPLY_DELAY: Duration = Duration::from_millis(20);
const EVENT_WAIT: Duration = Duration::from_secs(2);

/// Creates a local session with a short artificial reply delay.
fn local_session() -> (Session, mpsc::Receiver<SessionEvent>) {
    Session::new(TaskBackend::Local(MemoryStore::new()), REPLY_DELAY, 32)
}

/// Receives the next session event, failing the test after a grace period.
async fn next_event(rx: &mut mpsc::Receiver<SessionEvent>) -> SessionEvent {
    timeout(EVENT_WAIT, rx.recv())
        .await
        .expect("timed out waiting for session event")
        .expect("event channel closed")
}

/// Receives the next `TasksRefreshed` payload.
async fn next_tasks(rx: &mut mpsc::Receiver<SessionEvent>) -> Vec<Task> {
    match next_event(rx).await {
        SessionEvent::TasksRefreshed(tasks) => tasks,
        other => panic!("expected TasksRefreshed, got {other:?}"),
    }
}

/// Issues a pending token the way the UI does before a chat send.
fn issue_token(transcript: &mut ChatTranscript) -> PendingToken {
    transcript.begin_pending()
}

// ---------------------------------------------------------------------------
// Task operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_task_delivers_refreshed_list() {
    let (session, mut rx) = local_session();

    session.add_task("buy milk");

    let tasks = next_tasks(&mut rx).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "buy milk");
    assert!(!tasks[0].completed);
}

#[tokio::test]
async fn empty_title_add_is_a_silent_no_op() {
    let (session, mut rx) = local_session();

    session.add_task("   ");

    let result = timeout(Duration::from_millis(100), rx.recv()).await;
    assert!(result.is_err(), "no event should be emitted for empty title");
}

#[tokio::test]
async fn toggle_task_flips_completion_once_per_call() {
    let (session, mut rx) = local_session();

    session.add_task("buy milk");
    let tasks = next_tasks(&mut rx).await;
    let id = tasks[0].id;

    session.toggle_task(id, true);
    let tasks = next_tasks(&mut rx).await;
    assert!(tasks[0].completed);

    session.toggle_task(id, false);
    let tasks = next_tasks(&mut rx).await;
    assert!(!tasks[0].completed);
}

#[tokio::test]
async fn delete_task_removes_it() {
    let (session, mut rx) = local_session();

    session.add_task("doomed");
    let tasks = next_tasks(&mut rx).await;

    session.delete_task(tasks[0].id);
    let tasks = next_tasks(&mut rx).await;
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn delete_unknown_id_reports_failure_and_leaves_store() {
    let (session, mut rx) = local_session();

    session.add_task("keep me");
    let tasks = next_tasks(&mut rx).await;

    session.delete_task(termtask_core::task::TaskId::new(99));
    match next_event(&mut rx).await {
        SessionEvent::OpFailed { context, error } => {
            assert_eq!(context, "delete task");
            assert!(error.contains("not found"));
        }
        other => panic!("expected OpFailed, got {other:?}"),
    }

    session.refresh();
    let unchanged = next_tasks(&mut rx).await;
    assert_eq!(unchanged, tasks);
}

#[tokio::test]
async fn refresh_reports_current_state() {
    let (session, mut rx) = local_session();

    session.refresh();
    assert!(next_tasks(&mut rx).await.is_empty());
}

// ---------------------------------------------------------------------------
// Chat flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_add_resolves_placeholder_then_refreshes() {
    let (session, mut rx) = local_session();
    let mut transcript = ChatTranscript::new("%H:%M");

    let token = issue_token(&mut transcript);
    session.send_chat("add buy milk".to_string(), token);

    match next_event(&mut rx).await {
        SessionEvent::ReplyReady {
            token: got,
            reply,
            function_result,
        } => {
            assert_eq!(got, token);
            assert_eq!(reply, "Added task 'buy milk'.");
            assert!(function_result.is_none(), "local replies carry no raw effect");
        }
        other => panic!("expected ReplyReady, got {other:?}"),
    }

    let tasks = next_tasks(&mut rx).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "buy milk");
}

#[tokio::test]
async fn chat_reply_waits_for_artificial_delay() {
    let (session, mut rx) = local_session();
    let mut transcript = ChatTranscript::new("%H:%M");

    let start = tokio::time::Instant::now();
    let token = issue_token(&mut transcript);
    session.send_chat("show tasks".to_string(), token);

    let _ = next_event(&mut rx).await;
    assert!(start.elapsed() >= REPLY_DELAY);
}

#[tokio::test]
async fn chat_show_tasks_on_empty_store_is_literal_message() {
    let (session, mut rx) = local_session();
    let mut transcript = ChatTranscript::new("%H:%M");

    let token = issue_token(&mut transcript);
    session.send_chat("show tasks".to_string(), token);

    match next_event(&mut rx).await {
        SessionEvent::ReplyReady { reply, .. } => {
            assert_eq!(reply, "Your task list is empty.");
        }
        other => panic!("expected ReplyReady, got {other:?}"),
    }

    // A query is not a mutation: no refetch follows.
    let result = timeout(Duration::from_millis(100), rx.recv()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn chat_delete_unknown_title_reports_not_found() {
    let (session, mut rx) = local_session();
    let mut transcript = ChatTranscript::new("%H:%M");

    let token = issue_token(&mut transcript);
    session.send_chat("delete buy milk".to_string(), token);

    match next_event(&mut rx).await {
        SessionEvent::ReplyReady { reply, .. } => {
            assert_eq!(reply, "No task named 'buy milk' was found.");
        }
        other => panic!("expected ReplyReady, got {other:?}"),
    }
}

#[tokio::test]
async fn overlapping_sends_resolve_by_token() {
    let (session, mut rx) = local_session();
    let mut transcript = ChatTranscript::new("%H:%M");

    let first = issue_token(&mut transcript);
    let second = issue_token(&mut transcript);

    // Two sends in flight at once; completion order is not guaranteed.
    session.send_chat("hello there".to_string(), first);
    session.send_chat("add buy milk".to_string(), second);

    let mut replies = Vec::new();
    while replies.len() < 2 {
        match next_event(&mut rx).await {
            SessionEvent::ReplyReady { token, reply, .. } => replies.push((token, reply)),
            SessionEvent::TasksRefreshed(_) => {}
            other => panic!("unexpected event {other:?}"),
        }
    }

    let first_reply = &replies.iter().find(|(t, _)| *t == first).unwrap().1;
    let second_reply = &replies.iter().find(|(t, _)| *t == second).unwrap().1;
    assert!(first_reply.starts_with("I didn't understand"));
    assert_eq!(second_reply, "Added task 'buy milk'.");
}

#[tokio::test]
async fn transcript_resolution_follows_session_events() {
    let (session, mut rx) = local_session();
    let mut transcript = ChatTranscript::new("%H:%M");

    transcript.post(termtask_core::chat::Role::User, "add buy milk");
    let token = transcript.begin_pending();
    session.send_chat("add buy milk".to_string(), token);

    match next_event(&mut rx).await {
        SessionEvent::ReplyReady { token, reply, .. } => {
            assert!(transcript.resolve_pending(token, reply));
        }
        other => panic!("expected ReplyReady, got {other:?}"),
    }

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.messages()[1].text, "Added task 'buy milk'.");
}
