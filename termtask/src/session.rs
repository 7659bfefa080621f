//! Session controller: backend selection and async operation dispatch.
//!
//! A [`Session`] owns the selected [`TaskBackend`] and an event channel
//! back to the UI loop. Operations spawn onto the tokio runtime so the UI
//! never blocks on a round trip; input stays live while a call is
//! outstanding. Every mutation is followed by a full-list refetch; the
//! task cache is rebuilt wholesale, never patched. Overlapping
//! operations are not sequenced: the last refetch wins. Chat replies
//! resolve their own placeholder by token, so overlap cannot mis-order
//! the transcript.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use termtask_core::MemoryStore;
use termtask_core::command::interpret;
use termtask_core::store::{StoreError, TaskStore};
use termtask_core::task::{Task, TaskId};

use crate::sync::RemoteStore;
use crate::transcript::PendingToken;

/// The task store behind this session, selected by configuration.
#[derive(Debug)]
pub enum TaskBackend {
    /// Authoritative in-process store; state dies with the session.
    Local(MemoryStore),
    /// Cache of the task service state, synced over HTTP.
    Remote(RemoteStore),
}

impl TaskBackend {
    /// Returns `true` when backed by the task service.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Short human-readable backend description for the status bar.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Local(_) => "local".to_string(),
            Self::Remote(remote) => format!("remote ({})", remote.base_url()),
        }
    }
}

impl TaskStore for TaskBackend {
    async fn add(&self, title: &str) -> Result<Task, StoreError> {
        match self {
            Self::Local(store) => store.add(title).await,
            Self::Remote(store) => store.add(title).await,
        }
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, StoreError> {
        match self {
            Self::Local(store) => store.set_completed(id, completed).await,
            Self::Remote(store) => store.set_completed(id, completed).await,
        }
    }

    async fn rename(&self, id: TaskId, title: &str) -> Result<Task, StoreError> {
        match self {
            Self::Local(store) => store.rename(id, title).await,
            Self::Remote(store) => store.rename(id, title).await,
        }
    }

    async fn remove(&self, id: TaskId) -> Result<(), StoreError> {
        match self {
            Self::Local(store) => store.remove(id).await,
            Self::Remote(store) => store.remove(id).await,
        }
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        match self {
            Self::Local(store) => store.list().await,
            Self::Remote(store) => store.list().await,
        }
    }
}

/// Events delivered from spawned operations back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The full task list was re-fetched after a mutation or refresh.
    TasksRefreshed(Vec<Task>),
    /// A chat reply arrived for the given pending placeholder.
    ReplyReady {
        /// Placeholder to resolve.
        token: PendingToken,
        /// Assistant reply text (or a user-facing error line).
        reply: String,
        /// Structured mutation outcome rendered verbatim, if any.
        function_result: Option<String>,
    },
    /// A task operation failed; shown on the status bar, never fatal.
    OpFailed {
        /// What was being attempted.
        context: String,
        /// Error description.
        error: String,
    },
}

/// Dispatches task and chat operations against the selected backend.
pub struct Session {
    backend: Arc<TaskBackend>,
    events_tx: mpsc::Sender<SessionEvent>,
    reply_delay: Duration,
}

impl Session {
    /// Creates a session over the given backend.
    ///
    /// `reply_delay` is the artificial latency applied to local chat
    /// replies. Returns the session and the receiver the UI loop drains.
    #[must_use]
    pub fn new(
        backend: TaskBackend,
        reply_delay: Duration,
        event_buffer: usize,
    ) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::channel(event_buffer);
        let session = Self {
            backend: Arc::new(backend),
            events_tx,
            reply_delay,
        };
        (session, events_rx)
    }

    /// The backend this session operates on.
    #[must_use]
    pub fn backend(&self) -> &TaskBackend {
        &self.backend
    }

    /// Adds a task, then refetches. An empty trimmed title is a silent
    /// no-op at this edge.
    pub fn add_task(&self, title: &str) {
        let title = title.trim().to_string();
        if title.is_empty() {
            tracing::debug!("ignoring empty task title");
            return;
        }
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match backend.add(&title).await {
                Ok(task) => {
                    tracing::info!(id = %task.id, title = %task.title, "task added");
                    refetch(&backend, &tx).await;
                }
                Err(err) => report(&tx, "add task", &err).await,
            }
        });
    }

    /// Sets a task's completion state, then refetches.
    pub fn toggle_task(&self, id: TaskId, completed: bool) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match backend.set_completed(id, completed).await {
                Ok(_) => refetch(&backend, &tx).await,
                Err(err) => report(&tx, "update task", &err).await,
            }
        });
    }

    /// Deletes a task, then refetches.
    pub fn delete_task(&self, id: TaskId) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match backend.remove(id).await {
                Ok(()) => refetch(&backend, &tx).await,
                Err(err) => report(&tx, "delete task", &err).await,
            }
        });
    }

    /// Refetches the full task list.
    pub fn refresh(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            refetch(&backend, &tx).await;
        });
    }

    /// Sends a chat message; the reply resolves the given placeholder.
    ///
    /// Remote sessions forward the raw text to the service's `/chat`;
    /// local sessions run the command interpreter after the configured
    /// artificial delay. The caller must have posted the user line and
    /// created the placeholder already.
    pub fn send_chat(&self, message: String, token: PendingToken) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        let delay = self.reply_delay;
        tokio::spawn(async move {
            match backend.as_ref() {
                TaskBackend::Remote(remote) => {
                    chat_remote(remote, &backend, &tx, &message, token).await;
                }
                TaskBackend::Local(_) => {
                    chat_local(&backend, &tx, &message, token, delay).await;
                }
            }
        });
    }
}

/// Remote chat round trip: forward raw text, resolve the placeholder from
/// the response, refetch on any mutation.
async fn chat_remote(
    remote: &RemoteStore,
    backend: &Arc<TaskBackend>,
    tx: &mpsc::Sender<SessionEvent>,
    message: &str,
    token: PendingToken,
) {
    match remote.chat(message).await {
        Ok(response) => {
            if let Some(error) = response.error {
                let _ = tx
                    .send(SessionEvent::ReplyReady {
                        token,
                        reply: format!("Error: {error}"),
                        function_result: None,
                    })
                    .await;
                return;
            }
            let mutated = response.function_result.is_some();
            let function_result = response
                .function_result
                .and_then(|f| serde_json::to_string(&f).ok());
            let _ = tx
                .send(SessionEvent::ReplyReady {
                    token,
                    reply: response.reply.unwrap_or_default(),
                    function_result,
                })
                .await;
            // The remote chat handler may have mutated tasks as a side
            // effect; rebuild the cache.
            if mutated {
                refetch(backend, tx).await;
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "chat request failed");
            let _ = tx
                .send(SessionEvent::ReplyReady {
                    token,
                    reply: "Failed to contact server".to_string(),
                    function_result: None,
                })
                .await;
        }
    }
}

/// Local chat: interpret the command against the in-process store after
/// the artificial reply delay.
async fn chat_local(
    backend: &Arc<TaskBackend>,
    tx: &mpsc::Sender<SessionEvent>,
    message: &str,
    token: PendingToken,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;
    let Some(interpretation) = interpret(message, backend.as_ref()).await else {
        // Empty input is filtered before a placeholder exists.
        return;
    };
    let mutated = interpretation.effect.is_some();
    let _ = tx
        .send(SessionEvent::ReplyReady {
            token,
            reply: interpretation.reply,
            function_result: None,
        })
        .await;
    if mutated {
        refetch(backend, tx).await;
    }
}

/// Refetches the full task list and delivers it, or reports the failure.
async fn refetch(backend: &Arc<TaskBackend>, tx: &mpsc::Sender<SessionEvent>) {
    match backend.list().await {
        Ok(tasks) => {
            let _ = tx.send(SessionEvent::TasksRefreshed(tasks)).await;
        }
        Err(err) => report(tx, "refresh tasks", &err).await,
    }
}

/// Logs an operation failure and surfaces it to the status bar.
async fn report(tx: &mpsc::Sender<SessionEvent>, context: &str, err: &StoreError) {
    tracing::warn!(context, error = %err, "task operation failed");
    let _ = tx
        .send(SessionEvent::OpFailed {
            context: context.to_string(),
            error: err.to_string(),
        })
        .await;
}
