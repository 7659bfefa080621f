//! Task service core: shared state, HTTP routes, and handlers.
//!
//! The service holds one in-memory task store with server-assigned ids
//! and exposes it over HTTP/JSON: task CRUD under `/tasks`, the chat
//! command endpoint at `/chat`, and a server-rendered task page at `/`.
//! The chat handler runs the rule-based command interpreter against the
//! same store, so chat commands and REST calls observe one another.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};

use termtask_core::chat::{ChatRequest, ChatResponse};
use termtask_core::command::interpret;
use termtask_core::render::render_page;
use termtask_core::store::{StoreError, TaskStore};
use termtask_core::task::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};
use termtask_core::MemoryStore;

/// Shared service state holding the task store.
#[derive(Debug, Default)]
pub struct ServiceState {
    /// The authoritative task store for this service instance.
    pub store: MemoryStore,
}

impl ServiceState {
    /// Creates a new service state with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

/// JSON body returned by a successful delete.
#[derive(Debug, Serialize, Deserialize)]
struct DeletedBody {
    message: String,
}

/// An HTTP error with a status code and a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TitleEmpty => Self::bad_request("Title is required"),
            StoreError::TitleTooLong => Self::bad_request(err.to_string()),
            StoreError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: "Task not found".to_string(),
            },
            StoreError::Server(msg) | StoreError::Network(msg) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: msg,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Builds the service router over the given shared state.
pub fn router(state: Arc<ServiceState>) -> axum::Router {
    axum::Router::new()
        .route("/", get(index))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", axum::routing::patch(update_task).delete(delete_task))
        .route("/chat", post(chat))
        .with_state(state)
}

/// `GET /` — server-rendered task page.
async fn index(State(state): State<Arc<ServiceState>>) -> Result<Html<String>, ApiError> {
    let tasks = state.store.list().await?;
    Ok(Html(render_page(&tasks)))
}

/// `GET /tasks` — all tasks in insertion order.
async fn list_tasks(State(state): State<Arc<ServiceState>>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.list().await?;
    Ok(Json(tasks))
}

/// `POST /tasks` — create a task; `400` on a missing/empty title.
async fn create_task(
    State(state): State<Arc<ServiceState>>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.store.add(&body.title).await?;
    tracing::info!(id = %task.id, title = %task.title, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PATCH /tasks/{id}` — update completion and/or title; `404` if unknown.
///
/// A body with neither field returns the task unchanged.
async fn update_task(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let id = TaskId::new(id);
    let mut task = find_task(&state.store, id).await?;

    if let Some(completed) = body.completed {
        task = state.store.set_completed(id, completed).await?;
        tracing::info!(id = %id, completed, "task completion updated");
    }
    if let Some(ref title) = body.title {
        task = state.store.rename(id, title).await?;
        tracing::info!(id = %id, "task renamed");
    }

    Ok(Json(task))
}

/// `DELETE /tasks/{id}` — remove a task; `404` if unknown.
async fn delete_task(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
) -> Result<Json<DeletedBody>, ApiError> {
    let id = TaskId::new(id);
    state.store.remove(id).await?;
    tracing::info!(id = %id, "task deleted");
    Ok(Json(DeletedBody {
        message: "Task deleted successfully".to_string(),
    }))
}

/// `POST /chat` — interpret a free-text command against the store.
///
/// Mutating commands return `{reply, function_result}`; queries and
/// fallbacks return `{reply}` alone. An empty message is rejected with
/// `400 {"error": "Message is required"}`.
async fn chat(
    State(state): State<Arc<ServiceState>>,
    Json(body): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    let Some(interpretation) = interpret(&body.message, &state.store).await else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse::error("Message is required".to_string())),
        );
    };

    tracing::debug!(message = %body.message.trim(), reply = %interpretation.reply, "chat handled");

    let response = match interpretation.effect {
        Some(effect) => ChatResponse::with_effect(interpretation.reply, effect),
        None => ChatResponse::reply(interpretation.reply),
    };
    (StatusCode::OK, Json(response))
}

/// Looks up a task by id, mapping absence to `404`.
async fn find_task(store: &MemoryStore, id: TaskId) -> Result<Task, ApiError> {
    let tasks = store.list().await?;
    tasks
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| StoreError::NotFound(id).into())
}

/// Starts the task service on the given address and returns the bound
/// address and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(ServiceState::new())).await
}

/// Starts the task service with a pre-populated [`ServiceState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<ServiceState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task service error");
        }
    });

    Ok((bound_addr, handle))
}
