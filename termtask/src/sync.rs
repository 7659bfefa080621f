//! HTTP sync adapter: the remote-backed task store.
//!
//! Bridges the [`TaskStore`] trait to the task service over request/
//! response JSON calls. The local copy of the list is a cache: callers
//! re-fetch the full state with [`TaskStore::list`] after every mutation
//! rather than patching incrementally.

use serde::Deserialize;

use termtask_core::chat::{ChatRequest, ChatResponse};
use termtask_core::store::{StoreError, TaskStore};
use termtask_core::task::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};

/// Error body returned by the task service: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Remote [`TaskStore`] backed by the task service HTTP API.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    /// Creates an adapter for the service at `base_url`
    /// (e.g. `http://127.0.0.1:8080`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The service base URL this adapter talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forwards a raw chat message to `POST /chat`.
    ///
    /// The response body is returned as-is, including the `error` field on
    /// rejected requests; only transport failures become `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Network`] if the service cannot be reached or
    /// the body cannot be decoded.
    pub async fn chat(&self, message: &str) -> Result<ChatResponse, StoreError> {
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(network)?;
        response.json::<ChatResponse>().await.map_err(network)
    }

    /// Decodes a successful body, or maps an error-status response to a
    /// [`StoreError`].
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        missing: Option<TaskId>,
    ) -> Result<T, StoreError> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(network);
        }
        if status == reqwest::StatusCode::NOT_FOUND
            && let Some(id) = missing
        {
            return Err(StoreError::NotFound(id));
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("unexpected status {status}"),
        };
        Err(StoreError::Server(message))
    }
}

fn network(err: reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

impl TaskStore for RemoteStore {
    async fn add(&self, title: &str) -> Result<Task, StoreError> {
        let response = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .json(&CreateTaskRequest {
                title: title.to_string(),
            })
            .send()
            .await
            .map_err(network)?;
        Self::read_json(response, None).await
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, StoreError> {
        let response = self
            .client
            .patch(format!("{}/tasks/{id}", self.base_url))
            .json(&UpdateTaskRequest {
                completed: Some(completed),
                title: None,
            })
            .send()
            .await
            .map_err(network)?;
        Self::read_json(response, Some(id)).await
    }

    async fn rename(&self, id: TaskId, title: &str) -> Result<Task, StoreError> {
        let response = self
            .client
            .patch(format!("{}/tasks/{id}", self.base_url))
            .json(&UpdateTaskRequest {
                completed: None,
                title: Some(title.to_string()),
            })
            .send()
            .await
            .map_err(network)?;
        Self::read_json(response, Some(id)).await
    }

    async fn remove(&self, id: TaskId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(format!("{}/tasks/{id}", self.base_url))
            .send()
            .await
            .map_err(network)?;
        // The success body ({"message": ...}) carries nothing we need.
        let _body: serde_json::Value = Self::read_json(response, Some(id)).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let response = self
            .client
            .get(format!("{}/tasks", self.base_url))
            .send()
            .await
            .map_err(network)?;
        Self::read_json(response, None).await
    }
}
