//! Chat message model and the `/chat` HTTP wire types.
//!
//! The transcript itself lives in the client; this module defines the
//! shared vocabulary (message roles) and the request/response bodies
//! exchanged with the task service's `/chat` endpoint.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Who authored a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the person at the keyboard.
    User,
    /// Produced by the command interpreter or the remote chat handler.
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Request body for `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text message to interpret.
    pub message: String,
}

/// Outcome status carried in a [`FunctionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectStatus {
    /// The store was mutated as requested.
    Success,
    /// The command was understood but could not be applied.
    Error,
}

/// Structured outcome of a chat command that touched the task store.
///
/// Mirrors the `function_result` object of the `/chat` contract. The
/// client renders it verbatim as an extra assistant line and refetches
/// the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResult {
    /// Whether the mutation was applied.
    pub status: EffectStatus,
    /// The task that was created, completed, or deleted, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
    /// Human-readable summary of what happened.
    pub message: String,
}

/// Response body for `POST /chat`.
///
/// Exactly one of `reply` or `error` is present on the wire; a mutating
/// command additionally carries `function_result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    /// Structured store mutation outcome, if the command mutated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_result: Option<FunctionResult>,
    /// Error description when the request was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    /// Builds a plain reply response.
    #[must_use]
    pub const fn reply(reply: String) -> Self {
        Self {
            reply: Some(reply),
            function_result: None,
            error: None,
        }
    }

    /// Builds a reply response carrying a structured mutation outcome.
    #[must_use]
    pub const fn with_effect(reply: String, effect: FunctionResult) -> Self {
        Self {
            reply: Some(reply),
            function_result: Some(effect),
            error: None,
        }
    }

    /// Builds an error response.
    #[must_use]
    pub const fn error(error: String) -> Self {
        Self {
            reply: None,
            function_result: None,
            error: Some(error),
        }
    }
}
