//! Shared core for `TermTask`: task model, store backends, command
//! interpreter, and the HTML task renderer.
//!
//! The client and the task service both build on this crate. The client
//! pairs the [`store::TaskStore`] trait with either the in-memory backend
//! from [`store::memory`] or its own HTTP-backed adapter; the service uses
//! the in-memory backend directly and runs the [`command`] interpreter
//! behind its `/chat` endpoint.

pub mod chat;
pub mod command;
pub mod render;
pub mod store;
pub mod task;

pub use store::{StoreError, TaskStore, memory::MemoryStore};
pub use task::{MAX_TASK_TITLE_LENGTH, Task, TaskId};
