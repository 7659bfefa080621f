//! `TermTask` task service library.
//!
//! Exposes the HTTP service for use in tests and embedding. The service
//! owns an in-memory task store and serves the task CRUD endpoints, the
//! chat command endpoint, and a server-rendered task page.

pub mod config;
pub mod service;
