//! Free-text command interpretation for the chat panel.
//!
//! [`parse`] maps a raw input line to a [`Command`]; the [`interpreter`]
//! applies a command to a [`TaskStore`](crate::store::TaskStore) and
//! produces the assistant reply. Verb matching is case-insensitive on the
//! verb only and requires a word boundary, so a task titled
//! "deleted scenes" is not mistaken for a `delete` command argument.

pub mod interpreter;

pub use interpreter::{Interpretation, interpret};

use crate::task::{Task, TaskId};

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <title>` — the remainder may be empty (prompt-for-title).
    Add(String),
    /// `delete <key>` / `remove <key>`.
    Remove(String),
    /// `complete <key>` / `done <key>`.
    Complete(String),
    /// `show tasks` / `list tasks` (whole input).
    List,
    /// Anything else.
    Unknown,
}

/// Parses a raw input line into a [`Command`].
///
/// Returns `None` when the input is empty after trimming; empty input is
/// a no-op at the UI edge (no echo, no reply).
#[must_use]
pub fn parse(input: &str) -> Option<Command> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    if text.eq_ignore_ascii_case("show tasks") || text.eq_ignore_ascii_case("list tasks") {
        return Some(Command::List);
    }
    if let Some(rest) = strip_verb(text, "add") {
        return Some(Command::Add(rest.to_string()));
    }
    if let Some(rest) = strip_verb(text, "delete").or_else(|| strip_verb(text, "remove")) {
        return Some(Command::Remove(rest.to_string()));
    }
    if let Some(rest) = strip_verb(text, "complete").or_else(|| strip_verb(text, "done")) {
        return Some(Command::Complete(rest.to_string()));
    }
    Some(Command::Unknown)
}

/// Strips a leading verb (case-insensitive) if it ends at a word boundary,
/// returning the trimmed remainder.
fn strip_verb<'a>(text: &'a str, verb: &str) -> Option<&'a str> {
    let head = text.get(..verb.len())?;
    if !head.eq_ignore_ascii_case(verb) {
        return None;
    }
    let rest = &text[verb.len()..];
    if rest.is_empty() {
        return Some("");
    }
    // The verb must be a whole word: "added sugar" is not an `add`.
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

/// Resolves a lookup key against a task slice.
///
/// All-digit keys match by id first; otherwise the first task whose title
/// equals the key case-insensitively wins.
#[must_use]
pub fn resolve_key(tasks: &[Task], key: &str) -> Option<TaskId> {
    if let Ok(id) = key.parse::<TaskId>()
        && tasks.iter().any(|t| t.id == id)
    {
        return Some(id);
    }
    tasks
        .iter()
        .find(|t| t.title.eq_ignore_ascii_case(key))
        .map(|t| t.id)
}
