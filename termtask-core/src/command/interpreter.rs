//! Applies parsed chat commands to a task store and formats replies.
//!
//! The interpreter is generic over [`TaskStore`] so the same logic serves
//! both the local session and the task service's `/chat` handler. Store
//! failures never escape as errors: they become user-visible reply text,
//! and the UI stays interactive.

use crate::chat::{EffectStatus, FunctionResult};
use crate::store::{StoreError, TaskStore};
use crate::task::Task;

use super::{Command, parse, resolve_key};

/// Reply shown when `add` has no title after the verb.
const PROMPT_FOR_TITLE: &str = "What would you like to add? Try: add <task title>";

/// Reply shown when the task list is empty.
const EMPTY_LIST: &str = "Your task list is empty.";

/// Reply shown when the command verb is not recognized.
const FALLBACK: &str =
    "I didn't understand that. Try 'add <task>', 'complete <task>', 'delete <task>', or 'show tasks'.";

/// The interpreter's answer to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// Assistant reply text.
    pub reply: String,
    /// Structured outcome, present only when the store was mutated.
    pub effect: Option<FunctionResult>,
}

impl Interpretation {
    fn plain(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            effect: None,
        }
    }

    fn mutated(reply: String, task: Task) -> Self {
        let effect = FunctionResult {
            status: EffectStatus::Success,
            task: Some(task),
            message: reply.clone(),
        };
        Self {
            reply,
            effect: Some(effect),
        }
    }
}

/// Interprets one free-text input line against the given store.
///
/// Returns `None` when the input is empty after trimming (a no-op: the
/// caller posts nothing to the transcript).
pub async fn interpret<S: TaskStore>(input: &str, store: &S) -> Option<Interpretation> {
    let command = parse(input)?;
    Some(run(command, store).await)
}

/// Executes a parsed command against the store.
async fn run<S: TaskStore>(command: Command, store: &S) -> Interpretation {
    match command {
        Command::Add(title) if title.is_empty() => Interpretation::plain(PROMPT_FOR_TITLE),
        Command::Add(title) => match store.add(&title).await {
            Ok(task) => {
                let reply = format!("Added task '{}'.", task.title);
                Interpretation::mutated(reply, task)
            }
            Err(err) => Interpretation::plain(describe_error(&err)),
        },
        Command::Remove(key) => match lookup(store, &key).await {
            Lookup::Found(task) => match store.remove(task.id).await {
                Ok(()) => {
                    let reply = format!("Deleted '{}'.", task.title);
                    Interpretation::mutated(reply, task)
                }
                Err(err) => Interpretation::plain(describe_error(&err)),
            },
            Lookup::Missing => Interpretation::plain(not_found(&key)),
            Lookup::Failed(err) => Interpretation::plain(describe_error(&err)),
        },
        Command::Complete(key) => match lookup(store, &key).await {
            // Set, not flip: re-issuing `complete X` keeps X completed.
            Lookup::Found(task) => match store.set_completed(task.id, true).await {
                Ok(task) => {
                    let reply = format!("Marked '{}' complete.", task.title);
                    Interpretation::mutated(reply, task)
                }
                Err(err) => Interpretation::plain(describe_error(&err)),
            },
            Lookup::Missing => Interpretation::plain(not_found(&key)),
            Lookup::Failed(err) => Interpretation::plain(describe_error(&err)),
        },
        Command::List => match store.list().await {
            Ok(tasks) => Interpretation::plain(render_listing(&tasks)),
            Err(err) => Interpretation::plain(describe_error(&err)),
        },
        Command::Unknown => Interpretation::plain(FALLBACK),
    }
}

/// Outcome of resolving a lookup key against the store contents.
enum Lookup {
    Found(Task),
    Missing,
    Failed(StoreError),
}

/// Resolves a key to a task by listing the store and matching id-then-title.
async fn lookup<S: TaskStore>(store: &S, key: &str) -> Lookup {
    let tasks = match store.list().await {
        Ok(tasks) => tasks,
        Err(err) => return Lookup::Failed(err),
    };
    match resolve_key(&tasks, key) {
        Some(id) => tasks
            .into_iter()
            .find(|t| t.id == id)
            .map_or(Lookup::Missing, Lookup::Found),
        None => Lookup::Missing,
    }
}

/// Formats the numbered task listing, or the empty-list message.
fn render_listing(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return EMPTY_LIST.to_string();
    }
    let mut out = String::from("Here are your tasks:");
    for task in tasks {
        let marker = if task.completed { "[x]" } else { "[ ]" };
        out.push_str(&format!("\n{}. {} {}", task.id, marker, task.title));
    }
    out
}

fn not_found(key: &str) -> String {
    format!("No task named '{key}' was found.")
}

fn describe_error(err: &StoreError) -> String {
    match err {
        StoreError::TitleEmpty => PROMPT_FOR_TITLE.to_string(),
        StoreError::TitleTooLong => {
            "That task title is too long (max 256 characters).".to_string()
        }
        StoreError::NotFound(id) => format!("No task with id {id} was found."),
        StoreError::Server(msg) => format!("Error: {msg}"),
        StoreError::Network(_) => "Failed to contact server".to_string(),
    }
}
