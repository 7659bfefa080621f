//! Application state and event handling.
//!
//! [`App`] is the explicit session context: it owns the task cache, the
//! chat transcript, and all transient UI state. Key events are mapped to
//! [`AppAction`]s that the event loop dispatches to the session; `App`
//! itself never talks to a store.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use termtask_core::chat::Role;
use termtask_core::task::{Task, TaskId};

use crate::transcript::{ChatTranscript, PendingToken};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Input box is focused (default).
    Input,
    /// Task list is focused.
    Tasks,
    /// Chat message list is focused (scrolling).
    Chat,
}

/// What the input box currently feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// Chat message to send.
    Chat,
    /// Title for a new task.
    NewTask,
}

/// A user intention produced by key handling, dispatched by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Add a task with the given title.
    AddTask(String),
    /// Set a task's completion state.
    ToggleTask(TaskId, bool),
    /// Delete a task.
    DeleteTask(TaskId),
    /// Send a chat message.
    SendChat(String),
    /// Re-fetch the task list.
    Refresh,
}

/// Main application state.
pub struct App {
    /// Current text input.
    pub input: String,
    /// Cursor position in input (byte offset, always on a char boundary).
    pub cursor_position: usize,
    /// What the input box feeds when submitted.
    pub input_target: InputTarget,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Cached task list, rebuilt wholesale from the store after every
    /// mutation.
    pub tasks: Vec<Task>,
    /// The chat transcript.
    pub transcript: ChatTranscript,
    /// Scroll offset for the chat message list.
    pub chat_scroll: usize,
    /// Selected task index.
    pub selected_task: usize,
    /// Transient status-bar notice (e.g. a failed operation).
    pub status_line: Option<String>,
    /// Backend description for the status bar.
    pub backend_label: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a fresh application state.
    #[must_use]
    pub fn new(backend_label: String, timestamp_format: &str) -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            input_target: InputTarget::Chat,
            focus: PanelFocus::Input,
            tasks: Vec::new(),
            transcript: ChatTranscript::new(timestamp_format),
            chat_scroll: 0,
            selected_task: 0,
            status_line: None,
            backend_label,
            should_quit: false,
        }
    }

    /// Replaces the task cache and clamps the selection.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        if self.selected_task >= self.tasks.len() {
            self.selected_task = self.tasks.len().saturating_sub(1);
        }
    }

    /// The currently selected task, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Task> {
        self.tasks.get(self.selected_task)
    }

    /// Posts the user line, creates a pending placeholder, and follows
    /// the tail.
    pub fn begin_chat_exchange(&mut self, text: &str) -> PendingToken {
        self.transcript.post(Role::User, text);
        let token = self.transcript.begin_pending();
        self.scroll_chat_to_bottom();
        token
    }

    /// Scrolls the chat panel to the newest line.
    pub fn scroll_chat_to_bottom(&mut self) {
        self.chat_scroll = self.transcript.len().saturating_sub(1);
    }

    /// Handles a key event, returning the action to dispatch, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AppAction> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Esc, _) => {
                if self.input_target == InputTarget::NewTask {
                    // Cancel task entry instead of quitting.
                    self.input_target = InputTarget::Chat;
                    self.clear_input();
                } else {
                    self.should_quit = true;
                }
                return None;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.cycle_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::Tasks => self.handle_tasks_key(key),
            PanelFocus::Chat => {
                self.handle_chat_key(key);
                None
            }
        }
    }

    /// Handle key event when the input box is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Char(c) => {
                self.enter_char(c);
                None
            }
            KeyCode::Backspace => {
                self.delete_char();
                None
            }
            KeyCode::Left => {
                self.move_cursor_left();
                None
            }
            KeyCode::Right => {
                self.move_cursor_right();
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.input.len();
                None
            }
            _ => None,
        }
    }

    /// Handle key event when the task list is focused.
    fn handle_tasks_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_task > 0 {
                    self.selected_task -= 1;
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_task < self.tasks.len().saturating_sub(1) {
                    self.selected_task += 1;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self
                .selected()
                .map(|task| AppAction::ToggleTask(task.id, !task.completed)),
            KeyCode::Delete | KeyCode::Char('d') => {
                self.selected().map(|task| AppAction::DeleteTask(task.id))
            }
            KeyCode::Char('a') => {
                self.input_target = InputTarget::NewTask;
                self.focus = PanelFocus::Input;
                self.clear_input();
                None
            }
            KeyCode::Char('r') => Some(AppAction::Refresh),
            _ => None,
        }
    }

    /// Handle key event when the chat message list is focused.
    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.chat_scroll = self.chat_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.chat_scroll < self.transcript.len().saturating_sub(1) {
                    self.chat_scroll += 1;
                }
            }
            _ => {}
        }
    }

    /// Cycle focus: Input -> Tasks -> Chat -> Input.
    const fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::Tasks,
            PanelFocus::Tasks => PanelFocus::Chat,
            PanelFocus::Chat => PanelFocus::Input,
        };
    }

    /// Submit the input box to its current target.
    fn submit_input(&mut self) -> Option<AppAction> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            // Empty submissions are silent no-ops.
            return None;
        }
        self.clear_input();
        match self.input_target {
            InputTarget::Chat => Some(AppAction::SendChat(text)),
            InputTarget::NewTask => {
                self.input_target = InputTarget::Chat;
                Some(AppAction::AddTask(text))
            }
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input.remove(prev);
            self.cursor_position = prev;
        }
    }

    /// Move cursor left one character.
    fn move_cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor_position = prev;
        }
    }

    /// Move cursor right one character.
    fn move_cursor_right(&mut self) {
        if let Some(c) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += c.len_utf8();
        }
    }

    /// Byte offset of the character boundary before the cursor.
    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.cursor_position]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}
