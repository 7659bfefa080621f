//! HTML rendering of the task list.
//!
//! The renderer is a pure function of the store contents: the whole list
//! is re-rendered on every change, with no diffing. Every piece of
//! user-supplied text passes through [`escape_html`] before it is embedded
//! in markup; this is a security property, not a formatting choice.

use crate::task::Task;

/// Escapes `& < > " '` for safe embedding in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the whole task list as a `<ul>`.
///
/// Each row carries the escaped `id - title` text, a completion checkbox,
/// and a delete control, all bound to the task's id via `data-id`.
#[must_use]
pub fn render_task_list(tasks: &[Task]) -> String {
    let mut out = String::from("<ul id=\"task-list\">\n");
    for task in tasks {
        let class = if task.completed {
            "task-item completed"
        } else {
            "task-item"
        };
        let checked = if task.completed { " checked" } else { "" };
        out.push_str(&format!(
            "  <li class=\"{class}\"><span>{id} - {title}</span>\
             <input type=\"checkbox\" data-id=\"{id}\"{checked}>\
             <button data-id=\"{id}\">&times;</button></li>\n",
            id = task.id,
            title = escape_html(&task.title),
        ));
    }
    out.push_str("</ul>");
    out
}

/// Renders the task-count line, pluralized.
#[must_use]
pub fn render_task_count(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    }
}

/// Renders a minimal full page with the task list and count.
#[must_use]
pub fn render_page(tasks: &[Task]) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>TermTask</title></head>\n\
         <body>\n<h1>Tasks</h1>\n{list}\n<p id=\"task-count\">{count}</p>\n</body>\n</html>\n",
        list = render_task_list(tasks),
        count = render_task_count(tasks.len()),
    )
}
