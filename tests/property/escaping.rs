//! Property-based tests for the HTML escaping layer.
//!
//! Uses proptest to verify:
//! 1. Escaped output never contains a raw `<`, `>`, `"`, or `'`, and
//!    every `&` starts a known entity.
//! 2. Escaping is lossless: unescaping recovers the original text.
//! 3. Text without special characters passes through unchanged.
//! 4. Rendered rows never leak raw markup from task titles.

use proptest::prelude::*;

use termtask_core::render::{escape_html, render_task_list};
use termtask_core::task::{Task, TaskId};

/// Inverse of `escape_html`, for round-trip checking only.
///
/// `&amp;` must be replaced last so that escaped entity text
/// (e.g. `&amp;lt;`) is not double-unescaped.
fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

proptest! {
    #[test]
    fn escaped_output_has_no_raw_specials(text in ".*") {
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
        for (index, _) in escaped.match_indices('&') {
            let rest = &escaped[index..];
            prop_assert!(
                ENTITIES.iter().any(|entity| rest.starts_with(entity)),
                "bare ampersand at {index} in {escaped:?}"
            );
        }
    }

    #[test]
    fn escaping_round_trips(text in ".*") {
        prop_assert_eq!(unescape_html(&escape_html(&text)), text);
    }

    #[test]
    fn plain_text_is_unchanged(text in "[a-zA-Z0-9 .,!?-]*") {
        prop_assert_eq!(escape_html(&text), text);
    }

    #[test]
    fn rendered_rows_never_leak_markup_from_titles(title in ".{1,64}") {
        let tasks = vec![Task {
            id: TaskId::new(1),
            title: title.clone(),
            completed: false,
        }];
        let rendered = render_task_list(&tasks);
        // The only raw tags present are the renderer's own row scaffolding.
        let scrubbed = rendered
            .replace("<ul id=\"task-list\">", "")
            .replace("</ul>", "")
            .replace("<li class=\"task-item\">", "")
            .replace("</li>", "")
            .replace("<span>", "")
            .replace("</span>", "")
            .replace("<input type=\"checkbox\" data-id=\"1\">", "")
            .replace("<button data-id=\"1\">", "")
            .replace("</button>", "");
        prop_assert!(
            !scrubbed.contains('<') && !scrubbed.contains('>'),
            "leaked markup in {rendered:?}"
        );
    }
}
