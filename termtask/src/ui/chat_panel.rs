//! Chat panel rendering (message list + input box).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use termtask_core::chat::Role;

use super::theme;
use crate::app::{App, InputTarget, PanelFocus};

/// Render the chat panel (messages + input box).
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    // Split into message area and input area.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    render_messages(frame, chunks[0], app);
    render_input(frame, chunks[1], app);
}

/// Render the transcript.
fn render_messages(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Chat;

    let items: Vec<ListItem> = app
        .transcript
        .messages()
        .iter()
        .enumerate()
        .map(|(index, msg)| {
            let is_user = msg.role == Role::User;
            let prefix = if is_user { "You" } else { "Assistant" };
            let text_style = if app.transcript.is_pending(index) {
                theme::dimmed()
            } else {
                theme::normal()
            };

            // Multi-line replies (task listings) render one Line per row.
            let mut lines = Vec::new();
            for (i, part) in msg.text.lines().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(msg.timestamp.clone(), theme::dimmed()),
                        Span::raw(" "),
                        Span::styled(prefix, theme::role_style(is_user)),
                        Span::raw(": "),
                        Span::styled(part.to_string(), text_style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(part.to_string(), text_style)));
                }
            }
            if lines.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{prefix}: "),
                    theme::role_style(is_user),
                )));
            }

            ListItem::new(lines)
        })
        .collect();

    let block = Block::default()
        .title(Span::styled("Chat", theme::panel_title(theme::CHAT_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}

/// Render the input box.
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Input;

    // Build the input text with cursor.
    let mut display_text = app.input.clone();
    if is_focused {
        if app.cursor_position >= display_text.len() {
            display_text.push('█');
        } else {
            display_text.insert(app.cursor_position, '█');
        }
    }

    let placeholder = match app.input_target {
        InputTarget::Chat => "Type a message...",
        InputTarget::NewTask => "New task title...",
    };
    let input_line = if display_text.is_empty() && !is_focused {
        Line::from(Span::styled(placeholder, theme::dimmed()))
    } else {
        Line::from(Span::styled(display_text, theme::normal()))
    };

    let title = match app.input_target {
        InputTarget::Chat => "Input",
        InputTarget::NewTask => "New task",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let paragraph = Paragraph::new(input_line).block(block);

    frame.render_widget(paragraph, area);
}
