//! Task panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the task panel from the cached task list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Tasks;

    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let checkbox = if task.completed { "[✓]" } else { "[ ]" };
            let style = if is_focused && index == app.selected_task {
                theme::selected()
            } else if task.completed {
                theme::dimmed()
            } else {
                theme::normal()
            };

            let line = Line::from(vec![
                Span::styled(checkbox, style),
                Span::styled(format!(" {} ", task.id), theme::dimmed()),
                Span::styled(task.title.clone(), style),
            ]);

            ListItem::new(line)
        })
        .collect();

    let title = format!("Tasks ({})", app.tasks.len());
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
