//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Input => "Enter: submit | Tab: switch panel | Esc: quit",
        PanelFocus::Tasks => {
            "↑↓/jk: navigate | Enter: toggle | d: delete | a: add | r: refresh | Tab: switch panel"
        }
        PanelFocus::Chat => "↑↓/jk: scroll | Tab: switch panel | Esc: quit",
    };

    let mut spans = vec![
        Span::styled("TermTask", theme::bold()),
        Span::raw(" | "),
        Span::raw(app.backend_label.clone()),
        Span::raw(" | "),
    ];
    if let Some(ref status) = app.status_line {
        spans.push(Span::styled(status.clone(), theme::normal().fg(theme::WARNING)));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
