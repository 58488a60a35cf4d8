use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// One-line status bar: search prompt, transient message, or key hints.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    let palette = &app.palette;

    let (text, style): (Cow<'_, str>, _) = if app.search_mode {
        (
            Cow::Owned(format!("/{}▏  Enter keep · Esc clear", app.search_input)),
            palette.search_input,
        )
    } else if let Some((msg, _)) = &app.status_message {
        let style = if app.status_is_error {
            palette.status_error
        } else {
            palette.status_bar
        };
        (Cow::Borrowed(&**msg), style)
    } else if app.view().overlay().is_open() {
        (
            Cow::Borrowed("[n]ext [l]ike [b] save [o]pen [Esc] close"),
            palette.status_bar,
        )
    } else {
        (
            Cow::Borrowed(
                "[j/k] move [n] skip [Enter] open [Tab] category [/] search [m] more [1-3] view [t] theme [q] quit",
            ),
            palette.status_bar,
        )
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}
