//! Render dispatch and screen layout.

use crate::app::App;
use crate::engine::Category;
use crate::media::MediaKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::loop_runner::SPINNER_FRAMES;
use super::{feed, overlay, sidebar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

const SIDEBAR_WIDTH: u16 = 20;

const SPINNER: [&str; SPINNER_FRAMES] = ["|", "/", "-", "\\"];

pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, rows[0]);
    render_category_bar(f, app, rows[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[2]);

    sidebar::render(f, app, body[0]);
    feed::render(f, app, body[1]);
    status::render(f, app, rows[3]);

    if app.view().overlay().is_open() {
        overlay::render(f, app, rows[2]);
    }
}

/// View tabs with a spinner while anything is loading.
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let mut spans = vec![Span::raw(" ")];
    for (i, kind) in MediaKind::ALL.into_iter().enumerate() {
        let style = if kind == app.active {
            palette.tab_active
        } else {
            palette.tab_inactive
        };
        spans.push(Span::styled(format!("{} {}", i + 1, kind.name()), style));
        spans.push(Span::raw("   "));
    }
    if app.any_loading() {
        spans.push(Span::styled(SPINNER[app.spinner_frame % SPINNER_FRAMES], palette.loading));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Category chips, scrolled so the selected one stays on screen.
fn render_category_bar(f: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let selected = app.view().category();
    let start = Category::ALL
        .iter()
        .position(|&c| c == selected)
        .unwrap_or(0)
        .saturating_sub(3);

    let mut spans = vec![Span::raw(" ")];
    for &category in &Category::ALL[start..] {
        let style = if category == selected {
            palette.category_active
        } else {
            palette.category_inactive
        };
        spans.push(Span::styled(
            format!(" {} {} ", category.icon(), category.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Centered rectangle taking the given percentages of `area`.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::media::RawRecord;
    use crate::storage::Database;
    use crate::theme::ThemeVariant;
    use ratatui::{backend::TestBackend, Terminal};

    async fn app_with_photos() -> App {
        let db = Database::open(":memory:").await.unwrap();
        let mut app = App::new(db, Config::default(), ThemeVariant::Dark).unwrap();
        let records = (1..=30)
            .map(|i| RawRecord {
                id: Some(serde_json::json!(i)),
                image_url: Some(format!("https://img.example.com/{}.jpg", i)),
                title: Some(format!("Photo number {}", i)),
                description: Some("d".repeat(120)),
                tag: Some("gaming".to_string()),
                ..RawRecord::default()
            })
            .collect();
        app.view_mut().apply_initial(records);
        app
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_render_records_list_rows() {
        let mut app = app_with_photos().await;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        // 30 rows minus header, categories, status, and list borders
        assert_eq!(app.list_rows, 25);
        let text = buffer_text(&terminal);
        assert!(text.contains("Photos"));
        assert!(text.contains("Photo number 1"));
    }

    #[tokio::test]
    async fn test_render_too_small() {
        let mut app = app_with_photos().await;
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Terminal too small"));
    }

    #[tokio::test]
    async fn test_render_overlay() {
        let mut app = app_with_photos().await;
        app.view_mut().open_current();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("[n] next"));
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(70, 60, area);
        assert!(inner.x >= area.x && inner.right() <= area.right());
        assert!(inner.y >= area.y && inner.bottom() <= area.bottom());
        assert_eq!(inner.width, 70);
    }
}
