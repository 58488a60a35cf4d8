//! Input handling for the TUI.
//!
//! Keys dispatch by mode: search entry first, then the overlay, then the
//! feed view. Every navigator move is followed by a near-end check.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};
use tokio::sync::mpsc;

use crate::app::{App, AppEvent};
use crate::engine::NavInput;
use crate::media::MediaKind;
use crate::preferences::{save_theme, SidebarSection};
use crate::util::MAX_SEARCH_TERM_LENGTH;

use super::tasks::{maybe_spawn_growth, mount_view, switch_view};
use super::Action;

/// Wheel delta reported per mouse wheel notch, in pixels.
pub(super) const WHEEL_STEP: f64 = 100.0;

pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    if app.search_mode {
        handle_search_input(app, code);
        return Ok(Action::Continue);
    }

    if app.view().overlay().is_open() {
        return Ok(handle_overlay_input(app, code));
    }

    handle_browse_input(app, code, event_tx).await
}

/// Mouse wheel drives the wheel navigation source; other mouse events are ignored.
pub(super) fn handle_mouse(app: &mut App, kind: MouseEventKind, event_tx: &mpsc::Sender<AppEvent>) {
    let delta = match kind {
        MouseEventKind::ScrollDown => WHEEL_STEP,
        MouseEventKind::ScrollUp => -WHEEL_STEP,
        _ => return,
    };
    if app.search_mode || app.view().overlay().is_open() {
        return;
    }
    if app.view_mut().handle_input(NavInput::Wheel(delta)).is_some() {
        maybe_spawn_growth(app, event_tx);
    }
}

async fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),

        KeyCode::Down | KeyCode::Char('j') => {
            if app.view_mut().handle_input(NavInput::KeyDown).is_some() {
                maybe_spawn_growth(app, event_tx);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.view_mut().prev();
        }
        KeyCode::Char('n') => {
            if app.view_mut().skip().is_some() {
                maybe_spawn_growth(app, event_tx);
            }
        }

        KeyCode::Char('l') => {
            if app.view_mut().toggle_liked() {
                app.set_status("Liked");
            }
        }
        KeyCode::Char('b') => {
            if app.view_mut().toggle_saved() {
                app.set_status("Saved");
            }
        }
        KeyCode::Char('m') => app.view_mut().toggle_description(),
        KeyCode::Enter => {
            app.view_mut().open_current();
        }
        KeyCode::Char('o') => {
            if let Some(url) = app.view().current_item().map(|i| i.source_url.clone()) {
                open_in_browser(app, &url);
            }
        }

        KeyCode::Tab => {
            let next = app.view().category().next();
            app.view_mut().select_category(next);
        }
        KeyCode::BackTab => {
            let prev = app.view().category().prev();
            app.view_mut().select_category(prev);
        }
        KeyCode::Char('/') => {
            if app.active == MediaKind::Photo {
                app.search_mode = true;
                app.search_input = app.view().search_term().to_string();
            } else {
                app.set_status("Search is available in Photos");
            }
        }
        KeyCode::Esc => {
            if !app.view().search_term().is_empty() {
                app.view_mut().set_search_term("");
            }
        }

        KeyCode::Char('1') => switch_view(app, MediaKind::Photo, event_tx),
        KeyCode::Char('2') => switch_view(app, MediaKind::Video, event_tx),
        KeyCode::Char('3') => switch_view(app, MediaKind::Reel, event_tx),
        KeyCode::Char('r') => {
            let kind = app.active;
            mount_view(app, kind, event_tx);
            app.set_status(format!("Reloading {}", kind.name().to_lowercase()));
        }

        KeyCode::Char('E') => toggle_sidebar(app, SidebarSection::Explore).await,
        KeyCode::Char('L') => toggle_sidebar(app, SidebarSection::Likes).await,
        KeyCode::Char('S') => toggle_sidebar(app, SidebarSection::Saved).await,

        KeyCode::Char('t') => {
            let variant = app.cycle_theme();
            save_theme(&app.db, variant.key()).await;
            app.set_status(format!("Theme: {}", variant.name()));
        }

        _ => {}
    }
    Ok(Action::Continue)
}

/// Keys while the overlay is open. The main view's position is untouched.
fn handle_overlay_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.view_mut().close_overlay(),
        KeyCode::Char('n') => {
            if app.view_mut().skip_overlay().is_none() {
                app.set_status("End of list");
            }
        }
        KeyCode::Char('l') => {
            app.view_mut().toggle_liked();
        }
        KeyCode::Char('b') => {
            app.view_mut().toggle_saved();
        }
        KeyCode::Char('o') => {
            if let Some(url) = app.view().overlay_item().map(|i| i.source_url.clone()) {
                open_in_browser(app, &url);
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Live search: the filter follows every keystroke.
fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.search_mode = false;
            app.search_input.clear();
            app.view_mut().set_search_term("");
        }
        KeyCode::Enter => {
            app.search_mode = false;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            let term = app.search_input.clone();
            app.view_mut().set_search_term(&term);
        }
        KeyCode::Char(c) => {
            if app.search_input.len() + c.len_utf8() > MAX_SEARCH_TERM_LENGTH {
                app.set_status(format!(
                    "Search term too long (max {} chars)",
                    MAX_SEARCH_TERM_LENGTH
                ));
                return;
            }
            app.search_input.push(c);
            let term = app.search_input.clone();
            app.view_mut().set_search_term(&term);
        }
        _ => {}
    }
}

async fn toggle_sidebar(app: &mut App, section: SidebarSection) {
    let open = app.sidebar.toggle(&app.db, section).await;
    tracing::debug!(section = section.label(), open, "Sidebar section toggled");
}

fn open_in_browser(app: &mut App, raw: &str) {
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if let Err(e) = open::that(parsed.as_str()) {
                tracing::warn!(url = %parsed, error = %e, "Failed to open browser");
                app.set_error(format!("Failed to open browser: {}", e));
            } else {
                app.set_status("Opened in browser");
            }
        }
        _ => {
            tracing::warn!(url = %raw, "Refusing to open non-http URL");
            app.set_error("Item has no openable link");
        }
    }
}
