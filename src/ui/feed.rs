//! Item list and detail card for the active view.
//!
//! Photos and videos show a scrolling list beside the current item's card.
//! Reels show one card at a time.

use crate::app::App;
use crate::media::{MediaItem, MediaKind};
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if app.active == MediaKind::Reel {
        app.list_rows = 1;
        render_card(f, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    app.list_rows = usize::from(chunks[0].height.saturating_sub(2)).max(1);
    render_list(f, app, chunks[0]);
    render_card(f, app, chunks[1]);
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let view = app.view();
    let title = format!(
        " {} · {} ({}) ",
        app.active.name(),
        view.category().label(),
        view.filtered().len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.panel_border_focused)
        .title(title);

    if let Some(placeholder) = placeholder(app) {
        f.render_widget(Paragraph::new(placeholder).style(palette.loading).block(block), area);
        return;
    }

    let width = usize::from(area.width.saturating_sub(2));
    let top = app.list_top(app.active);
    let current = view.current_index();
    let mut lines: Vec<Line> = view
        .filtered()
        .iter()
        .enumerate()
        .skip(top)
        .take(app.list_rows)
        .map(|(i, item)| {
            let style = if Some(i) == current {
                palette.item_selected
            } else {
                palette.item_normal
            };
            Line::styled(list_row(item, width), style)
        })
        .collect();

    if view.is_loading_more() {
        lines.push(Line::styled("Loading more...", palette.loading));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn list_row(item: &MediaItem, width: usize) -> String {
    let title = strip_control_chars(&item.title);
    let title = if title.is_empty() { "(untitled)".into() } else { title };
    let row = format!("{}  [{}]", title, item.category_label());
    truncate_to_width(&row, width).into_owned()
}

/// Card for the current item: title, category, metrics, description, link.
fn render_card(f: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let view = app.view();
    let position = match (view.current_index(), view.filtered().len()) {
        (Some(i), len) => format!(" {}/{} ", i + 1, len),
        _ => String::new(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.panel_border)
        .title(position);

    let Some(item) = view.current_item() else {
        let text = placeholder(app).unwrap_or_else(|| "Nothing selected".to_string());
        f.render_widget(Paragraph::new(text).style(palette.loading).block(block), area);
        return;
    };

    let mut lines = vec![
        Line::styled(strip_control_chars(&item.title).into_owned(), palette.item_title),
        Line::styled(format!("#{}", item.category_label()), palette.item_badge),
    ];

    if let Some(metrics) = item.metrics {
        lines.push(Line::styled(
            format!("♥ {}   💬 {}", metrics.likes, metrics.comments),
            palette.item_meta,
        ));
    }
    if let Some(avatar) = &item.avatar_url {
        lines.push(Line::styled(format!("by {}", avatar), palette.item_meta));
    }

    lines.push(Line::default());
    if let Some(description) = view.current_description() {
        let mut spans = vec![Span::styled(
            strip_control_chars(&description).into_owned(),
            palette.description,
        )];
        if view.description_has_more() {
            let hint = if view.is_description_expanded() { " [m] less" } else { " [m] more" };
            spans.push(Span::styled(hint, palette.more_hint));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    let link = view.player_url().unwrap_or_else(|| item.source_url.clone());
    lines.push(Line::styled(link, palette.player_url));

    lines.push(Line::default());
    let interaction = view.interaction();
    lines.push(Line::from(vec![
        if interaction.liked() {
            Span::styled("♥ Liked", palette.liked)
        } else {
            Span::styled("♡ Like [l]", palette.item_meta)
        },
        Span::raw("   "),
        if interaction.saved() {
            Span::styled("★ Saved", palette.saved)
        } else {
            Span::styled("☆ Save [b]", palette.item_meta)
        },
    ]));

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

/// Text shown instead of items while loading or when nothing matches.
fn placeholder(app: &App) -> Option<String> {
    let view = app.view();
    if *app.loading.get(app.active) {
        return Some(format!("Loading {}...", app.active.name().to_lowercase()));
    }
    if view.items().is_empty() {
        return Some(format!("No {} loaded. Press r to retry.", app.active.name().to_lowercase()));
    }
    if view.filtered().is_empty() {
        return Some(if view.search_term().is_empty() {
            format!("No items in {}", view.category().label())
        } else {
            format!("No titles match \"{}\"", view.search_term())
        });
    }
    None
}
