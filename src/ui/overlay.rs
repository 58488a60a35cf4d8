use crate::app::App;
use crate::util::strip_control_chars;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::render::centered_rect;

/// Modal view of one item, drawn over the body.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let Some(item) = view.overlay_item() else {
        return;
    };
    let palette = &app.palette;
    let rect = centered_rect(70, 70, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.overlay_border)
        .title(format!(" {} ", item.category_label()));

    let mut lines = vec![
        Line::styled(strip_control_chars(&item.title).into_owned(), palette.item_title),
        Line::default(),
    ];
    if !item.description.is_empty() {
        lines.push(Line::styled(
            strip_control_chars(&item.description).into_owned(),
            palette.description,
        ));
        lines.push(Line::default());
    }

    let link = view
        .overlay_player_url()
        .unwrap_or_else(|| item.source_url.clone());
    lines.push(Line::styled(link, palette.player_url));
    lines.push(Line::default());

    let interaction = view.overlay().interaction();
    lines.push(Line::from(vec![
        Span::styled(
            if interaction.liked() { "♥ Liked" } else { "♡ Like" },
            if interaction.liked() { palette.liked } else { palette.item_meta },
        ),
        Span::raw("   "),
        Span::styled(
            if interaction.saved() { "★ Saved" } else { "☆ Save" },
            if interaction.saved() { palette.saved } else { palette.item_meta },
        ),
    ]));
    lines.push(Line::default());
    lines.push(Line::styled(
        "[n] next  [l] like  [b] save  [o] open  [Esc] close",
        palette.more_hint,
    ));

    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        rect,
    );
}
