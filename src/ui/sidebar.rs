use crate::app::App;
use crate::media::MediaKind;
use crate::preferences::SidebarSection;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Collapsible sections; expansion state comes from persisted preferences.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let mut lines = Vec::new();

    for section in SidebarSection::ALL {
        let open = app.sidebar_open(section);
        let marker = if open { "▾" } else { "▸" };
        let key = section.label().chars().next().unwrap_or(' ');
        lines.push(Line::from(vec![
            Span::styled(format!("{} {}", marker, section.label()), palette.sidebar_header),
            Span::styled(format!(" [{}]", key), palette.item_meta),
        ]));
        if !open {
            continue;
        }
        for kind in [MediaKind::Reel, MediaKind::Photo, MediaKind::Video] {
            let style = if section == SidebarSection::Explore && kind == app.active {
                palette.item_selected
            } else {
                palette.sidebar_entry
            };
            let label = if section == SidebarSection::Explore {
                let number = match kind {
                    MediaKind::Photo => 1,
                    MediaKind::Video => 2,
                    MediaKind::Reel => 3,
                };
                format!("  {} {}", number, kind.name())
            } else {
                format!("  {}", kind.name())
            };
            lines.push(Line::styled(label, style));
        }
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(palette.panel_border);
    f.render_widget(Paragraph::new(lines).block(block), area);
}
