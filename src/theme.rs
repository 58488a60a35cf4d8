//! Theme system for the TUI.
//!
//! `ThemeVariant` selects between Dark and Light palettes; `ColorPalette`
//! maps each semantic UI role to a ratatui `Style`.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Lowercase name, as stored in config and preferences.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header tabs and category bar --
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub category_active: Style,
    pub category_inactive: Style,

    // -- Feed list --
    pub item_normal: Style,
    pub item_selected: Style,
    pub item_title: Style,
    pub item_meta: Style,
    pub item_badge: Style,

    // -- Detail card and overlay --
    pub description: Style,
    pub more_hint: Style,
    pub liked: Style,
    pub saved: Style,
    pub player_url: Style,
    pub overlay_border: Style,

    // -- Sidebar --
    pub sidebar_header: Style,
    pub sidebar_entry: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub status_error: Style,
    pub search_input: Style,
    pub loading: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),
            category_active: Style::default().bg(Color::Cyan).fg(Color::Black),
            category_inactive: Style::default().fg(Color::Gray),

            item_normal: Style::default(),
            item_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            item_title: Style::default().add_modifier(Modifier::BOLD),
            item_meta: Style::default().fg(Color::DarkGray),
            item_badge: Style::default().fg(Color::Magenta),

            description: Style::default(),
            more_hint: Style::default().fg(Color::Cyan),
            liked: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            saved: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            player_url: Style::default().fg(Color::Blue),
            overlay_border: Style::default().fg(Color::Yellow),

            sidebar_header: Style::default().add_modifier(Modifier::BOLD),
            sidebar_entry: Style::default().fg(Color::Gray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            status_error: Style::default().bg(Color::DarkGray).fg(Color::Red),
            search_input: Style::default().fg(Color::Yellow),
            loading: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),
            category_active: Style::default().bg(Color::Blue).fg(Color::White),
            category_inactive: Style::default().fg(Color::DarkGray),

            item_normal: Style::default().fg(Color::Black),
            item_selected: Style::default().bg(Color::Blue).fg(Color::White),
            item_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            item_meta: Style::default().fg(Color::DarkGray),
            item_badge: Style::default().fg(Color::Magenta),

            description: Style::default().fg(Color::Black),
            more_hint: Style::default().fg(Color::Blue),
            liked: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            saved: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            player_url: Style::default().fg(Color::Blue),
            overlay_border: Style::default().fg(Color::Magenta),

            sidebar_header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            sidebar_entry: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            status_error: Style::default().bg(Color::White).fg(Color::Red),
            search_input: Style::default().fg(Color::Magenta),
            loading: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parse_case_insensitive() {
        assert_eq!(ThemeVariant::from_str_name("Light"), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_str_name(" DARK "), Some(ThemeVariant::Dark));
        assert_eq!(ThemeVariant::from_str_name("solarized"), None);
    }

    #[test]
    fn test_variant_cycle_and_key_round_trip() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            assert_eq!(variant.next().next(), variant);
            assert_eq!(ThemeVariant::from_str_name(variant.key()), Some(variant));
        }
    }

    #[test]
    fn test_palettes_distinguish_selection() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.item_selected, dark.item_normal);
        assert_ne!(light.item_selected, light.item_normal);
        assert_ne!(dark.status_bar, light.status_bar);
    }
}
