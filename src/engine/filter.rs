use crate::media::MediaItem;

// ============================================================================
// Category
// ============================================================================

/// The closed set of category labels offered by every explorer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Identity filter: matches every item.
    #[default]
    All,
    Technology,
    Sports,
    Lifestyle,
    Business,
    Education,
    HealthFitness,
    Fashion,
    Gaming,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::All,
        Category::Technology,
        Category::Sports,
        Category::Lifestyle,
        Category::Business,
        Category::Education,
        Category::HealthFitness,
        Category::Fashion,
        Category::Gaming,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Technology => "Technology",
            Self::Sports => "Sports",
            Self::Lifestyle => "Lifestyle",
            Self::Business => "Business",
            Self::Education => "Education",
            Self::HealthFitness => "Health & Fitness",
            Self::Fashion => "Fashion",
            Self::Gaming => "Gaming",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::All => "🗂️",
            Self::Technology => "💻",
            Self::Sports => "⚽",
            Self::Lifestyle => "🏡",
            Self::Business => "💼",
            Self::Education => "🎓",
            Self::HealthFitness => "🏋️",
            Self::Fashion => "👗",
            Self::Gaming => "🎮",
        }
    }

    /// Look up a category by any label variant ("Health & Fitness",
    /// "health_fitness", "HEALTH  FITNESS").
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = normalize_category(label);
        Self::ALL
            .into_iter()
            .find(|c| normalize_category(c.label()) == wanted)
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Next category in bar order, wrapping to "All".
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous category in bar order, wrapping to "Gaming".
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

// ============================================================================
// Normalization and Matching
// ============================================================================

/// Canonical form of a category label for comparison.
///
/// Lowercases and collapses runs of whitespace, `&`, `_`, and `-` into a
/// single `_`, so "Health & Fitness" and "health_fitness" compare equal.
pub fn normalize_category(label: &str) -> String {
    label
        .split(|c: char| c.is_whitespace() || matches!(c, '&' | '_' | '-'))
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Whether an item belongs to the selected category.
///
/// Untagged items only match [`Category::All`].
pub fn matches_category(item: &MediaItem, selected: Category) -> bool {
    if selected == Category::All {
        return true;
    }
    match item.category.as_deref() {
        Some(label) => {
            let normalized = normalize_category(label);
            !normalized.is_empty() && normalized == normalize_category(selected.label())
        }
        None => false,
    }
}

/// Case-insensitive substring match of the search term against a title.
///
/// An empty term passes everything; an empty title fails any non-empty term.
pub fn matches_search(title: &str, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    if title.is_empty() {
        return false;
    }
    title.to_lowercase().contains(&term.to_lowercase())
}

/// Stable, order-preserving subsequence of `items` matching the category.
pub fn filter_by_category(items: &[MediaItem], selected: Category) -> Vec<MediaItem> {
    if selected == Category::All {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| matches_category(item, selected))
        .cloned()
        .collect()
}

/// Category filter with the search-term filter layered on top.
pub fn apply_filters(items: &[MediaItem], selected: Category, search: &str) -> Vec<MediaItem> {
    items
        .iter()
        .filter(|item| matches_category(item, selected) && matches_search(&item.title, search))
        .cloned()
        .collect()
}
