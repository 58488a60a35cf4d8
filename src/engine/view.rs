use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use crate::media::{embed_url, MediaItem, MediaKind, MediaProvider, ProviderError, RawRecord};
use crate::util::preview_chars;

use super::clock::{Clock, TokioClock};
use super::filter::{apply_filters, Category};
use super::interaction::InteractionState;
use super::loader::{FeedLoader, GrowthOutcome, GrowthTicket, DEFAULT_GROWTH_DELAY};
use super::navigator::{NavInput, NavSettings, Navigator};
use super::overlay::Overlay;

/// Scroll position of whatever container renders the collection.
///
/// Units are arbitrary but must agree with the growth threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub viewport: f64,
    pub content: f64,
}

impl ScrollMetrics {
    /// True when the unseen remainder is within `threshold` of the end.
    pub fn is_near_end(&self, threshold: f64) -> bool {
        self.content - self.offset - self.viewport <= threshold
    }
}

/// Tunables for one explorer view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub nav: NavSettings,
    pub growth_delay: Duration,
    /// Characters shown before a description is collapsed with "...".
    pub preview_chars: usize,
    /// Overrides the kind's default near-end threshold.
    pub scroll_threshold: Option<f64>,
    pub shuffle: Option<bool>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            nav: NavSettings::default(),
            growth_delay: DEFAULT_GROWTH_DELAY,
            preview_chars: 80,
            scroll_threshold: None,
            shuffle: None,
        }
    }
}

/// The complete engine state behind one explorer view.
///
/// `filtered` is only ever rebuilt from `(items, category, search)`, and
/// every rebuild puts the navigator back at index 0.
pub struct FeedView {
    kind: MediaKind,
    settings: ViewSettings,
    loader: FeedLoader,
    category: Category,
    search: String,
    filtered: Vec<MediaItem>,
    navigator: Navigator,
    interaction: InteractionState,
    overlay: Overlay,
    description_expanded: bool,
}

impl FeedView {
    pub fn new(kind: MediaKind, settings: ViewSettings) -> Self {
        Self::with_parts(kind, settings, FeedLoader::new(kind), Arc::new(TokioClock))
    }

    /// Build a view with an explicit loader and clock (seeded RNG, manual time).
    pub fn with_parts(
        kind: MediaKind,
        settings: ViewSettings,
        mut loader: FeedLoader,
        clock: Arc<dyn Clock>,
    ) -> Self {
        if let Some(shuffle) = settings.shuffle {
            loader.set_shuffle(shuffle);
        }
        Self {
            kind,
            settings,
            loader,
            category: Category::All,
            search: String::new(),
            filtered: Vec::new(),
            navigator: Navigator::with_clock(settings.nav, clock),
            interaction: InteractionState::default(),
            overlay: Overlay::default(),
            description_expanded: false,
        }
    }

    // ========================================================================
    // Rendering Boundary
    // ========================================================================

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn items(&self) -> &[MediaItem] {
        self.loader.items()
    }

    pub fn filtered(&self) -> &[MediaItem] {
        &self.filtered
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn current_index(&self) -> Option<usize> {
        self.navigator.current()
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.current_index().and_then(|i| self.filtered.get(i))
    }

    /// Flags for the item in the main view.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn overlay_item(&self) -> Option<&MediaItem> {
        self.overlay.item()
    }

    pub fn is_loading_more(&self) -> bool {
        self.loader.is_loading_more()
    }

    pub fn page(&self) -> u32 {
        self.loader.page()
    }

    pub fn is_description_expanded(&self) -> bool {
        self.description_expanded
    }

    /// Description of the current item, collapsed unless expanded.
    pub fn current_description(&self) -> Option<Cow<'_, str>> {
        let item = self.current_item()?;
        if self.description_expanded {
            Some(Cow::Borrowed(item.description.as_str()))
        } else {
            Some(preview_chars(&item.description, self.settings.preview_chars))
        }
    }

    /// Whether the current description is long enough to expand.
    pub fn description_has_more(&self) -> bool {
        self.current_item()
            .is_some_and(|item| item.description.chars().count() > self.settings.preview_chars)
    }

    /// Player URL for the current item. Reels autoplay, muted only on the
    /// first reel; grid items are muted previews.
    pub fn player_url(&self) -> Option<String> {
        let item = self.current_item()?;
        let id = item.video_id()?;
        Some(match self.kind {
            MediaKind::Reel => embed_url(&id, true, self.current_index() == Some(0)),
            MediaKind::Video | MediaKind::Photo => embed_url(&id, false, true),
        })
    }

    /// Player URL for the overlay item: autoplay with sound.
    pub fn overlay_player_url(&self) -> Option<String> {
        let id = self.overlay.item()?.video_id()?;
        Some(embed_url(&id, true, false))
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Fetch the first batch. A failure leaves the view as it was.
    pub async fn load_initial<P: MediaProvider>(
        &mut self,
        provider: &P,
    ) -> Result<usize, ProviderError> {
        let count = self.loader.load_initial(provider).await?;
        self.refilter();
        Ok(count)
    }

    pub fn apply_initial(&mut self, records: Vec<RawRecord>) -> usize {
        let count = self.loader.apply_initial(records);
        self.refilter();
        count
    }

    /// React to the scroll container's position. Starts growth when near
    /// the end and nothing is in flight.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<GrowthTicket> {
        let threshold = self
            .settings
            .scroll_threshold
            .unwrap_or_else(|| self.kind.scroll_threshold());
        if !metrics.is_near_end(threshold) {
            return None;
        }
        self.loader.try_begin_growth()
    }

    pub fn complete_growth(&mut self, ticket: GrowthTicket, outcome: GrowthOutcome) -> usize {
        let appended = self.loader.complete_growth(ticket, outcome);
        if appended > 0 {
            self.refilter();
        }
        appended
    }

    // ========================================================================
    // Intents
    // ========================================================================

    pub fn select_category(&mut self, category: Category) {
        tracing::debug!(kind = self.kind.name(), category = category.label(), "Category selected");
        self.category = category;
        self.refilter();
    }

    pub fn set_search_term(&mut self, term: &str) {
        if self.search == term {
            return;
        }
        self.search = term.to_string();
        self.refilter();
    }

    pub fn next(&mut self) -> Option<usize> {
        let moved = self.navigator.next();
        self.after_move(moved)
    }

    pub fn prev(&mut self) -> Option<usize> {
        let moved = self.navigator.prev();
        self.after_move(moved)
    }

    /// Skip in the main view: always `next`, never debounced.
    pub fn skip(&mut self) -> Option<usize> {
        self.handle_input(NavInput::Skip)
    }

    /// Keyboard, wheel, and skip input, each through its own debounce.
    pub fn handle_input(&mut self, input: NavInput) -> Option<usize> {
        let moved = self.navigator.handle(input);
        self.after_move(moved)
    }

    /// Flip `liked` on whichever item is visible: the overlay's if open,
    /// else the main view's.
    pub fn toggle_liked(&mut self) -> bool {
        if self.overlay.is_open() {
            self.overlay.interaction_mut().toggle_liked()
        } else {
            self.interaction.toggle_liked()
        }
    }

    pub fn toggle_saved(&mut self) -> bool {
        if self.overlay.is_open() {
            self.overlay.interaction_mut().toggle_saved()
        } else {
            self.interaction.toggle_saved()
        }
    }

    pub fn toggle_description(&mut self) {
        self.description_expanded = !self.description_expanded;
    }

    pub fn open_item(&mut self, item: MediaItem) {
        self.overlay.open(item);
    }

    /// Open the navigator's current item in the overlay.
    pub fn open_current(&mut self) -> bool {
        match self.current_item().cloned() {
            Some(item) => {
                self.overlay.open(item);
                true
            }
            None => false,
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay.close();
    }

    /// Skip inside the overlay, resolved against the live filtered list.
    pub fn skip_overlay(&mut self) -> Option<&MediaItem> {
        self.overlay.skip(&self.filtered)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn refilter(&mut self) {
        self.filtered = apply_filters(self.loader.items(), self.category, &self.search);
        self.navigator.reset(self.filtered.len());
        self.description_expanded = false;
        let current = self.current_item().map(|item| item.id.clone());
        self.interaction.rebind(current.as_deref());
        tracing::debug!(
            kind = self.kind.name(),
            items = self.loader.items().len(),
            filtered = self.filtered.len(),
            "Filtered collection rebuilt"
        );
    }

    fn after_move(&mut self, moved: Option<usize>) -> Option<usize> {
        let index = moved?;
        self.description_expanded = false;
        let current = self.filtered.get(index).map(|item| item.id.clone());
        self.interaction.rebind(current.as_deref());
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::ManualClock;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn build_view(kind: MediaKind, values: serde_json::Value) -> (FeedView, ManualClock) {
        let clock = ManualClock::new();
        let mut view = FeedView::with_parts(
            kind,
            ViewSettings::default(),
            FeedLoader::with_seed(kind, 11),
            Arc::new(clock.clone()),
        );
        view.apply_initial(serde_json::from_value(values).unwrap());
        (view, clock)
    }

    fn gaming_sports() -> serde_json::Value {
        json!([
            {"id": 1, "reel_url": "https://youtube.com/shorts/aaaaaaaaaaa", "tag": "Gaming",
             "description": "x".repeat(120)},
            {"id": 2, "reel_url": "https://youtube.com/shorts/bbbbbbbbbbb", "tag": "Sports"},
            {"id": 3, "reel_url": "https://youtube.com/shorts/ccccccccccc", "tag": "Gaming"}
        ])
    }

    fn filtered_ids(view: &FeedView) -> Vec<&str> {
        view.filtered().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_initial_load_positions_at_start() {
        let (view, _) = build_view(MediaKind::Reel, gaming_sports());
        assert_eq!(filtered_ids(&view), vec!["1", "2", "3"]);
        assert_eq!(view.current_index(), Some(0));
        assert_eq!(view.interaction().bound_id(), Some("1"));
    }

    #[test]
    fn test_category_change_resets_index() {
        let (mut view, _) = build_view(MediaKind::Reel, gaming_sports());
        view.next();
        view.next();
        view.select_category(Category::Gaming);
        assert_eq!(filtered_ids(&view), vec!["1", "3"]);
        assert_eq!(view.current_index(), Some(0));

        view.select_category(Category::Fashion);
        assert!(view.filtered().is_empty());
        assert_eq!(view.current_index(), None);
        assert_eq!(view.next(), None);
    }

    #[test]
    fn test_move_resets_interaction_and_description() {
        let (mut view, _) = build_view(MediaKind::Reel, gaming_sports());
        view.toggle_liked();
        view.toggle_saved();
        view.toggle_description();
        assert!(view.interaction().liked());

        view.next();
        assert!(!view.interaction().liked());
        assert!(!view.interaction().saved());
        assert!(!view.is_description_expanded());
        assert_eq!(view.interaction().bound_id(), Some("2"));
    }

    #[test]
    fn test_wraparound_to_same_item_keeps_interaction() {
        let (mut view, _) = build_view(MediaKind::Photo, json!([
            {"id": "1", "image_url": "https://img.example.com/1.jpg"}
        ]));
        view.toggle_liked();
        view.toggle_saved();

        assert_eq!(view.next(), Some(0));
        assert_eq!(view.interaction().bound_id(), Some("1"));
        assert!(view.interaction().liked());
        assert!(view.interaction().saved());
    }

    #[test]
    fn test_growth_keeps_interaction_on_current_item() {
        let (mut view, _) = build_view(MediaKind::Reel, json!([
            {"id": "1", "reel_url": "https://youtube.com/shorts/aaaaaaaaaaa"}
        ]));
        view.toggle_liked();

        let near = ScrollMetrics {
            offset: 1495.0,
            viewport: 500.0,
            content: 2000.0,
        };
        let ticket = view.on_scroll(near).unwrap();
        assert_eq!(view.complete_growth(ticket, Ok(None)), 1);

        assert_eq!(view.current_item().map(|i| i.id.as_str()), Some("1"));
        assert!(view.interaction().liked());
    }

    #[test]
    fn test_description_preview() {
        let (mut view, _) = build_view(MediaKind::Reel, gaming_sports());
        assert!(view.description_has_more());
        let collapsed = view.current_description().unwrap().into_owned();
        assert_eq!(collapsed, format!("{}...", "x".repeat(80)));

        view.toggle_description();
        assert_eq!(view.current_description().unwrap().len(), 120);

        view.next();
        assert!(!view.description_has_more());
        assert_eq!(view.current_description().unwrap(), "");
    }

    #[test]
    fn test_reel_player_mutes_only_first() {
        let (mut view, _) = build_view(MediaKind::Reel, gaming_sports());
        assert_eq!(
            view.player_url().as_deref(),
            Some("https://www.youtube.com/embed/aaaaaaaaaaa?autoplay=1&mute=1&playsinline=1")
        );
        view.next();
        assert_eq!(
            view.player_url().as_deref(),
            Some("https://www.youtube.com/embed/bbbbbbbbbbb?autoplay=1&mute=0&playsinline=1")
        );
    }

    #[test]
    fn test_wheel_input_debounced_through_view() {
        let (mut view, clock) = build_view(MediaKind::Reel, gaming_sports());
        assert_eq!(view.handle_input(NavInput::Wheel(120.0)), Some(1));
        assert_eq!(view.handle_input(NavInput::Wheel(120.0)), None);
        assert_eq!(view.skip(), Some(2));
        clock.advance(Duration::from_millis(600));
        assert_eq!(view.handle_input(NavInput::Wheel(-120.0)), Some(1));
    }

    #[test]
    fn test_toggles_target_overlay_when_open() {
        let (mut view, _) = build_view(MediaKind::Photo, json!([
            {"id": "p1", "image_url": "https://img.example.com/1.jpg"},
            {"id": "p2", "image_url": "https://img.example.com/2.jpg"}
        ]));
        view.open_current();
        assert!(view.toggle_liked());
        assert!(view.overlay().interaction().liked());
        assert!(!view.interaction().liked());

        view.close_overlay();
        assert!(view.toggle_saved());
        assert!(view.interaction().saved());
    }

    #[test]
    fn test_search_term_layers_on_category() {
        let (mut view, _) = build_view(MediaKind::Photo, json!([
            {"id": "p1", "image_url": "https://img.example.com/1.jpg", "title": "Beach day", "tag": "lifestyle"},
            {"id": "p2", "image_url": "https://img.example.com/2.jpg", "title": "Beach match", "tag": "sports"},
            {"id": "p3", "image_url": "https://img.example.com/3.jpg", "tag": "sports"}
        ]));
        view.set_search_term("beach");
        assert_eq!(filtered_ids(&view), vec!["p1", "p2"]);
        view.select_category(Category::Sports);
        assert_eq!(filtered_ids(&view), vec!["p2"]);
        view.set_search_term("");
        assert_eq!(filtered_ids(&view), vec!["p2", "p3"]);
    }

    #[test]
    fn test_scroll_near_end_starts_single_growth() {
        let (mut view, _) = build_view(MediaKind::Reel, gaming_sports());
        let far = ScrollMetrics {
            offset: 0.0,
            viewport: 500.0,
            content: 2000.0,
        };
        let near = ScrollMetrics {
            offset: 1495.0,
            viewport: 500.0,
            content: 2000.0,
        };
        assert!(view.on_scroll(far).is_none());

        let ticket = view.on_scroll(near).unwrap();
        assert!(view.is_loading_more());
        assert!(view.on_scroll(near).is_none());

        assert_eq!(view.complete_growth(ticket, Ok(None)), 3);
        assert_eq!(view.filtered().len(), 6);
        assert!(!view.is_loading_more());
        assert!(view.on_scroll(near).is_some());
    }

    #[test]
    fn test_scroll_threshold_per_kind() {
        let metrics = ScrollMetrics {
            offset: 1470.0,
            viewport: 500.0,
            content: 2000.0,
        };
        let (mut reel, _) = build_view(MediaKind::Reel, json!([]));
        let (mut photo, _) = build_view(MediaKind::Photo, json!([]));
        assert!(reel.on_scroll(metrics).is_none());
        assert!(photo.on_scroll(metrics).is_some());
    }
}
