use std::borrow::Cow;

use anyhow::Result;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::Config;
use crate::engine::{FeedView, GrowthOutcome, GrowthTicket, ScrollMetrics};
use crate::media::{MediaKind, ProviderError, RawRecord, Source};
use crate::preferences::{SidebarPreferences, SidebarSection};
use crate::storage::Database;
use crate::theme::{ColorPalette, ThemeVariant};

/// Height of one list row in the pixel space the near-end threshold uses.
pub const ROW_PX: f64 = 20.0;

/// How long a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Per-kind storage
// ============================================================================

/// One value for each explorer view.
#[derive(Debug, Clone, Default)]
pub struct PerKind<T> {
    pub photo: T,
    pub video: T,
    pub reel: T,
}

impl<T> PerKind<T> {
    pub fn from_fn(mut f: impl FnMut(MediaKind) -> T) -> Self {
        Self {
            photo: f(MediaKind::Photo),
            video: f(MediaKind::Video),
            reel: f(MediaKind::Reel),
        }
    }

    pub fn get(&self, kind: MediaKind) -> &T {
        match kind {
            MediaKind::Photo => &self.photo,
            MediaKind::Video => &self.video,
            MediaKind::Reel => &self.reel,
        }
    }

    pub fn get_mut(&mut self, kind: MediaKind) -> &mut T {
        match kind {
            MediaKind::Photo => &mut self.photo,
            MediaKind::Video => &mut self.video,
            MediaKind::Reel => &mut self.reel,
        }
    }
}

// ============================================================================
// Background Events
// ============================================================================

/// Results sent back from background tasks.
///
/// `generation` is the view generation at spawn time; a result whose
/// generation no longer matches belongs to a view that has since been
/// remounted and is dropped.
#[derive(Debug)]
pub enum AppEvent {
    InitialLoaded {
        kind: MediaKind,
        generation: u64,
        result: Result<Vec<RawRecord>, ProviderError>,
    },
    GrowthLoaded {
        kind: MediaKind,
        generation: u64,
        ticket: GrowthTicket,
        result: GrowthOutcome,
    },
    TaskPanicked {
        task: &'static str,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub db: Database,
    pub http_client: reqwest::Client,
    pub config: Config,

    pub sources: PerKind<Source>,
    pub views: PerKind<FeedView>,
    /// Bumped on every remount of a view.
    pub generations: PerKind<u64>,
    /// Initial load in flight.
    pub loading: PerKind<bool>,
    pub active: MediaKind,

    pub sidebar: SidebarPreferences,
    pub theme_variant: ThemeVariant,
    pub palette: ColorPalette,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub status_is_error: bool,
    pub search_mode: bool,
    pub search_input: String,

    /// Visible rows of the item list, recorded by the last render.
    pub list_rows: usize,
    pub spinner_frame: usize,
    pub needs_redraw: bool,

    pub tasks: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(db: Database, config: Config, theme_variant: ThemeVariant) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .tcp_keepalive(std::time::Duration::from_secs(60))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let sources =
            PerKind::from_fn(|kind| Source::from_location(&http_client, config.source_for(kind)));
        let views = PerKind::from_fn(|kind| FeedView::new(kind, config.view_settings(kind)));

        Ok(Self {
            db,
            http_client,
            config,
            sources,
            views,
            generations: PerKind::default(),
            loading: PerKind::default(),
            active: MediaKind::Photo,
            sidebar: SidebarPreferences::default(),
            theme_variant,
            palette: theme_variant.palette(),
            status_message: None,
            status_is_error: false,
            search_mode: false,
            search_input: String::new(),
            list_rows: 1,
            spinner_frame: 0,
            needs_redraw: true,
            tasks: Vec::new(),
        })
    }

    pub fn view(&self) -> &FeedView {
        self.views.get(self.active)
    }

    pub fn view_mut(&mut self) -> &mut FeedView {
        self.views.get_mut(self.active)
    }

    /// Replace a view with a fresh one and return the new generation.
    ///
    /// In-flight results for the old view carry the old generation and are
    /// discarded when they arrive.
    pub fn remount(&mut self, kind: MediaKind) -> u64 {
        let generation = self.generations.get_mut(kind);
        *generation = generation.wrapping_add(1);
        let generation = *generation;

        *self.views.get_mut(kind) = FeedView::new(kind, self.config.view_settings(kind));
        *self.loading.get_mut(kind) = true;
        if kind == self.active {
            self.search_mode = false;
            self.search_input.clear();
        }
        tracing::debug!(kind = kind.name(), generation, "View remounted");
        generation
    }

    pub fn is_current(&self, kind: MediaKind, generation: u64) -> bool {
        *self.generations.get(kind) == generation
    }

    /// Scroll position of a view's list as the near-end check sees it.
    ///
    /// The list keeps the current row visible, so the window ends at the
    /// current row once it passes the first screen.
    pub fn scroll_metrics(&self, kind: MediaKind) -> ScrollMetrics {
        let view = self.views.get(kind);
        let rows = self.list_rows.max(1);
        let len = view.filtered().len();
        let top = self.list_top(kind);
        ScrollMetrics {
            offset: top as f64 * ROW_PX,
            viewport: rows.min(len.max(1)) as f64 * ROW_PX,
            content: len as f64 * ROW_PX,
        }
    }

    /// First visible list row for a view.
    pub fn list_top(&self, kind: MediaKind) -> usize {
        let rows = self.list_rows.max(1);
        match self.views.get(kind).current_index() {
            Some(index) if index >= rows => index + 1 - rows,
            _ => 0,
        }
    }

    // ========================================================================
    // Theme and Status
    // ========================================================================

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.palette = variant.palette();
        self.needs_redraw = true;
    }

    /// Dark → Light → Dark; returns the new variant.
    pub fn cycle_theme(&mut self) -> ThemeVariant {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.set_status(msg);
        self.status_is_error = true;
    }

    /// Drop the status message once it has expired. Returns true if cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                self.status_is_error = false;
                return true;
            }
        }
        false
    }

    pub fn sidebar_open(&self, section: SidebarSection) -> bool {
        self.sidebar.get(section)
    }

    pub fn any_loading(&self) -> bool {
        MediaKind::ALL
            .iter()
            .any(|&kind| *self.loading.get(kind) || self.views.get(kind).is_loading_more())
    }

    /// Forget finished task handles.
    pub fn prune_tasks(&mut self) {
        self.tasks.retain(|handle| !handle.is_finished());
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

/// In-flight fetches and growth timers must not outlive the event loop.
impl Drop for App {
    fn drop(&mut self) {
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
    }
}
