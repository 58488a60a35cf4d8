use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;

use crate::media::{
    GrowthPolicy, MediaItem, MediaKind, MediaProvider, Metrics, ProviderError, RawRecord,
};

/// Simulated latency before a growth operation completes.
pub const DEFAULT_GROWTH_DELAY: Duration = Duration::from_millis(800);

/// Proof that a growth operation was started. Only one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthTicket {
    /// Page this growth produces (first growth is page 2).
    pub page: u32,
    pub policy: GrowthPolicy,
}

/// What a growth task produced.
///
/// `Ok(Some(records))` for a refetch, `Ok(None)` for a duplicate.
pub type GrowthOutcome = Result<Option<Vec<RawRecord>>, ProviderError>;

/// Owns the loaded collection for one view and grows it on demand.
pub struct FeedLoader {
    kind: MediaKind,
    items: Vec<MediaItem>,
    ids: HashSet<String>,
    page: u32,
    loading_more: bool,
    shuffle: bool,
    rng: StdRng,
}

impl FeedLoader {
    pub fn new(kind: MediaKind) -> Self {
        Self::with_rng(kind, StdRng::from_entropy())
    }

    /// Deterministic ids, metrics, and shuffles for tests.
    pub fn with_seed(kind: MediaKind, seed: u64) -> Self {
        Self::with_rng(kind, StdRng::seed_from_u64(seed))
    }

    fn with_rng(kind: MediaKind, rng: StdRng) -> Self {
        Self {
            kind,
            items: Vec::new(),
            ids: HashSet::new(),
            page: 1,
            loading_more: false,
            shuffle: kind == MediaKind::Video,
            rng,
        }
    }

    /// Enable or disable shuffling of the initial batch.
    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    // ========================================================================
    // Initial Load
    // ========================================================================

    /// Fetch and map the first batch.
    ///
    /// On failure the collection is left as it was.
    pub async fn load_initial<P: MediaProvider>(
        &mut self,
        provider: &P,
    ) -> Result<usize, ProviderError> {
        match provider.fetch().await {
            Ok(records) => Ok(self.apply_initial(records)),
            Err(e) => {
                tracing::warn!(kind = self.kind.name(), error = %e, "Initial feed load failed");
                Err(e)
            }
        }
    }

    /// Replace the collection with a freshly fetched first batch.
    ///
    /// Records without a usable primary URL are dropped. Returns the number
    /// of items kept.
    pub fn apply_initial(&mut self, records: Vec<RawRecord>) -> usize {
        let total = records.len();
        let mut usable: Vec<(RawRecord, String)> = records
            .into_iter()
            .filter_map(|record| {
                let url = self.kind.primary_url(&record)?;
                Some((record, url))
            })
            .collect();

        if usable.len() < total {
            tracing::debug!(
                kind = self.kind.name(),
                dropped = total - usable.len(),
                "Records without a usable media URL dropped"
            );
        }

        if self.shuffle {
            usable.shuffle(&mut self.rng);
        }

        self.items.clear();
        self.ids.clear();
        self.page = 1;

        for (record, url) in usable {
            let base = record.source_id().unwrap_or_else(|| url.clone());
            let id = self.unique_initial_id(&base);
            let item = self.map_record(&record, url, id);
            self.insert(item);
        }

        tracing::info!(kind = self.kind.name(), items = self.items.len(), "Feed loaded");
        self.items.len()
    }

    // ========================================================================
    // Growth
    // ========================================================================

    /// Start a growth operation unless one is already in flight.
    ///
    /// Triggers that arrive while loading are dropped, not queued.
    pub fn try_begin_growth(&mut self) -> Option<GrowthTicket> {
        if self.loading_more {
            tracing::trace!(kind = self.kind.name(), "Growth already in flight, ignoring");
            return None;
        }
        self.loading_more = true;
        self.page += 1;
        let ticket = GrowthTicket {
            page: self.page,
            policy: self.kind.growth_policy(),
        };
        tracing::debug!(kind = self.kind.name(), page = ticket.page, "Growth started");
        Some(ticket)
    }

    /// Apply a finished growth operation and clear `loading_more`.
    ///
    /// Returns the number of items appended. A failed refetch appends
    /// nothing. A ticket that does not match the in-flight operation is
    /// ignored.
    pub fn complete_growth(&mut self, ticket: GrowthTicket, outcome: GrowthOutcome) -> usize {
        if !self.loading_more || ticket.page != self.page {
            tracing::debug!(
                kind = self.kind.name(),
                page = ticket.page,
                "Stale growth result ignored"
            );
            return 0;
        }
        self.loading_more = false;

        let before = self.items.len();
        match (ticket.policy, outcome) {
            (_, Err(e)) => {
                tracing::warn!(kind = self.kind.name(), page = ticket.page, error = %e, "Growth fetch failed");
            }
            (GrowthPolicy::Refetch, Ok(Some(records))) => {
                for record in records {
                    let Some(url) = self.kind.primary_url(&record) else {
                        continue;
                    };
                    let base = record.source_id().unwrap_or_else(|| url.clone());
                    let id = self.unique_page_id(&base, ticket.page);
                    let item = self.map_record(&record, url, id);
                    self.insert(item);
                }
            }
            (GrowthPolicy::Refetch, Ok(None)) | (GrowthPolicy::Duplicate, _) => {
                let copies: Vec<MediaItem> = self.items.clone();
                for mut item in copies {
                    item.id = self.unique_page_id(base_id(&item.id), ticket.page);
                    self.insert(item);
                }
            }
        }

        let appended = self.items.len() - before;
        tracing::debug!(
            kind = self.kind.name(),
            page = ticket.page,
            appended,
            total = self.items.len(),
            "Growth complete"
        );
        appended
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn insert(&mut self, item: MediaItem) {
        self.ids.insert(item.id.clone());
        self.items.push(item);
    }

    fn unique_initial_id(&self, base: &str) -> String {
        if !self.ids.contains(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}-dup{n}"))
            .find(|candidate| !self.ids.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    fn unique_page_id(&mut self, base: &str, page: u32) -> String {
        loop {
            let candidate = format!("{}-page{}-{:08x}", base, page, self.rng.gen::<u32>());
            if !self.ids.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn map_record(&mut self, record: &RawRecord, url: String, id: String) -> MediaItem {
        let metrics = match (record.likes, record.comments) {
            (None, None) if self.kind == MediaKind::Photo => Some(Metrics {
                likes: self.rng.gen_range(10..210),
                comments: self.rng.gen_range(0..30),
            }),
            (None, None) => None,
            (likes, comments) => Some(Metrics {
                likes: likes.unwrap_or(0),
                comments: comments.unwrap_or(0),
            }),
        };

        let avatar_url = record.avatar.clone().or_else(|| {
            (self.kind == MediaKind::Photo).then(|| {
                format!(
                    "https://randomuser.me/api/portraits/men/{}.jpg",
                    self.rng.gen_range(1..=90)
                )
            })
        });

        MediaItem {
            id,
            source_url: url,
            title: record.title.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            category: record.category_label(),
            metrics,
            avatar_url,
        }
    }
}

/// Strip a trailing `-page{n}-{hex8}` qualifier so duplicated ids stay
/// short. Ids that merely contain `-page` are left alone.
fn base_id(id: &str) -> &str {
    let Some((head, hex)) = id.rsplit_once('-') else {
        return id;
    };
    if hex.len() != 8 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return id;
    }
    match head.rsplit_once("-page") {
        Some((base, page)) if !page.is_empty() && page.bytes().all(|b| b.is_ascii_digit()) => {
            base
        }
        _ => id,
    }
}

/// Run the suspended half of a growth operation: wait out the simulated
/// delay, then refetch if the policy asks for it.
pub async fn run_growth<P: MediaProvider>(
    provider: &P,
    ticket: GrowthTicket,
    delay: Duration,
) -> GrowthOutcome {
    tokio::time::sleep(delay).await;
    match ticket.policy {
        GrowthPolicy::Refetch => provider.fetch().await.map(Some),
        GrowthPolicy::Duplicate => Ok(None),
    }
}
