use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::video_id::extract_video_id;

// ============================================================================
// Media Kind
// ============================================================================

/// The three explorer views. Each kind reads a different primary URL field
/// and grows its collection with a different policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
    Reel,
}

/// How a view grows its collection when the user scrolls near the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Fetch the source again and remap with page-qualified ids.
    Refetch,
    /// Append a copy of the in-memory collection with fresh ids.
    Duplicate,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Photo, MediaKind::Video, MediaKind::Reel];

    /// Human-readable name for tabs and status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Photo => "Photos",
            Self::Video => "Videos",
            Self::Reel => "Reels",
        }
    }

    pub fn growth_policy(self) -> GrowthPolicy {
        match self {
            Self::Photo => GrowthPolicy::Refetch,
            Self::Video | Self::Reel => GrowthPolicy::Duplicate,
        }
    }

    /// Distance from the end of the scrollable region that triggers growth.
    pub fn scroll_threshold(self) -> f64 {
        match self {
            Self::Photo | Self::Video => 40.0,
            Self::Reel => 10.0,
        }
    }

    /// Resolve the primary media URL of a record, or `None` if the record
    /// is unusable for this kind.
    pub fn primary_url(self, record: &RawRecord) -> Option<String> {
        fn usable(field: &Option<String>) -> Option<&str> {
            field.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }

        match self {
            Self::Photo => usable(&record.image_url).map(str::to_string),
            Self::Video => usable(&record.video_url)
                .filter(|url| extract_video_id(url).is_some())
                .map(str::to_string),
            Self::Reel => [&record.reel_url, &record.video_url]
                .into_iter()
                .filter_map(usable)
                .find(|url| extract_video_id(url).is_some())
                .map(str::to_string),
        }
    }
}

// ============================================================================
// Raw Record
// ============================================================================

/// One loosely-typed record from the media provider.
///
/// Every field is optional, and a field of the wrong JSON type decodes as
/// absent. Whether the record is usable is decided later from its URLs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    /// String or numeric identifier.
    pub id: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub video_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub reel_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub tag: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub likes: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub comments: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub avatar: Option<String>,
}

/// Decode any JSON value, keeping it only if it has the expected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl RawRecord {
    /// Source identifier rendered as a string, if present and non-empty.
    pub fn source_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Category label derived from `tag` (falling back to `category`) with
    /// the first character upper-cased.
    pub fn category_label(&self) -> Option<String> {
        let tag = [&self.tag, &self.category]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .map(str::trim)
            .find(|s| !s.is_empty())?;

        let mut chars = tag.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().chain(chars).collect())
    }
}

// ============================================================================
// Media Item
// ============================================================================

/// Synthetic engagement counters. Not authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub likes: u32,
    pub comments: u32,
}

/// A normalized photo, video, or reel.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Unique within the collection it was inserted into.
    pub id: String,
    pub source_url: String,
    pub title: String,
    pub description: String,
    /// `None` when the source carried no tag; only the "All" filter matches it.
    pub category: Option<String>,
    pub metrics: Option<Metrics>,
    pub avatar_url: Option<String>,
}

impl MediaItem {
    /// Category shown to the user. Untagged items display as "All".
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("All")
    }

    /// Video identifier for video and reel items.
    pub fn video_id(&self) -> Option<String> {
        extract_video_id(&self.source_url)
    }
}
