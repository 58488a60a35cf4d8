//! Media records and the providers that supply them.
//!
//! - [`video_id`] - Video identifier extraction and embed URLs
//! - [`item`] - Raw provider records, normalized [`MediaItem`]s, and [`MediaKind`]
//! - [`provider`] - HTTP, file, and in-memory feed sources

mod item;
mod provider;
mod video_id;

pub use item::{GrowthPolicy, MediaItem, MediaKind, Metrics, RawRecord};
pub use provider::{
    decode_records, FileProvider, HttpProvider, MediaProvider, ProviderError, Source,
    StaticProvider,
};
pub use video_id::{embed_url, extract_video_id};
