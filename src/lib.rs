//! reelview: a terminal explorer for photo, video, and reel feeds.
//!
//! The [`engine`] is UI-independent: it loads media through a
//! [`media::MediaProvider`], filters by category and title, and walks the
//! result with debounced, wraparound navigation. The [`ui`] module drives
//! one engine view per media kind from a ratatui event loop.

pub mod app;
pub mod config;
pub mod engine;
pub mod media;
pub mod preferences;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
