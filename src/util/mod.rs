//! Text helpers shared by the engine and the TUI.
//!
//! - **Width-aware truncation** for list rows and titles
//! - **Character previews** for collapsed descriptions
//! - **Control-character stripping** for feed-supplied text

mod text;

pub use text::{display_width, preview_chars, strip_control_chars, truncate_to_width};

/// Maximum allowed search term length
pub const MAX_SEARCH_TERM_LENGTH: usize = 256;
