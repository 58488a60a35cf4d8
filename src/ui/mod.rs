//! Terminal user interface for the photo, video, and reel explorers.
//!
//! - `loop_runner` - Event loop and terminal setup
//! - `input` - Key and mouse handling
//! - `events` - Background result handling
//! - `tasks` - Spawning feed loads and growth
//! - `render` - Layout, header, and category bar
//! - `feed` - Item list and detail card
//! - `sidebar` - Collapsible navigation sections
//! - `overlay` - Single-item modal
//! - `status` - Status bar

mod events;
mod feed;
mod input;
mod loop_runner;
mod overlay;
mod render;
mod sidebar;
mod status;
mod tasks;

pub use loop_runner::{run, Action};
pub use tasks::mount_view;
