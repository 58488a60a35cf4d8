//! Media feed navigation and filtering engine.
//!
//! Data flows leaf-first:
//!
//! - [`loader`] - Maps provider records into items and grows the collection
//! - [`filter`] - Category and search filtering over the loaded items
//! - [`navigator`] - Wraparound position over the filtered list, with debounced input
//! - [`interaction`] - Ephemeral like/save flags bound to the current item
//! - [`overlay`] - Single-item modal with skip-to-next
//! - [`view`] - [`FeedView`], which ties the pieces together per explorer view
//!
//! Everything here is synchronous except fetching and the growth delay,
//! which [`FeedLoader::load_initial`] and [`run_growth`] expose as futures.

mod clock;
mod filter;
mod interaction;
mod loader;
mod navigator;
mod overlay;
mod view;

pub use clock::{Clock, CooldownGate, ManualClock, TokioClock};
pub use filter::{
    apply_filters, filter_by_category, matches_category, matches_search, normalize_category,
    Category,
};
pub use interaction::InteractionState;
pub use loader::{run_growth, FeedLoader, GrowthOutcome, GrowthTicket, DEFAULT_GROWTH_DELAY};
pub use navigator::{NavInput, NavSettings, Navigator, Position};
pub use overlay::Overlay;
pub use view::{FeedView, ScrollMetrics, ViewSettings};
