use crate::media::MediaItem;

use super::interaction::InteractionState;

/// Single-item modal view over the filtered collection.
///
/// The overlay never caches an index: [`Overlay::skip`] re-derives the
/// position of the open item from whatever list it is handed, so a list
/// that changed underneath it closes the overlay instead of navigating
/// into an item that no longer exists.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    open: Option<MediaItem>,
    interaction: InteractionState,
}

impl Overlay {
    pub fn item(&self) -> Option<&MediaItem> {
        self.open.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionState {
        &mut self.interaction
    }

    pub fn open(&mut self, item: MediaItem) {
        tracing::debug!(id = %item.id, "Overlay opened");
        self.interaction.rebind(Some(&item.id));
        self.open = Some(item);
    }

    pub fn close(&mut self) {
        if self.open.take().is_some() {
            tracing::debug!("Overlay closed");
        }
        self.interaction.rebind(None);
    }

    /// Move to the item after the open one in `filtered`.
    ///
    /// Closes the overlay when the open item is last, or is no longer in
    /// `filtered`. Returns the newly open item, if any.
    pub fn skip(&mut self, filtered: &[MediaItem]) -> Option<&MediaItem> {
        let open_id = self.open.as_ref()?.id.as_str();
        let next = filtered
            .iter()
            .position(|item| item.id == open_id)
            .and_then(|idx| filtered.get(idx + 1))
            .cloned();

        match next {
            Some(item) => self.open(item),
            None => self.close(),
        }
        self.open.as_ref()
    }
}
