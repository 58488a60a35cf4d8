/// Ephemeral like/save flags for whichever item is currently displayed.
///
/// Bound to one item id at a time. Binding a different id clears both
/// flags, so nothing is remembered across items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    bound: Option<String>,
    liked: bool,
    saved: bool,
}

impl InteractionState {
    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    /// Id of the item these flags belong to.
    pub fn bound_id(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    /// Bind to `id`, clearing both flags when it differs from the bound id.
    pub fn rebind(&mut self, id: Option<&str>) {
        if id == self.bound.as_deref() {
            return;
        }
        self.bound = id.map(str::to_string);
        self.liked = false;
        self.saved = false;
    }

    /// Flip `liked`. No-op when nothing is bound.
    pub fn toggle_liked(&mut self) -> bool {
        if self.bound.is_some() {
            self.liked = !self.liked;
        }
        self.liked
    }

    /// Flip `saved`. No-op when nothing is bound.
    pub fn toggle_saved(&mut self) -> bool {
        if self.bound.is_some() {
            self.saved = !self.saved;
        }
        self.saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_flip() {
        let mut state = InteractionState::default();
        state.rebind(Some("a"));
        assert!(state.toggle_liked());
        assert!(state.toggle_saved());
        assert!(!state.toggle_liked());
        assert!(state.saved());
    }

    #[test]
    fn test_rebind_clears_flags() {
        let mut state = InteractionState::default();
        state.rebind(Some("a"));
        state.toggle_liked();
        state.toggle_saved();

        state.rebind(Some("b"));
        assert_eq!(state.bound_id(), Some("b"));
        assert!(!state.liked());
        assert!(!state.saved());

        // Returning to a previous item does not restore its flags
        state.rebind(Some("a"));
        assert!(!state.liked());
    }

    #[test]
    fn test_rebind_same_id_keeps_flags() {
        let mut state = InteractionState::default();
        state.rebind(Some("a"));
        state.toggle_liked();
        state.toggle_saved();

        state.rebind(Some("a"));
        assert!(state.liked());
        assert!(state.saved());

        state.rebind(None);
        state.rebind(Some("a"));
        assert!(!state.liked());
    }

    #[test]
    fn test_unbound_toggles_are_noops() {
        let mut state = InteractionState::default();
        assert!(!state.toggle_liked());
        assert!(!state.toggle_saved());
    }
}
