//! Persisted user preferences: sidebar section visibility and theme choice.
//!
//! Values live in a string key-value store. Sidebar flags are JSON booleans
//! under `sidebar.*`; anything absent or unparseable reads as `false`.
//! Reads happen once at startup, writes go straight through to the store.
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use crate::storage::{Database, DatabaseError};

/// Key holding the persisted theme variant name.
pub const THEME_KEY: &str = "theme";

// ============================================================================
// PreferenceStore
// ============================================================================

/// String key-value storage for preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, DatabaseError>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), DatabaseError>> + Send;
}

impl PreferenceStore for Database {
    async fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        self.get_preference(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.set_preference(key, value).await
    }
}

/// Process-local store for tests and embedders without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// Sidebar Preferences
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarSection {
    Explore,
    Likes,
    Saved,
}

impl SidebarSection {
    pub const ALL: [SidebarSection; 3] = [Self::Explore, Self::Likes, Self::Saved];

    pub fn key(self) -> &'static str {
        match self {
            Self::Explore => "sidebar.explore",
            Self::Likes => "sidebar.likes",
            Self::Saved => "sidebar.saved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Explore => "Explore",
            Self::Likes => "Likes",
            Self::Saved => "Saved",
        }
    }
}

/// Which collapsible sidebar sections are expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarPreferences {
    pub explore: bool,
    pub likes: bool,
    pub saved: bool,
}

impl SidebarPreferences {
    /// Read all three flags. Store errors degrade to `false` with a warning.
    pub async fn load<S: PreferenceStore>(store: &S) -> Self {
        let mut prefs = Self::default();
        for section in SidebarSection::ALL {
            let value = match store.get(section.key()).await {
                Ok(raw) => raw.as_deref().map(parse_flag).unwrap_or(false),
                Err(e) => {
                    tracing::warn!(key = section.key(), error = %e, "Failed to read preference");
                    false
                }
            };
            *prefs.flag_mut(section) = value;
        }
        prefs
    }

    pub fn get(&self, section: SidebarSection) -> bool {
        match section {
            SidebarSection::Explore => self.explore,
            SidebarSection::Likes => self.likes,
            SidebarSection::Saved => self.saved,
        }
    }

    fn flag_mut(&mut self, section: SidebarSection) -> &mut bool {
        match section {
            SidebarSection::Explore => &mut self.explore,
            SidebarSection::Likes => &mut self.likes,
            SidebarSection::Saved => &mut self.saved,
        }
    }

    /// Set one flag and persist it. A failed write is logged; the in-memory
    /// value still changes.
    pub async fn save<S: PreferenceStore>(
        &mut self,
        store: &S,
        section: SidebarSection,
        value: bool,
    ) {
        *self.flag_mut(section) = value;
        let encoded = if value { "true" } else { "false" };
        if let Err(e) = store.set(section.key(), encoded).await {
            tracing::warn!(key = section.key(), error = %e, "Failed to persist preference");
        }
    }

    /// Flip one flag, persist it, and return the new value.
    pub async fn toggle<S: PreferenceStore>(&mut self, store: &S, section: SidebarSection) -> bool {
        let value = !self.get(section);
        self.save(store, section, value).await;
        value
    }
}

/// JSON boolean decoding; anything else (including `"1"` or `"\"true\""`) is `false`.
fn parse_flag(raw: &str) -> bool {
    matches!(serde_json::from_str::<serde_json::Value>(raw), Ok(serde_json::Value::Bool(true)))
}

// ============================================================================
// Theme
// ============================================================================

/// Persisted theme name, falling back to `default` when unset or unreadable.
pub async fn load_theme<S: PreferenceStore>(store: &S, default: &str) -> String {
    match store.get(THEME_KEY).await {
        Ok(Some(name)) if !name.trim().is_empty() => name,
        Ok(_) => default.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read theme preference");
            default.to_string()
        }
    }
}

pub async fn save_theme<S: PreferenceStore>(store: &S, name: &str) {
    if let Err(e) = store.set(THEME_KEY, name).await {
        tracing::warn!(theme = %name, error = %e, "Failed to persist theme preference");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Store whose every operation fails.
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, DatabaseError> {
            Err(DatabaseError::InstanceLocked)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), DatabaseError> {
            Err(DatabaseError::InstanceLocked)
        }
    }

    #[tokio::test]
    async fn test_absent_flags_default_false() {
        let store = MemoryStore::new();
        let prefs = SidebarPreferences::load(&store).await;
        assert_eq!(prefs, SidebarPreferences::default());
    }

    #[tokio::test]
    async fn test_load_json_booleans() {
        let store = MemoryStore::new();
        store.set("sidebar.explore", "true").await.unwrap();
        store.set("sidebar.likes", "false").await.unwrap();
        store.set("sidebar.saved", " true ").await.unwrap();

        let prefs = SidebarPreferences::load(&store).await;
        assert_eq!(
            prefs,
            SidebarPreferences {
                explore: true,
                likes: false,
                saved: true,
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_values_read_false() {
        let store = MemoryStore::new();
        store.set("sidebar.explore", "yes").await.unwrap();
        store.set("sidebar.likes", "1").await.unwrap();
        store.set("sidebar.saved", "\"true\"").await.unwrap();

        let prefs = SidebarPreferences::load(&store).await;
        assert_eq!(prefs, SidebarPreferences::default());
    }

    #[tokio::test]
    async fn test_toggle_persists_json() {
        let store = MemoryStore::new();
        let mut prefs = SidebarPreferences::load(&store).await;

        assert!(prefs.toggle(&store, SidebarSection::Likes).await);
        assert_eq!(
            store.get("sidebar.likes").await.unwrap(),
            Some("true".to_string())
        );

        assert!(!prefs.toggle(&store, SidebarSection::Likes).await);
        assert_eq!(
            store.get("sidebar.likes").await.unwrap(),
            Some("false".to_string())
        );
    }

    #[tokio::test]
    async fn test_round_trip_through_database() {
        let db = Database::open(":memory:").await.unwrap();
        let mut prefs = SidebarPreferences::load(&db).await;
        prefs.save(&db, SidebarSection::Saved, true).await;
        prefs.save(&db, SidebarSection::Explore, true).await;

        let reloaded = SidebarPreferences::load(&db).await;
        assert_eq!(
            reloaded,
            SidebarPreferences {
                explore: true,
                likes: false,
                saved: true,
            }
        );
    }

    #[tokio::test]
    async fn test_write_failure_still_flips_in_memory() {
        let mut prefs = SidebarPreferences::default();
        assert!(prefs.toggle(&BrokenStore, SidebarSection::Explore).await);
        assert!(prefs.explore);
    }

    #[tokio::test]
    async fn test_read_failure_defaults_false() {
        let prefs = SidebarPreferences::load(&BrokenStore).await;
        assert_eq!(prefs, SidebarPreferences::default());
    }

    #[tokio::test]
    async fn test_theme_fallback_and_persist() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store, "dark").await, "dark");

        save_theme(&store, "light").await;
        assert_eq!(load_theme(&store, "dark").await, "light");
        assert_eq!(load_theme(&BrokenStore, "dark").await, "dark");
    }
}
