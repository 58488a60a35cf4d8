//! Integration tests for persisted preferences across database reopen.

use pretty_assertions::assert_eq;
use reelview::preferences::{
    load_theme, save_theme, MemoryStore, PreferenceStore, SidebarPreferences, SidebarSection,
};
use reelview::storage::Database;

fn temp_db_path(name: &str) -> (std::path::PathBuf, String) {
    let dir = std::env::temp_dir().join(format!("reelview_prefs_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("reelview.db").to_str().unwrap().to_string();
    (dir, path)
}

#[tokio::test]
async fn test_sidebar_flags_survive_reopen() {
    let (dir, path) = temp_db_path("sidebar");

    {
        let db = Database::open(&path).await.unwrap();
        let mut prefs = SidebarPreferences::load(&db).await;
        assert_eq!(prefs, SidebarPreferences::default());
        prefs.toggle(&db, SidebarSection::Explore).await;
        prefs.toggle(&db, SidebarSection::Saved).await;
    }

    let db = Database::open(&path).await.unwrap();
    let prefs = SidebarPreferences::load(&db).await;
    assert_eq!(
        prefs,
        SidebarPreferences {
            explore: true,
            likes: false,
            saved: true,
        }
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_foreign_values_read_as_false() {
    let db = Database::open(":memory:").await.unwrap();
    db.set_preference("sidebar.explore", "{\"open\": true}").await.unwrap();
    db.set_preference("sidebar.likes", "").await.unwrap();
    db.set_preference("sidebar.saved", "null").await.unwrap();

    assert_eq!(SidebarPreferences::load(&db).await, SidebarPreferences::default());
}

#[tokio::test]
async fn test_reset_clears_flags_and_theme() {
    let db = Database::open(":memory:").await.unwrap();
    let mut prefs = SidebarPreferences::default();
    prefs.save(&db, SidebarSection::Likes, true).await;
    save_theme(&db, "light").await;

    assert_eq!(db.delete_preferences_by_prefix("").await.unwrap(), 2);
    assert_eq!(SidebarPreferences::load(&db).await, SidebarPreferences::default());
    assert_eq!(load_theme(&db, "dark").await, "dark");
}

#[tokio::test]
async fn test_memory_store_last_write_wins() {
    let store = MemoryStore::new();
    let mut first = SidebarPreferences::default();
    let mut second = SidebarPreferences::default();

    first.save(&store, SidebarSection::Likes, true).await;
    second.save(&store, SidebarSection::Likes, false).await;

    assert_eq!(store.get("sidebar.likes").await.unwrap(), Some("false".to_string()));
}
