//! End-to-end tests for the feed engine: load, filter, navigate, overlay, grow.
//!
//! Views are built from in-memory records or a mocked HTTP feed; time-based
//! behavior runs against a manual clock or tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use reelview::engine::{
    run_growth, Category, FeedLoader, FeedView, ManualClock, NavInput, ScrollMetrics,
    ViewSettings,
};
use reelview::media::{extract_video_id, HttpProvider, MediaKind, RawRecord, StaticProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn photo(id: u32, tag: &str) -> RawRecord {
    RawRecord {
        id: Some(serde_json::json!(id)),
        image_url: Some(format!("https://img.example.com/{}.jpg", id)),
        title: Some(format!("Photo {}", id)),
        tag: Some(tag.to_string()),
        ..RawRecord::default()
    }
}

fn reel(id: u32, url: &str) -> RawRecord {
    RawRecord {
        id: Some(serde_json::json!(id)),
        reel_url: Some(url.to_string()),
        title: Some(format!("Reel {}", id)),
        ..RawRecord::default()
    }
}

fn ids(view: &FeedView) -> Vec<&str> {
    view.filtered().iter().map(|i| i.id.as_str()).collect()
}

fn gaming_view() -> FeedView {
    let mut view = FeedView::new(MediaKind::Photo, ViewSettings::default());
    view.apply_initial(vec![photo(1, "Gaming"), photo(2, "Sports"), photo(3, "Gaming")]);
    view
}

// ============================================================================
// Filter + Navigation
// ============================================================================

#[test]
fn test_gaming_filter_then_next_wraps() {
    let mut view = gaming_view();

    view.select_category(Category::Gaming);
    assert_eq!(ids(&view), vec!["1", "3"]);
    assert_eq!(view.current_index(), Some(0));

    assert_eq!(view.next(), Some(1));
    assert_eq!(view.current_item().map(|i| i.id.as_str()), Some("3"));
    assert_eq!(view.next(), Some(0));
    assert_eq!(view.current_item().map(|i| i.id.as_str()), Some("1"));
}

#[test]
fn test_empty_category_leaves_navigator_empty() {
    let mut view = gaming_view();
    view.select_category(Category::Fashion);

    assert!(view.filtered().is_empty());
    assert_eq!(view.current_index(), None);
    assert_eq!(view.next(), None);
    assert_eq!(view.skip(), None);
    assert!(!view.toggle_liked());
}

#[test]
fn test_overlay_skip_on_last_item_closes() {
    let mut view = gaming_view();
    view.select_category(Category::Gaming);

    let third = view.filtered()[1].clone();
    view.open_item(third);
    assert_eq!(view.overlay_item().map(|i| i.id.as_str()), Some("3"));

    assert!(view.skip_overlay().is_none());
    assert!(!view.overlay().is_open());
}

#[test]
fn test_overlay_skip_on_stale_item_closes() {
    let mut view = gaming_view();
    let sports = view.filtered()[1].clone();
    view.open_item(sports);

    // The open item drops out of the filtered list underneath the overlay
    view.select_category(Category::Gaming);
    assert!(view.skip_overlay().is_none());
    assert!(!view.overlay().is_open());
}

#[test]
fn test_interaction_resets_on_every_item_change() {
    let mut view = gaming_view();
    view.toggle_liked();
    view.toggle_saved();
    assert!(view.interaction().liked() && view.interaction().saved());

    view.next();
    assert!(!view.interaction().liked() && !view.interaction().saved());

    view.open_current();
    view.toggle_liked();
    assert!(view.overlay().interaction().liked());
    view.skip_overlay();
    assert!(!view.overlay().interaction().liked());
}

#[test]
fn test_wheel_cooldown_with_manual_clock() {
    let clock = Arc::new(ManualClock::new());
    let mut view = FeedView::with_parts(
        MediaKind::Reel,
        ViewSettings::default(),
        FeedLoader::with_seed(MediaKind::Reel, 7),
        clock.clone(),
    );
    view.apply_initial(vec![
        reel(1, "https://youtube.com/shorts/aaaaaaaaaaa"),
        reel(2, "https://youtube.com/shorts/bbbbbbbbbbb"),
        reel(3, "https://youtube.com/shorts/ccccccccccc"),
    ]);

    // Inside the dead zone: nothing happens
    assert_eq!(view.handle_input(NavInput::Wheel(30.0)), None);
    assert_eq!(view.handle_input(NavInput::Wheel(31.0)), Some(1));
    // Cooling down
    assert_eq!(view.handle_input(NavInput::Wheel(120.0)), None);
    // Keyboard has its own gate
    assert_eq!(view.handle_input(NavInput::KeyDown), Some(2));

    clock.advance(Duration::from_millis(600));
    assert_eq!(view.handle_input(NavInput::Wheel(-45.0)), Some(1));
}

#[test]
fn test_reel_player_urls() {
    let mut view = FeedView::new(MediaKind::Reel, ViewSettings::default());
    view.apply_initial(vec![
        reel(1, "https://youtu.be/aaaaaaaaaaa"),
        reel(2, "https://www.youtube.com/watch?v=bbbbbbbbbbb"),
    ]);

    assert_eq!(
        view.player_url().as_deref(),
        Some("https://www.youtube.com/embed/aaaaaaaaaaa?autoplay=1&mute=1&playsinline=1")
    );
    view.next();
    assert_eq!(
        view.player_url().as_deref(),
        Some("https://www.youtube.com/embed/bbbbbbbbbbb?autoplay=1&mute=0&playsinline=1")
    );
}

#[test]
fn test_equivalent_video_urls_share_id() {
    let expected = Some("dQw4w9WgXcQ".to_string());
    assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), expected);
    assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
    assert_eq!(extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), expected);
    assert_eq!(extract_video_id("https://example.com/video.mp4"), None);
    assert_eq!(extract_video_id(""), None);
}

// ============================================================================
// Growth
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_single_flight_growth_with_delay() {
    let provider = StaticProvider::new(vec![photo(1, "Gaming"), photo(2, "Sports")]);
    let mut view = FeedView::new(MediaKind::Photo, ViewSettings::default());
    view.load_initial(&provider).await.unwrap();

    let near_end = ScrollMetrics {
        offset: 0.0,
        viewport: 40.0,
        content: 40.0,
    };
    let ticket = view.on_scroll(near_end).expect("growth should start");
    assert!(view.is_loading_more());
    assert_eq!(view.on_scroll(near_end), None);

    let growth = tokio::spawn({
        let provider = provider.clone();
        async move { run_growth(&provider, ticket, Duration::from_millis(800)).await }
    });

    // Let the task register its sleep before moving time
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(799)).await;
    assert!(!growth.is_finished());
    tokio::time::advance(Duration::from_millis(1)).await;
    let outcome = growth.await.unwrap();

    assert_eq!(view.complete_growth(ticket, outcome), 2);
    assert!(!view.is_loading_more());
    assert_eq!(view.items().len(), 4);

    // Ids stay unique across pages
    let mut all: Vec<&str> = view.items().iter().map(|i| i.id.as_str()).collect();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), 4);

    // A fresh trigger is accepted again
    assert!(view.on_scroll(near_end).is_some());
}

#[tokio::test]
async fn test_reel_growth_duplicates_collection() {
    let mut view = FeedView::new(MediaKind::Reel, ViewSettings::default());
    view.apply_initial(vec![
        reel(1, "https://youtu.be/aaaaaaaaaaa"),
        reel(2, "https://youtu.be/bbbbbbbbbbb"),
    ]);

    let ticket = view
        .on_scroll(ScrollMetrics {
            offset: 20.0,
            viewport: 20.0,
            content: 40.0,
        })
        .unwrap();
    let outcome = run_growth(&StaticProvider::default(), ticket, Duration::ZERO).await;
    assert_eq!(view.complete_growth(ticket, outcome), 2);

    let titles: Vec<&str> = view.items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Reel 1", "Reel 2", "Reel 1", "Reel 2"]);
}

// ============================================================================
// HTTP provider
// ============================================================================

#[tokio::test]
async fn test_http_feed_skips_unusable_records() {
    let server = MockServer::start().await;
    let body = serde_json::json!([
        {"id": 1, "image_url": "https://img.example.com/1.jpg", "title": "Keyboard", "tag": "technology"},
        {"id": 2, "title": "No image"},
        "not an object",
        {"id": 3, "image_url": "https://img.example.com/3.jpg", "title": "Goal", "likes": "many"},
        {"id": 4, "image_url": "https://img.example.com/4.jpg", "title": "Untagged"}
    ]);
    Mock::given(method("GET"))
        .and(path("/photofeed.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HttpProvider::new(
        reqwest::Client::new(),
        format!("{}/photofeed.json", server.uri()),
    );
    let mut view = FeedView::new(MediaKind::Photo, ViewSettings::default());
    assert_eq!(view.load_initial(&provider).await.unwrap(), 3);
    assert_eq!(ids(&view), vec!["1", "3", "4"]);
    let goal = &view.filtered()[1];
    assert!(goal.metrics.is_some_and(|m| (10..210).contains(&m.likes)));

    view.select_category(Category::Technology);
    assert_eq!(ids(&view), vec!["1"]);
    assert_eq!(view.filtered()[0].category.as_deref(), Some("Technology"));
}

#[tokio::test]
async fn test_http_failure_keeps_existing_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut view = gaming_view();
    let provider = HttpProvider::new(reqwest::Client::new(), server.uri());
    assert!(view.load_initial(&provider).await.is_err());
    assert_eq!(ids(&view), vec!["1", "2", "3"]);
}
