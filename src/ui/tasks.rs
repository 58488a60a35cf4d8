//! Background task spawning for feed loads and growth.
//!
//! Tasks own clones of what they need and report back through the
//! `AppEvent` channel, tagged with the view generation they were spawned for.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::mpsc;

use crate::app::{App, AppEvent};
use crate::engine::run_growth;
use crate::media::{MediaKind, MediaProvider};

/// Run a future, converting a panic into its message.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future).catch_unwind().await.map_err(|panic| {
        panic
            .downcast_ref::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string())
    })
}

async fn report_panic(tx: &mpsc::Sender<AppEvent>, task: &'static str, error: String) {
    tracing::error!(task, error = %error, "Background task panicked");
    if tx.send(AppEvent::TaskPanicked { task, error }).await.is_err() {
        tracing::debug!(task, "Event receiver dropped before panic report");
    }
}

/// Make `kind` the active view and mount it fresh.
pub(super) fn switch_view(app: &mut App, kind: MediaKind, tx: &mpsc::Sender<AppEvent>) {
    if app.active == kind && *app.generations.get(kind) > 0 {
        return;
    }
    app.active = kind;
    mount_view(app, kind, tx);
}

/// Remount a view and start its initial load.
pub fn mount_view(app: &mut App, kind: MediaKind, tx: &mpsc::Sender<AppEvent>) {
    let generation = app.remount(kind);
    let source = app.sources.get(kind).clone();
    let tx = tx.clone();

    tracing::info!(kind = kind.name(), source = %source.describe(), generation, "Loading feed");

    app.prune_tasks();
    app.tasks.push(tokio::spawn(async move {
        match catch_task_panic(async { source.fetch().await }).await {
            Ok(result) => {
                let event = AppEvent::InitialLoaded {
                    kind,
                    generation,
                    result,
                };
                if tx.send(event).await.is_err() {
                    tracing::debug!(kind = kind.name(), "Event receiver dropped before initial load");
                }
            }
            Err(error) => report_panic(&tx, "initial_load", error).await,
        }
    }));
}

/// Check the active view's scroll position and start growth when near the
/// end. Returns true if a growth task was spawned.
pub(super) fn maybe_spawn_growth(app: &mut App, tx: &mpsc::Sender<AppEvent>) -> bool {
    let kind = app.active;
    let metrics = app.scroll_metrics(kind);
    let Some(ticket) = app.views.get_mut(kind).on_scroll(metrics) else {
        return false;
    };

    let generation = *app.generations.get(kind);
    let delay = app.views.get(kind).settings().growth_delay;
    let source = app.sources.get(kind).clone();
    let tx = tx.clone();

    tracing::debug!(kind = kind.name(), page = ticket.page, generation, "Spawning growth task");

    app.prune_tasks();
    app.tasks.push(tokio::spawn(async move {
        match catch_task_panic(run_growth(&source, ticket, delay)).await {
            Ok(result) => {
                let event = AppEvent::GrowthLoaded {
                    kind,
                    generation,
                    ticket,
                    result,
                };
                if tx.send(event).await.is_err() {
                    tracing::debug!(kind = kind.name(), "Event receiver dropped before growth");
                }
            }
            Err(error) => report_panic(&tx, "growth", error).await,
        }
    }));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catch_task_panic_passes_value() {
        assert_eq!(catch_task_panic(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_catch_task_panic_reports_message() {
        let result = catch_task_panic(async {
            if true {
                panic!("boom");
            }
        })
        .await;
        assert_eq!(result, Err("boom".to_string()));
    }
}
