//! Background event handling.
//!
//! Applies load and growth results to their view, unless the view has been
//! remounted since the task started.

use crate::app::{App, AppEvent};

pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::InitialLoaded {
            kind,
            generation,
            result,
        } => {
            if !app.is_current(kind, generation) {
                tracing::debug!(kind = kind.name(), generation, "Discarding stale initial load");
                return;
            }
            *app.loading.get_mut(kind) = false;

            match result {
                Ok(records) => {
                    let received = records.len();
                    let kept = app.views.get_mut(kind).apply_initial(records);
                    tracing::debug!(kind = kind.name(), received, kept, "Initial load applied");
                    if kept == 0 {
                        app.set_status(format!("No {} available", kind.name().to_lowercase()));
                    }
                }
                Err(e) => {
                    tracing::warn!(kind = kind.name(), error = %e, "Initial load failed");
                    app.set_error(format!("Failed to load {}: {}", kind.name().to_lowercase(), e));
                }
            }
        }

        AppEvent::GrowthLoaded {
            kind,
            generation,
            ticket,
            result,
        } => {
            if !app.is_current(kind, generation) {
                tracing::debug!(kind = kind.name(), generation, page = ticket.page, "Discarding stale growth");
                return;
            }

            let failure = result.as_ref().err().map(ToString::to_string);
            let appended = app.views.get_mut(kind).complete_growth(ticket, result);
            if let Some(error) = failure {
                app.set_error(format!("Could not load more: {}", error));
            } else if appended > 0 {
                app.set_status(format!("Loaded {} more", appended));
            }
        }

        AppEvent::TaskPanicked { task, error } => {
            app.set_error(format!("Internal error in {}: {}", task, error));
        }
    }
}
