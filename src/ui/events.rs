//! Application event handling.
//!
//! Processes events posted by background tasks and by the router: dataset
//! load results, token change notifications and hover timer expiry. Each one
//! runs to completion before the next is taken off the queue.

use crate::app::{App, AppEvent};

/// Apply one event to the application state.
pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::CatalogLoaded(Ok(index)) => app.install_catalog(index),
        AppEvent::CatalogLoaded(Err(e)) => app.fail_load(e),
        AppEvent::TokenChanged(token) => app.on_token_changed(&token),
        AppEvent::HoverExpired {
            generation,
            seq,
            card,
        } => app.on_hover_expired(generation, seq, card),
    }
}
