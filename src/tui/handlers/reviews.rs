//! Reviews view keys: selection, opening and copying map links, refresh.

use crossterm::event::{KeyCode, KeyEvent};
use std::time::Duration;

use super::super::app::App;
use super::super::constants::TOAST_MS;
use super::{Pending, Services, refresh_reviews};

pub(super) fn handle_reviews_key(
    key: KeyEvent,
    app: &mut App,
    services: &Services,
    pending: &mut Pending,
) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.reviews.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.reviews.select_next(),
        KeyCode::Enter | KeyCode::Char('o') => open_selected(app),
        KeyCode::Char('c') => copy_selected(app),
        KeyCode::Char('r') => refresh_reviews(app, services, pending),
        _ => {}
    }
}

fn selected_link(app: &App) -> Option<String> {
    app.reviews
        .selected()
        .filter(|p| p.has_link())
        .map(|p| p.maps_link.clone())
}

fn toast(app: &mut App, text: &str) {
    app.show_toast(text, Duration::from_millis(TOAST_MS));
}

fn open_selected(app: &mut App) {
    let Some(link) = selected_link(app) else {
        toast(app, "No map link");
        return;
    };
    match opener::open(&link) {
        Ok(()) => toast(app, "Opened in browser"),
        Err(e) => {
            log::warn!("Failed to open {}: {}", link, e);
            toast(app, "Could not open browser");
        }
    }
}

fn copy_selected(app: &mut App) {
    let Some(link) = selected_link(app) else {
        toast(app, "No map link");
        return;
    };
    if arboard::Clipboard::new()
        .and_then(|mut c| c.set_text(link))
        .is_ok()
    {
        toast(app, "Copied");
    } else {
        toast(app, "Clipboard unavailable");
    }
}
