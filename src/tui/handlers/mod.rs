//! Event handlers for the TUI: keyboard input and background request results.

mod input;
mod reviews;
mod spawn;

use crossterm::event::{KeyEvent, KeyEventKind};
use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::itinerary;
use crate::core::llm::{ItineraryModel, PlannerError};
use crate::core::preferences::PreferenceSet;
use crate::core::reviews::{ReviewLookup, ReviewSet};
use crate::core::session::{ItineraryOutcome, PlannerSession};

use super::app::{Action, App, View};
use super::shortcuts::Shortcut;

/// Long-lived collaborators shared by every background request.
pub struct Services {
    pub model: Arc<dyn ItineraryModel>,
    pub session: Arc<PlannerSession>,
    pub lookup: ReviewLookup,
    pub concurrency: usize,
    pub rt: Arc<Runtime>,
}

/// Final result of a model request.
pub enum PlannerEvent {
    Preferences(Result<PreferenceSet, PlannerError>),
    Itinerary(Result<ItineraryOutcome, PlannerError>),
}

/// Holds receivers for a model request in progress (streamed content, final result).
pub struct PendingPlanner {
    pub stream_rx: mpsc::Receiver<String>,
    pub result_rx: mpsc::Receiver<PlannerEvent>,
    /// Token to cancel the in-flight request.
    pub cancel_token: CancellationToken,
}

/// Work started from the UI thread that has not reported back yet.
#[derive(Default)]
pub struct Pending {
    pub planner: Option<PendingPlanner>,
    pub reviews: Option<mpsc::Receiver<Vec<ReviewSet>>>,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Start the background work an [`Action`] asks for.
pub(crate) fn dispatch(action: Action, app: &mut App, services: &Services, pending: &mut Pending) {
    match action {
        Action::ExtractPreferences(text) => {
            pending.planner = Some(spawn::spawn_extract(services, text));
        }
        Action::Generate(prefs) => {
            pending.planner = Some(spawn::spawn_generate(services, prefs));
        }
        Action::Revise {
            current,
            request,
            prefs,
        } => {
            pending.planner = Some(spawn::spawn_revise(services, current, request, prefs));
        }
        Action::RefreshReviews => refresh_reviews(app, services, pending),
    }
}

/// Reload places from the store and start their review lookups.
pub(crate) fn refresh_reviews(app: &mut App, services: &Services, pending: &mut Pending) {
    let store = services.session.store();
    let records = store.load_or_empty();
    let places = itinerary::normalize_places(&records, services.session.policy());
    log::info!(
        "Reviews view: {} place(s) from {}",
        places.len(),
        store.path().display()
    );
    app.reviews.set_places(store.title(), places);
    pending.reviews = if app.reviews.loading {
        Some(spawn::spawn_reviews(services, app.reviews.places.clone()))
    } else {
        None
    };
}

/// Drain streamed chunks and finished results. Called once per frame.
pub(crate) fn poll_pending(app: &mut App, services: &Services, pending: &mut Pending) {
    let mut follow_up = None;
    if let Some(planner) = &pending.planner {
        while let Ok(chunk) = planner.stream_rx.try_recv() {
            app.append_draft(&chunk);
        }
        if let Ok(event) = planner.result_rx.try_recv() {
            follow_up = match event {
                PlannerEvent::Preferences(result) => app.on_preferences(result),
                PlannerEvent::Itinerary(result) => app.on_itinerary(result),
            };
            pending.planner = None;
        }
    }
    if let Some(action) = follow_up {
        dispatch(action, app, services, pending);
    }

    if let Some(rx) = &pending.reviews
        && let Ok(reviews) = rx.try_recv()
    {
        app.reviews.set_reviews(reviews);
        pending.reviews = None;
    }
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(
    key: KeyEvent,
    app: &mut App,
    services: &Services,
    pending: &mut Pending,
) -> HandleResult {
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    match Shortcut::match_key(&key) {
        Some(Shortcut::Quit) => {
            if let Some(planner) = &pending.planner {
                planner.cancel_token.cancel();
            }
            return HandleResult::Break;
        }
        Some(Shortcut::SwitchView) => {
            app.toggle_view();
            return HandleResult::Continue;
        }
        Some(Shortcut::Cancel) => {
            match &pending.planner {
                Some(planner) => planner.cancel_token.cancel(),
                None if app.view == View::Reviews => app.toggle_view(),
                None => app.input.clear(),
            }
            return HandleResult::Continue;
        }
        None => {}
    }

    match app.view {
        View::Planner => input::handle_planner_key(key, app, services, pending),
        View::Reviews => reviews::handle_reviews_key(key, app, services, pending),
    }
    HandleResult::Continue
}
