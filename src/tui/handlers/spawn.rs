//! Spawns model and review requests in background threads with stream/result channels.

use std::sync::mpsc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::itinerary::NormalizedPlace;
use crate::core::llm::{OnContentChunk, PlannerError, StreamHooks};
use crate::core::preferences::PreferenceSet;
use crate::core::reviews::ReviewSet;

use super::{PendingPlanner, PlannerEvent, Services};

/// Channels and token for one request; the closure runs on its own thread
/// and receives the chunk callback and cancel token.
fn spawn_planner<F>(run: F) -> PendingPlanner
where
    F: FnOnce(OnContentChunk, CancellationToken) -> PlannerEvent + Send + 'static,
{
    let (stream_tx, stream_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();
    let cancel_token = CancellationToken::new();
    let cancel_token_clone = cancel_token.clone();

    std::thread::spawn(move || {
        let on_content_chunk: OnContentChunk = Box::new(move |s| {
            let _ = stream_tx.send(s.to_string());
        });
        let _ = result_tx.send(run(on_content_chunk, cancel_token_clone));
    });

    PendingPlanner {
        stream_rx,
        result_rx,
        cancel_token,
    }
}

/// Read preferences out of a free-text trip description.
pub(super) fn spawn_extract(services: &Services, text: String) -> PendingPlanner {
    let model = Arc::clone(&services.model);
    let rt = Arc::clone(&services.rt);
    spawn_planner(move |_, cancel| {
        let result = rt.block_on(async {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(PlannerError::Cancelled),
                r = model.extract_preferences(&text) => r,
            }
        });
        PlannerEvent::Preferences(result)
    })
}

pub(super) fn spawn_generate(services: &Services, prefs: PreferenceSet) -> PendingPlanner {
    let model = Arc::clone(&services.model);
    let session = Arc::clone(&services.session);
    let rt = Arc::clone(&services.rt);
    spawn_planner(move |on_chunk, cancel| {
        let hooks = StreamHooks {
            on_content_chunk: Some(&*on_chunk),
            cancel: Some(&cancel),
        };
        let result = rt.block_on(session.generate(model.as_ref(), &prefs, &hooks));
        PlannerEvent::Itinerary(result)
    })
}

pub(super) fn spawn_revise(
    services: &Services,
    current: String,
    request: String,
    prefs: PreferenceSet,
) -> PendingPlanner {
    let model = Arc::clone(&services.model);
    let session = Arc::clone(&services.session);
    let rt = Arc::clone(&services.rt);
    spawn_planner(move |on_chunk, cancel| {
        let hooks = StreamHooks {
            on_content_chunk: Some(&*on_chunk),
            cancel: Some(&cancel),
        };
        let result = rt.block_on(session.revise(
            model.as_ref(),
            &current,
            &request,
            &prefs,
            &hooks,
        ));
        PlannerEvent::Itinerary(result)
    })
}

/// Look up reviews for every place; the result is parallel to `places`.
pub(super) fn spawn_reviews(
    services: &Services,
    places: Vec<NormalizedPlace>,
) -> mpsc::Receiver<Vec<ReviewSet>> {
    let (tx, rx) = mpsc::channel();
    let lookup = services.lookup.clone();
    let concurrency = services.concurrency;
    let rt = Arc::clone(&services.rt);
    std::thread::spawn(move || {
        let reviews = rt.block_on(lookup.lookup_all(&places, concurrency));
        let _ = tx.send(reviews);
    });
    rx
}
