//! TUI application state: conversation, questionnaire phase, itinerary pane, reviews.

mod flow;
mod messages;

pub use flow::Action;

use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

use crate::core::itinerary::NormalizedPlace;
use crate::core::preferences::{PreferenceSet, Questionnaire};
use crate::core::reviews::ReviewSet;

/// Lines in the conversation pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlannerMessage {
    Planner(String),
    You(String),
    Warning(String),
    Error(String),
}

/// Where the conversation stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Asking the questionnaire.
    Questions,
    /// Reading preferences out of a free-text first answer.
    ReadingPreferences,
    Generating,
    /// Generation failed or was cancelled; Enter retries.
    GenerationFailed,
    /// Itinerary shown; waiting for "no" or a change request.
    AwaitingChanges,
    Revising,
    Done,
}

impl Phase {
    /// A model request is in flight.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Phase::ReadingPreferences | Phase::Generating | Phase::Revising
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Planner,
    Reviews,
}

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScrollPosition {
    Line(usize),
    Bottom,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::Line(0)
    }
}

/// Scroll state for one pane; `last_max` is updated on each draw.
#[derive(Default, Debug)]
pub struct PaneScroll {
    pub(crate) pos: ScrollPosition,
    pub(crate) last_max: usize,
}

impl PaneScroll {
    fn materialize(&mut self) {
        if self.pos == ScrollPosition::Bottom {
            self.pos = ScrollPosition::Line(self.last_max);
        }
    }

    pub(crate) fn down(&mut self, n: usize) {
        self.materialize();
        if let ScrollPosition::Line(pos) = self.pos {
            self.pos = ScrollPosition::Line((pos + n).min(self.last_max));
        }
    }

    pub(crate) fn up(&mut self, n: usize) {
        self.materialize();
        if let ScrollPosition::Line(pos) = self.pos {
            self.pos = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn line(&self) -> usize {
        match self.pos {
            ScrollPosition::Line(n) => n.min(self.last_max),
            ScrollPosition::Bottom => self.last_max,
        }
    }

    pub(crate) fn follow(&mut self) {
        self.pos = ScrollPosition::Bottom;
    }

    pub(crate) fn reset(&mut self) {
        self.pos = ScrollPosition::Line(0);
    }
}

/// Reviews view: places read back from the store plus their lookups.
#[derive(Default)]
pub struct ReviewsState {
    pub places: Vec<NormalizedPlace>,
    /// Parallel to `places`; `None` while the lookup is pending.
    pub reviews: Vec<Option<ReviewSet>>,
    pub title: Option<String>,
    pub list_state: ListState,
    pub loading: bool,
    /// False when no review provider key is configured.
    pub enabled: bool,
}

impl ReviewsState {
    pub(crate) fn set_places(&mut self, title: Option<String>, places: Vec<NormalizedPlace>) {
        self.reviews = vec![None; places.len()];
        self.places = places;
        self.title = title;
        self.loading = self.enabled && !self.places.is_empty();
        if !self.enabled {
            self.reviews = vec![Some(Vec::new()); self.places.len()];
        }
        self.list_state
            .select((!self.places.is_empty()).then_some(0));
    }

    pub(crate) fn set_reviews(&mut self, reviews: Vec<ReviewSet>) {
        self.reviews = reviews.into_iter().map(Some).collect();
        self.reviews.resize(self.places.len(), Some(Vec::new()));
        self.loading = false;
    }

    pub(crate) fn selected(&self) -> Option<&NormalizedPlace> {
        self.places.get(self.list_state.selected()?)
    }

    pub(crate) fn select_next(&mut self) {
        if self.places.is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| (i + 1).min(self.places.len() - 1));
        self.list_state.select(Some(i));
    }

    pub(crate) fn select_prev(&mut self) {
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }
}

pub struct App {
    pub(crate) messages: Vec<PlannerMessage>,
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) phase: Phase,
    pub(crate) view: View,
    pub(crate) questionnaire: Questionnaire,
    /// Preferences used for the current itinerary; frozen once generation starts.
    pub(crate) frozen_preferences: Option<PreferenceSet>,
    /// Last complete itinerary Markdown.
    pub(crate) itinerary: Option<String>,
    /// Streamed text of the request in flight.
    pub(crate) draft: String,
    pub(crate) conversation_scroll: PaneScroll,
    pub(crate) itinerary_scroll: PaneScroll,
    pub(crate) reviews: ReviewsState,
    /// Model ID displayed in the header.
    pub model_label: String,
    /// Short status shown over the bottom-right corner until the deadline.
    pub(crate) toast: Option<(String, Instant)>,
    /// When the current request started; drives the spinner.
    pub(crate) busy_since: Option<Instant>,
    /// First answer sent for preference extraction, kept as the destination
    /// if the model finds none.
    pub(crate) free_text_answer: Option<String>,
}

impl App {
    pub fn new(model_label: String, reviews_enabled: bool) -> Self {
        let mut app = Self {
            messages: vec![],
            input: String::new(),
            phase: Phase::Questions,
            view: View::Planner,
            questionnaire: Questionnaire::new(),
            frozen_preferences: None,
            itinerary: None,
            draft: String::new(),
            conversation_scroll: PaneScroll::default(),
            itinerary_scroll: PaneScroll::default(),
            reviews: ReviewsState {
                enabled: reviews_enabled,
                ..ReviewsState::default()
            },
            model_label,
            toast: None,
            busy_since: None,
            free_text_answer: None,
        };
        app.push_planner(super::constants::WELCOME);
        app.ask_current_question();
        app
    }

    pub(crate) fn show_toast(&mut self, text: impl Into<String>, duration: Duration) {
        self.toast = Some((text.into(), Instant::now() + duration));
    }

    pub(crate) fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Planner => View::Reviews,
            View::Reviews => View::Planner,
        };
    }

    /// Markdown shown in the itinerary pane: streamed draft while a request is in
    /// flight, otherwise the last complete itinerary.
    pub(crate) fn itinerary_text(&self) -> Option<&str> {
        if matches!(self.phase, Phase::Generating | Phase::Revising) && !self.draft.is_empty() {
            return Some(&self.draft);
        }
        self.itinerary.as_deref()
    }
}
