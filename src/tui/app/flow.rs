//! Planner conversation: questionnaire answers, generation, and change requests.
//!
//! Pure state transitions; the handlers turn returned [`Action`]s into model calls.

use std::time::Instant;

use crate::core::llm::PlannerError;
use crate::core::preferences::{PreferenceSet, ValidationError};
use crate::core::session::{self, ItineraryOutcome};

use super::super::constants::FREE_TEXT_MIN_WORDS;
use super::{App, Phase};

/// Work the handlers must start after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ExtractPreferences(String),
    Generate(PreferenceSet),
    Revise {
        current: String,
        request: String,
        prefs: PreferenceSet,
    },
    /// The store was rewritten; reload the Reviews view.
    RefreshReviews,
}

fn looks_like_free_text(input: &str) -> bool {
    input.split_whitespace().count() >= FREE_TEXT_MIN_WORDS
}

impl App {
    /// Handle Enter: consume the input and advance the conversation.
    pub(crate) fn submit(&mut self, llm_prefill: bool) -> Option<Action> {
        if self.phase.is_busy() {
            return None;
        }
        let input = std::mem::take(&mut self.input);
        match self.phase {
            Phase::Questions => self.answer_question(input, llm_prefill),
            Phase::GenerationFailed => Some(self.start_generation()),
            Phase::AwaitingChanges => self.request_changes(input),
            Phase::Done => {
                if !input.trim().is_empty() {
                    self.push_planner("Your itinerary is saved. Press Tab for reviews or Ctrl+C to quit.");
                }
                None
            }
            Phase::ReadingPreferences | Phase::Generating | Phase::Revising => None,
        }
    }

    fn at_first_question(&self) -> bool {
        self.questionnaire.progress().0 == 1
            && self.questionnaire.preferences() == &PreferenceSet::default()
    }

    fn answer_question(&mut self, input: String, llm_prefill: bool) -> Option<Action> {
        let text = input.trim().to_string();
        if llm_prefill && self.at_first_question() && looks_like_free_text(&text) {
            self.push_you(text.clone());
            self.push_planner("Let me pick out the details from that...");
            self.phase = Phase::ReadingPreferences;
            self.busy_since = Some(Instant::now());
            self.free_text_answer = Some(text.clone());
            return Some(Action::ExtractPreferences(text));
        }

        let optional = self.questionnaire.current().is_some_and(|q| q.is_optional());
        match self.questionnaire.submit(&text) {
            Err(ValidationError::Empty) => {
                self.push_planner(ValidationError::Empty.to_string());
                self.ask_current_question();
                None
            }
            Ok(()) => {
                if text.is_empty() && optional {
                    self.push_you("(skipped)");
                } else {
                    self.push_you(text);
                }
                self.next_question_or_generate()
            }
        }
    }

    fn next_question_or_generate(&mut self) -> Option<Action> {
        if self.questionnaire.is_complete() {
            Some(self.start_generation())
        } else {
            self.ask_current_question();
            None
        }
    }

    fn start_generation(&mut self) -> Action {
        if self.frozen_preferences.is_none() {
            self.frozen_preferences = Some(self.questionnaire.preferences().clone());
        }
        let prefs = self.frozen_preferences.clone().unwrap_or_default();
        self.push_planner(format!(
            "Thanks! Generating your personalized food itinerary for {}...",
            prefs.value_or_unspecified("destination")
        ));
        self.phase = Phase::Generating;
        self.draft.clear();
        self.busy_since = Some(Instant::now());
        Action::Generate(prefs)
    }

    fn request_changes(&mut self, input: String) -> Option<Action> {
        if session::is_decline(&input) {
            self.push_you(session::DECLINE_ECHO);
            self.push_planner(session::GOODBYE_MESSAGE);
            self.phase = Phase::Done;
            return None;
        }
        let (Some(current), Some(prefs)) = (self.itinerary.clone(), self.frozen_preferences.clone())
        else {
            return None;
        };
        let request = input.trim().to_string();
        self.push_you(request.clone());
        self.push_planner(session::UPDATING_MESSAGE);
        self.phase = Phase::Revising;
        self.draft.clear();
        self.busy_since = Some(Instant::now());
        Some(Action::Revise {
            current,
            request,
            prefs,
        })
    }

    /// Preferences read from the free-text first answer arrived.
    pub(crate) fn on_preferences(
        &mut self,
        result: Result<PreferenceSet, PlannerError>,
    ) -> Option<Action> {
        self.busy_since = None;
        self.phase = Phase::Questions;
        let raw = self.free_text_answer.take();
        let mut found = match result {
            Ok(found) => found,
            Err(PlannerError::Cancelled) => {
                self.push_warning("Cancelled.");
                PreferenceSet::default()
            }
            Err(e) => {
                log::warn!("Preference extraction failed: {}", e);
                self.push_warning("I couldn't read the trip details from that.");
                PreferenceSet::default()
            }
        };
        let extracted = found != PreferenceSet::default();
        let mut kept_raw = false;
        if found.get("destination").is_none()
            && let Some(text) = raw
        {
            kept_raw = found.set("destination", text);
        }
        self.questionnaire.prefill(&found);
        if self.questionnaire.is_complete() {
            return Some(self.start_generation());
        }
        if extracted {
            self.push_planner("Got it! Just a few more questions.");
        } else if kept_raw {
            self.push_planner("I'll take that as your destination; let's go step by step.");
        } else {
            self.push_planner("Let's go step by step.");
        }
        self.ask_current_question();
        None
    }

    /// A generation or revision finished.
    pub(crate) fn on_itinerary(
        &mut self,
        result: Result<ItineraryOutcome, PlannerError>,
    ) -> Option<Action> {
        self.busy_since = None;
        let revising = self.phase == Phase::Revising;
        self.draft.clear();
        match result {
            Ok(outcome) => {
                self.itinerary = Some(outcome.markdown);
                self.itinerary_scroll.reset();
                if let Some(warning) = outcome.store_warning {
                    self.push_warning(warning);
                }
                if outcome.places.is_empty() {
                    self.push_warning("No restaurants with an address were found in this itinerary.");
                }
                let headline = if revising {
                    session::UPDATED_MESSAGE
                } else {
                    session::READY_MESSAGE
                };
                self.push_planner(format!("{}\n{}", headline, session::CHANGES_PROMPT));
                self.phase = Phase::AwaitingChanges;
                Some(Action::RefreshReviews)
            }
            Err(e) => {
                if matches!(e, PlannerError::Cancelled) {
                    self.push_warning("Request cancelled.");
                } else if revising {
                    self.push_error(session::revision_failure_message(&e));
                } else {
                    self.push_error(session::generation_failure_message(&e));
                }
                if revising {
                    self.push_planner(session::CHANGES_PROMPT);
                    self.phase = Phase::AwaitingChanges;
                } else {
                    self.push_planner("Press Enter to try again.");
                    self.phase = Phase::GenerationFailed;
                }
                None
            }
        }
    }
}
