//! Conversation lines and itinerary streaming.

use super::{App, PlannerMessage};

impl App {
    fn push(&mut self, msg: PlannerMessage) {
        self.messages.push(msg);
        self.conversation_scroll.follow();
    }

    pub(crate) fn push_planner(&mut self, text: impl Into<String>) {
        self.push(PlannerMessage::Planner(text.into()));
    }

    pub(crate) fn push_you(&mut self, text: impl Into<String>) {
        self.push(PlannerMessage::You(text.into()));
    }

    pub(crate) fn push_warning(&mut self, text: impl Into<String>) {
        self.push(PlannerMessage::Warning(text.into()));
    }

    pub(crate) fn push_error(&mut self, text: impl Into<String>) {
        self.push(PlannerMessage::Error(text.into()));
    }

    /// Ask the questionnaire's current question, if any remain.
    pub(crate) fn ask_current_question(&mut self) {
        if let Some(q) = self.questionnaire.current() {
            self.push_planner(q.display_prompt());
        }
    }

    /// Append a streamed chunk to the itinerary draft.
    pub(crate) fn append_draft(&mut self, chunk: &str) {
        if self.draft.is_empty() {
            self.itinerary_scroll.reset();
        }
        self.draft.push_str(chunk);
    }
}
