//! Trip preferences: the question sequence, answer validation, and the collected set.
//!
//! Questions are loaded from `config/questions.json` (embedded at compile time and
//! checked by `build.rs`).

use std::fmt::Write as _;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Answers describing the trip. Every field is optional until the questionnaire
/// requires it; the set is frozen once generation starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceSet {
    pub destination: Option<String>,
    pub dates: Option<String>,
    pub travelers: Option<String>,
    pub cuisines: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub budget: Option<String>,
    pub experience: Option<String>,
    pub additional_notes: Option<String>,
}

impl PreferenceSet {
    fn slot(&self, key: &str) -> Option<&Option<String>> {
        Some(match key {
            "destination" => &self.destination,
            "dates" => &self.dates,
            "travelers" => &self.travelers,
            "cuisines" => &self.cuisines,
            "dietary_restrictions" => &self.dietary_restrictions,
            "budget" => &self.budget,
            "experience" => &self.experience,
            "additional_notes" => &self.additional_notes,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        Some(match key {
            "destination" => &mut self.destination,
            "dates" => &mut self.dates,
            "travelers" => &mut self.travelers,
            "cuisines" => &mut self.cuisines,
            "dietary_restrictions" => &mut self.dietary_restrictions,
            "budget" => &mut self.budget,
            "experience" => &mut self.experience,
            "additional_notes" => &mut self.additional_notes,
            _ => return None,
        })
    }

    /// Answer for `key`, if given and not blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slot(key)?
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Set an answer. Returns false for an unknown key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Answer for prompt construction; blanks become "not specified".
    pub fn value_or_unspecified(&self, key: &str) -> &str {
        self.get(key).unwrap_or("not specified")
    }

    /// Fill fields that are still empty from `other`; existing answers win.
    pub fn merge_missing(&mut self, other: &PreferenceSet) {
        for question in questions() {
            if self.get(&question.key).is_none()
                && let Some(value) = other.get(&question.key)
            {
                self.set(&question.key, value);
            }
        }
    }

    /// Keys of required questions that have no answer.
    pub fn missing_required(&self) -> Vec<&'static str> {
        questions()
            .iter()
            .filter(|q| !q.is_optional() && self.get(&q.key).is_none())
            .map(|q| q.key.as_str())
            .collect()
    }

    /// Itinerary title, e.g. "Houston Food Itinerary: May 18 - May 21".
    pub fn title(&self) -> String {
        let mut title = match self.get("destination") {
            Some(dest) => format!("{} Food Itinerary", dest),
            None => "Food Itinerary".to_string(),
        };
        if let Some(dates) = self.get("dates") {
            let _ = write!(title, ": {}", dates);
        }
        title
    }
}

/// How an answer is collected; drives the prompt hint and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    Text,
    Date,
    Number,
    Multiselect,
    Select,
    Optional,
}

/// One step of the questionnaire.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub key: String,
    pub prompt: String,
    pub kind: AnswerKind,
    #[serde(default)]
    pub options: Vec<String>,
}

impl Question {
    pub fn is_optional(&self) -> bool {
        self.kind == AnswerKind::Optional
    }

    /// Prompt as shown to the user, with option list or "(Optional)" hint.
    pub fn display_prompt(&self) -> String {
        match self.kind {
            AnswerKind::Select if !self.options.is_empty() => {
                format!("{} (Options: {})", self.prompt, self.options.join(", "))
            }
            AnswerKind::Optional => format!("{} (Optional)", self.prompt),
            _ => self.prompt.clone(),
        }
    }
}

fn load_questions() -> Vec<Question> {
    let json = include_str!("../../config/questions.json");
    serde_json::from_str(json).expect("questions.json must be valid")
}

static QUESTIONS: OnceLock<Vec<Question>> = OnceLock::new();

/// The question sequence, in the order it is asked.
pub fn questions() -> &'static [Question] {
    QUESTIONS.get_or_init(load_questions)
}

/// Reasons an answer is not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please provide an answer.")]
    Empty,
}

/// Validate an answer and return the value to store (`None` for a skipped optional).
/// Select answers matching an option case-insensitively are stored as that option.
pub fn validate_answer(question: &Question, input: &str) -> Result<Option<String>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return if question.is_optional() {
            Ok(None)
        } else {
            Err(ValidationError::Empty)
        };
    }
    if question.kind == AnswerKind::Select
        && let Some(option) = question
            .options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(input))
    {
        return Ok(Some(option.clone()));
    }
    Ok(Some(input.to_string()))
}

/// Walks the user through [`questions`], collecting a [`PreferenceSet`].
#[derive(Debug, Default)]
pub struct Questionnaire {
    index: usize,
    answers: PreferenceSet,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Question awaiting an answer, or `None` once all are answered.
    pub fn current(&self) -> Option<&'static Question> {
        questions().get(self.index)
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }

    /// Position of the current question (1-based) and total, for progress display.
    pub fn progress(&self) -> (usize, usize) {
        let total = questions().len();
        ((self.index + 1).min(total), total)
    }

    /// Answer the current question. On error the questionnaire does not advance.
    pub fn submit(&mut self, input: &str) -> Result<(), ValidationError> {
        let Some(question) = self.current() else {
            return Ok(());
        };
        if let Some(value) = validate_answer(question, input)? {
            self.answers.set(&question.key, value);
        }
        self.index += 1;
        self.skip_answered();
        Ok(())
    }

    /// Take answers found elsewhere (e.g. parsed from a free-text message) and skip
    /// the questions they already cover.
    pub fn prefill(&mut self, found: &PreferenceSet) {
        self.answers.merge_missing(found);
        self.skip_answered();
    }

    fn skip_answered(&mut self) {
        while let Some(q) = self.current() {
            if self.answers.get(&q.key).is_none() {
                break;
            }
            self.index += 1;
        }
    }

    pub fn preferences(&self) -> &PreferenceSet {
        &self.answers
    }
}
