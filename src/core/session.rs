//! One planning session: turn a model reply into a stored itinerary and the list
//! of places shown in the Reviews view.

use std::path::PathBuf;

use crate::core::itinerary::{
    self, ItineraryStore, NamePolicy, NormalizedPlace, RestaurantRecord,
};
use crate::core::llm::{ItineraryModel, PlannerError, StreamHooks};
use crate::core::paths;
use crate::core::persistence;
use crate::core::preferences::PreferenceSet;

pub const READY_MESSAGE: &str = "Your personalized food itinerary is ready!";
pub const UPDATED_MESSAGE: &str = "Your itinerary has been updated.";
pub const CHANGES_PROMPT: &str = "Would you like to make any changes to the itinerary? (Type yes and list the changes below, or type n to confirm.)";
pub const DECLINE_ECHO: &str = "No changes needed";
pub const GOODBYE_MESSAGE: &str = "Great! Enjoy your trip!";
pub const UPDATING_MESSAGE: &str = "Updating your itinerary with the requested changes...";

/// True when a reply to the changes prompt means "no changes".
pub fn is_decline(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "no" | "n" | "")
}

pub fn generation_failure_message(err: &PlannerError) -> String {
    format!(
        "Sorry, I encountered an error generating your itinerary: {}",
        err
    )
}

pub fn revision_failure_message(err: &PlannerError) -> String {
    format!("Sorry, I encountered an error updating your itinerary: {}", err)
}

/// A finished (generated or revised) itinerary.
#[derive(Debug, Clone)]
pub struct ItineraryOutcome {
    pub title: String,
    pub markdown: String,
    pub restaurants: Vec<RestaurantRecord>,
    pub places: Vec<NormalizedPlace>,
    /// Set when the store could not be written; the itinerary itself is still usable.
    pub store_warning: Option<String>,
}

pub struct PlannerSession {
    store: ItineraryStore,
    policy: NamePolicy,
    history_dir: Option<PathBuf>,
}

impl PlannerSession {
    pub fn new(store: ItineraryStore, policy: NamePolicy) -> Self {
        Self {
            store,
            policy,
            history_dir: paths::data_dir(),
        }
    }

    /// Where the last itinerary is kept; `None` disables that copy.
    #[cfg(test)]
    pub fn with_history_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.history_dir = dir;
        self
    }

    pub fn store(&self) -> &ItineraryStore {
        &self.store
    }

    pub fn policy(&self) -> NamePolicy {
        self.policy
    }

    /// Extract restaurants, write the store, keep a copy of the Markdown, and
    /// normalize names for display.
    pub fn complete(&self, markdown: String, prefs: &PreferenceSet) -> ItineraryOutcome {
        let title = prefs.title();
        let restaurants = itinerary::extract_restaurants(&markdown);

        let store_warning = match self.store.save(&title, &restaurants) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Failed to write {}: {}", self.store.path().display(), e);
                Some(format!(
                    "Could not save restaurants to {}: {}",
                    self.store.path().display(),
                    e
                ))
            }
        };
        if let Some(dir) = &self.history_dir
            && let Err(e) = persistence::save_in(dir, &markdown, prefs)
        {
            log::warn!("Failed to save last itinerary: {}", e);
        }

        let mut entries = Vec::with_capacity(restaurants.len() + 1);
        entries.push(RestaurantRecord::header(title.as_str()));
        entries.extend(restaurants.iter().cloned());
        let places = itinerary::normalize_places(&entries, self.policy);

        ItineraryOutcome {
            title,
            markdown,
            restaurants,
            places,
            store_warning,
        }
    }

    pub async fn generate(
        &self,
        model: &dyn ItineraryModel,
        prefs: &PreferenceSet,
        hooks: &StreamHooks<'_>,
    ) -> Result<ItineraryOutcome, PlannerError> {
        let markdown = model.generate(prefs, hooks).await?;
        Ok(self.complete(markdown, prefs))
    }

    pub async fn revise(
        &self,
        model: &dyn ItineraryModel,
        current: &str,
        request: &str,
        prefs: &PreferenceSet,
        hooks: &StreamHooks<'_>,
    ) -> Result<ItineraryOutcome, PlannerError> {
        let markdown = model.revise(current, request, prefs, hooks).await?;
        Ok(self.complete(markdown, prefs))
    }
}
