//! Review lookup: resolve a restaurant to a provider location, then fetch a few
//! of its reviews. Every failure degrades to an empty result.

mod provider;
mod tripadvisor;

pub use provider::{ProviderError, ReviewProvider};
pub use tripadvisor::TripAdvisorClient;

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream;

use crate::core::config::ReviewConfig;
use crate::core::itinerary::NormalizedPlace;

/// Reviews kept per restaurant.
pub const MAX_REVIEWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub rating: Option<String>,
    pub text: String,
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "⭐ {}/5 - {}",
            self.rating.as_deref().unwrap_or("?"),
            self.text
        )
    }
}

/// Reviews for one restaurant; empty when none were found or lookup failed.
pub type ReviewSet = Vec<Review>;

#[derive(Clone)]
pub struct ReviewLookup {
    provider: Option<Arc<dyn ReviewProvider>>,
}

impl ReviewLookup {
    /// Lookup backed by TripAdvisor, or disabled when no key is configured.
    pub fn from_config(config: &ReviewConfig) -> Self {
        let Some(key) = config.api_key.as_deref() else {
            log::info!("No review provider key configured; review lookup disabled");
            return Self::disabled();
        };
        match TripAdvisorClient::new(key, config.base_url.as_str(), config.timeout) {
            Ok(client) => Self::with_provider(Arc::new(client)),
            Err(e) => {
                log::warn!("Failed to build review client: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn with_provider(provider: Arc<dyn ReviewProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// First location ID for `name`, trying the address-qualified search before
    /// the name-only one.
    pub async fn resolve_location_id(&self, name: &str, address: &str) -> Option<String> {
        let provider = self.provider.as_ref()?;
        let query = name.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        let address = address.trim();
        if !address.is_empty() {
            if let Some(id) = first_id(provider.search(&query, Some(address)).await, name) {
                return Some(id);
            }
            log::debug!("No address-qualified match for '{}', retrying by name", name);
        }
        first_id(provider.search(&query, None).await, name)
    }

    /// Up to [`MAX_REVIEWS`] non-empty reviews for the restaurant.
    pub async fn lookup(&self, name: &str, address: &str) -> ReviewSet {
        let Some(provider) = self.provider.as_ref() else {
            return Vec::new();
        };
        let Some(id) = self.resolve_location_id(name, address).await else {
            log::debug!("No location found for '{}'", name);
            return Vec::new();
        };
        match provider.reviews(&id).await {
            Ok(raw) => raw
                .into_iter()
                .filter_map(|r| {
                    let text = r.text.trim();
                    (!text.is_empty()).then(|| Review {
                        rating: r.rating,
                        text: text.to_string(),
                    })
                })
                .take(MAX_REVIEWS)
                .collect(),
            Err(e) => {
                log::warn!("Review fetch failed for '{}' ({}): {}", name, id, e);
                Vec::new()
            }
        }
    }

    /// Look up every place with at most `concurrency` requests in flight.
    /// Results line up with `places`.
    pub async fn lookup_all(&self, places: &[NormalizedPlace], concurrency: usize) -> Vec<ReviewSet> {
        if !self.is_enabled() {
            return vec![Vec::new(); places.len()];
        }
        stream::iter(places.iter().map(|p| self.lookup(&p.name, &p.address)))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

fn first_id(result: Result<Vec<String>, ProviderError>, name: &str) -> Option<String> {
    match result {
        Ok(ids) => ids.into_iter().next(),
        Err(e) => {
            log::warn!("Location search failed for '{}': {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests;
