//! Review provider seam: location search and review fetch.

use async_trait::async_trait;

/// Errors from a provider call. The lookup layer logs these and degrades to
/// "no result"; they never reach the UI.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// A review as returned by the provider, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReview {
    pub rating: Option<String>,
    pub text: String,
}

/// External review service.
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Restaurant search. Returns candidate location IDs, best match first.
    async fn search(&self, query: &str, address: Option<&str>)
    -> Result<Vec<String>, ProviderError>;

    /// Reviews for a location, in provider order.
    async fn reviews(&self, location_id: &str) -> Result<Vec<RawReview>, ProviderError>;
}
