//! TripAdvisor Content API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::provider::{ProviderError, RawReview, ReviewProvider};

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    location_id: Value,
}

#[derive(Debug, Deserialize)]
struct ReviewItem {
    #[serde(default)]
    rating: Value,
    #[serde(default)]
    text: Option<String>,
}

/// IDs and ratings arrive as either JSON strings or numbers.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub struct TripAdvisorClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TripAdvisorClient {
    /// Build a client whose every request gives up after `timeout`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn get_list<T>(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<T>, ProviderError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let body: ListResponse<T> = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("language", "en")])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.data)
    }
}

#[async_trait]
impl ReviewProvider for TripAdvisorClient {
    async fn search(
        &self,
        query: &str,
        address: Option<&str>,
    ) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/location/search", self.base_url);
        let mut params = vec![("searchQuery", query), ("category", "restaurant")];
        if let Some(address) = address {
            params.push(("address", address));
        }
        let hits: Vec<SearchHit> = self.get_list(&url, &params).await?;
        Ok(hits
            .iter()
            .filter_map(|hit| scalar_to_string(&hit.location_id))
            .collect())
    }

    async fn reviews(&self, location_id: &str) -> Result<Vec<RawReview>, ProviderError> {
        if location_id.contains('/') {
            return Err(ProviderError::Decode(format!(
                "invalid location id '{}'",
                location_id
            )));
        }
        let url = format!("{}/location/{}/reviews", self.base_url, location_id);
        let items: Vec<ReviewItem> = self.get_list(&url, &[]).await?;
        Ok(items
            .into_iter()
            .map(|item| RawReview {
                rating: scalar_to_string(&item.rating),
                text: item.text.unwrap_or_default(),
            })
            .collect())
    }
}
