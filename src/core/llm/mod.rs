//! Itinerary model: generation, revision, and preference extraction over a
//! streaming chat-completions API.

mod error;
mod prompts;
mod stream;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::config::LlmConfig;
use crate::core::preferences::PreferenceSet;

pub use error::{PlannerError, map_api_error};

/// Callback for each streamed content chunk (text only).
pub type OnContentChunk = Box<dyn Fn(&str) + Send + Sync>;

/// Streaming progress and cancellation for a single model call.
#[derive(Default)]
pub struct StreamHooks<'a> {
    pub on_content_chunk: Option<&'a (dyn Fn(&str) + Send + Sync)>,
    pub cancel: Option<&'a CancellationToken>,
}

/// The language model behind the planner.
#[async_trait]
pub trait ItineraryModel: Send + Sync {
    /// Markdown itinerary for the given preferences.
    async fn generate(
        &self,
        prefs: &PreferenceSet,
        hooks: &StreamHooks<'_>,
    ) -> Result<String, PlannerError>;

    /// The current itinerary with `request` applied.
    async fn revise(
        &self,
        current: &str,
        request: &str,
        prefs: &PreferenceSet,
        hooks: &StreamHooks<'_>,
    ) -> Result<String, PlannerError>;

    /// Preferences mentioned in a free-text message.
    async fn extract_preferences(&self, text: &str) -> Result<PreferenceSet, PlannerError>;
}

/// [`ItineraryModel`] backed by an OpenAI-compatible endpoint (OpenRouter by default).
pub struct OpenRouterModel {
    client: Client<OpenAIConfig>,
    model_id: String,
    temperature: f32,
}

impl OpenRouterModel {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::with_config(config.openai_config.clone()),
            model_id: config.model_id.clone(),
            temperature: config.temperature,
        }
    }

    async fn complete(
        &self,
        messages: &[serde_json::Value],
        hooks: &StreamHooks<'_>,
    ) -> Result<String, PlannerError> {
        log::info!("Calling {} ({} messages)", self.model_id, messages.len());
        let reply = stream::stream_completion(
            &self.client,
            &self.model_id,
            self.temperature,
            messages,
            hooks,
        )
        .await?;
        if reply.trim().is_empty() {
            return Err(PlannerError::EmptyResponse);
        }
        Ok(reply)
    }
}

#[async_trait]
impl ItineraryModel for OpenRouterModel {
    async fn generate(
        &self,
        prefs: &PreferenceSet,
        hooks: &StreamHooks<'_>,
    ) -> Result<String, PlannerError> {
        self.complete(&prompts::generate_messages(prefs), hooks).await
    }

    async fn revise(
        &self,
        current: &str,
        request: &str,
        prefs: &PreferenceSet,
        hooks: &StreamHooks<'_>,
    ) -> Result<String, PlannerError> {
        self.complete(&prompts::revise_messages(current, request, prefs), hooks)
            .await
    }

    async fn extract_preferences(&self, text: &str) -> Result<PreferenceSet, PlannerError> {
        let reply = self
            .complete(&prompts::extract_messages(text), &StreamHooks::default())
            .await?;
        prompts::parse_preferences_reply(&reply)
    }
}
