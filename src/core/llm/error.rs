//! Itinerary model errors.

/// Errors from itinerary generation, revision, and preference extraction.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("{0}")]
    ApiAuth(String),
    #[error("API error: {0}")]
    ApiMessage(String),
    #[error("The model returned an empty itinerary")]
    EmptyResponse,
    #[error("Could not read preferences from the model reply: {0}")]
    Preferences(#[source] serde_json::Error),
    /// The request was cancelled by the user.
    #[error("Request cancelled")]
    Cancelled,
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Map async-openai or API errors into PlannerError.
pub fn map_api_error<E>(e: E) -> PlannerError
where
    E: std::fmt::Display + Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    let s = e.to_string();
    if s.contains("401") {
        return PlannerError::ApiAuth(
            "API error (401): the LLM provider rejected the key. Check OPENROUTER_API_KEY (env, .env, or `config set-key openrouter`).".to_string(),
        );
    }
    if s.contains("\"error\"")
        && let Some((_, rest)) = s.split_once("\"message\":\"")
        && let Some((msg, _)) = rest.split_once('"')
    {
        return PlannerError::ApiMessage(msg.to_string());
    }
    PlannerError::Other(e.into())
}
