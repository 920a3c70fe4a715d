//! Streaming completion: content deltas, size limit, cancellation.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use futures::StreamExt;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::{PlannerError, StreamHooks, map_api_error};

/// Max content size (2MB) to prevent unbounded memory growth from malformed streams.
pub(super) const MAX_CONTENT_BYTES: usize = 2 * 1024 * 1024;

/// Text carried by a streaming chunk's first choice, if any.
pub(super) fn content_delta(chunk: &Value) -> Option<&str> {
    chunk
        .get("choices")?
        .as_array()?
        .first()?
        .get("delta")?
        .get("content")?
        .as_str()
        .filter(|s| !s.is_empty())
}

/// Error message embedded in a chunk (OpenRouter reports mid-stream failures this way).
pub(super) fn chunk_error(chunk: &Value) -> Option<String> {
    let err = chunk.get("error")?;
    Some(
        err.get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error")
            .to_string(),
    )
}

/// Append `delta` unless that would exceed [`MAX_CONTENT_BYTES`]. Returns false once full.
pub(super) fn push_bounded(acc: &mut String, delta: &str) -> bool {
    if acc.len() + delta.len() > MAX_CONTENT_BYTES {
        return false;
    }
    acc.push_str(delta);
    true
}

async fn or_cancelled<F, T>(token: Option<&CancellationToken>, fut: F) -> Result<T, PlannerError>
where
    F: std::future::Future<Output = T>,
{
    match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(PlannerError::Cancelled),
            out = fut => Ok(out),
        },
        None => Ok(fut.await),
    }
}

/// Run one streamed chat completion and return the full reply text.
pub(super) async fn stream_completion(
    client: &Client<OpenAIConfig>,
    model: &str,
    temperature: f32,
    messages: &[Value],
    hooks: &StreamHooks<'_>,
) -> Result<String, PlannerError> {
    if hooks.cancel.is_some_and(|t| t.is_cancelled()) {
        return Err(PlannerError::Cancelled);
    }

    let chat_api = client.chat();
    let stream_future = chat_api.create_stream_byot::<_, Value>(json!({
        "model": model,
        "messages": messages,
        "temperature": temperature,
        "stream": true,
    }));
    let mut stream = or_cancelled(hooks.cancel, stream_future)
        .await?
        .map_err(map_api_error)?;

    let mut content = String::new();
    while let Some(chunk) = or_cancelled(hooks.cancel, stream.next()).await? {
        let chunk = chunk.map_err(map_api_error)?;
        if let Some(msg) = chunk_error(&chunk) {
            return Err(PlannerError::ApiMessage(msg));
        }
        let Some(delta) = content_delta(&chunk) else {
            continue;
        };
        if !push_bounded(&mut content, delta) {
            log::warn!("Model reply exceeded {} bytes; truncating", MAX_CONTENT_BYTES);
            break;
        }
        if let Some(cb) = hooks.on_content_chunk {
            cb(delta);
        }
    }
    log::debug!("Model reply complete ({} bytes)", content.len());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_delta_reads_first_choice() {
        let chunk = json!({"choices": [{"delta": {"content": "### Uchi"}}]});
        assert_eq!(content_delta(&chunk), Some("### Uchi"));
    }

    #[test]
    fn content_delta_ignores_empty_and_missing() {
        assert_eq!(content_delta(&json!({"choices": [{"delta": {"content": ""}}]})), None);
        assert_eq!(content_delta(&json!({"choices": [{"delta": {"role": "assistant"}}]})), None);
        assert_eq!(content_delta(&json!({"choices": []})), None);
        assert_eq!(content_delta(&json!({"usage": {"total_tokens": 3}})), None);
    }

    #[test]
    fn chunk_error_message() {
        let chunk = json!({"error": {"message": "Provider overloaded"}});
        assert_eq!(chunk_error(&chunk).as_deref(), Some("Provider overloaded"));
        assert_eq!(chunk_error(&json!({"error": {}})).as_deref(), Some("Unknown error"));
        assert!(chunk_error(&json!({"choices": []})).is_none());
    }

    #[test]
    fn push_bounded_stops_at_limit() {
        let mut acc = "a".repeat(MAX_CONTENT_BYTES - 2);
        assert!(push_bounded(&mut acc, "bb"));
        assert!(!push_bounded(&mut acc, "c"));
        assert_eq!(acc.len(), MAX_CONTENT_BYTES);
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let out = or_cancelled(Some(&token), std::future::pending::<()>()).await;
        assert!(matches!(out, Err(PlannerError::Cancelled)));
    }
}
