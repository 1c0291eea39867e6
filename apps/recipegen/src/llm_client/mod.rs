/// LLM Client: the single point of entry for all text-generation calls.
///
/// No other module talks to the text model directly. Providers implement
/// `TextProvider` (one prompt in, free text out); `LlmClient` layers the
/// retry/parsing protocol for structured output on top.
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

#[cfg(test)]
pub mod fake;
pub mod gemini;
pub mod prompts;
pub mod retry;

pub use gemini::GeminiProvider;
pub use retry::RetryPolicy;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Response did not match the expected structure: {0}")]
    Schema(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("No usable structured result after {attempts} attempts (last error: {last})")]
    Exhausted { attempts: u32, last: String },
}

/// A remote text-completion capability.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}

#[derive(Clone)]
pub struct LlmClient {
    provider: Arc<dyn TextProvider>,
    retry: RetryPolicy,
}

impl LlmClient {
    pub fn new(provider: Arc<dyn TextProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Single attempt, trimmed free-text answer. Callers own the fallback.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let text = self.provider.complete(prompt).await?;
        Ok(text.trim().to_string())
    }

    /// Calls the model and parses its answer as a JSON object, retrying with
    /// exponential backoff on remote errors, empty answers, and parse failures.
    pub async fn call_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        self.call_json_checked(prompt, |_: &T| Ok(())).await
    }

    /// Like `call_json`, but a parsed value that `accept` rejects counts as a
    /// failed attempt and is retried.
    pub async fn call_json_checked<T, F>(&self, prompt: &str, accept: F) -> Result<T, LlmError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> Result<(), String>,
    {
        let attempts = self.retry.max_attempts();
        let mut last_error = String::new();

        for attempt in 0..attempts {
            debug!(
                "Structured LLM request (attempt {}/{})",
                attempt + 1,
                attempts
            );

            match self.attempt_json(prompt, &accept).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "Structured LLM call failed (attempt {}/{}): {e}",
                        attempt + 1,
                        attempts
                    );
                    last_error = e.to_string();
                }
            }

            if !self.retry.is_last(attempt) {
                let delay = self.retry.delay_after(attempt);
                warn!("Retrying after {}ms...", delay.as_millis());
                tokio::time::sleep(delay).await;
            }
        }

        error!("All {attempts} attempts failed; no usable structured result");
        Err(LlmError::Exhausted {
            attempts,
            last: last_error,
        })
    }

    async fn attempt_json<T, F>(&self, prompt: &str, accept: &F) -> Result<T, LlmError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> Result<(), String>,
    {
        let raw = self.provider.complete(prompt).await?;
        let text = strip_json_fences(&raw);
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(LlmError::Schema(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }

        let parsed: T = serde_json::from_value(value)?;
        accept(&parsed).map_err(LlmError::Schema)?;
        Ok(parsed)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .unwrap_or(stripped)
                .trim()
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeProvider;
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        value: u32,
    }

    fn client(provider: Arc<FakeProvider>, retry: RetryPolicy) -> LlmClient {
        LlmClient::new(provider, retry)
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_only_fence_is_empty() {
        assert_eq!(strip_json_fences("```json\n```"), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_json_succeeds_on_third_attempt_after_two_backoffs() {
        let provider = Arc::new(
            FakeProvider::new()
                .respond("sample", "not json at all")
                .respond("sample", "```json\n```")
                .respond("sample", "```json\n{\"value\": 7}\n```"),
        );
        let llm = client(provider.clone(), RetryPolicy::new(3));

        let started = tokio::time::Instant::now();
        let sample: Sample = llm.call_json("sample please").await.unwrap();

        assert_eq!(sample, Sample { value: 7 });
        assert_eq!(provider.call_count(), 3);
        // 2s after attempt 1, 4s after attempt 2, nothing after the success.
        assert_eq!(started.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_json_exhaustion_does_not_sleep_after_final_attempt() {
        let provider = Arc::new(FakeProvider::new().fail("sample").fail("sample").fail("sample"));
        let llm = client(provider.clone(), RetryPolicy::new(3));

        let started = tokio::time::Instant::now();
        let err = llm.call_json::<Sample>("sample").await.unwrap_err();

        assert!(matches!(err, LlmError::Exhausted { attempts: 3, .. }));
        assert_eq!(provider.call_count(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_call_json_first_attempt_success_makes_one_call() {
        let provider = Arc::new(FakeProvider::new().respond("sample", "{\"value\": 1}"));
        let llm = client(provider.clone(), RetryPolicy::immediate(3));

        let sample: Sample = llm.call_json("sample").await.unwrap();
        assert_eq!(sample.value, 1);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_call_json_wrong_shape_counts_as_failure() {
        let provider = Arc::new(
            FakeProvider::new()
                .respond("sample", "[1, 2, 3]")
                .respond("sample", "{\"value\": 2}"),
        );
        let llm = client(provider.clone(), RetryPolicy::immediate(3));

        let sample: Sample = llm.call_json("sample").await.unwrap();
        assert_eq!(sample.value, 2);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_call_json_rejects_arrays_and_retries() {
        let provider = Arc::new(
            FakeProvider::new()
                .respond("sample", "[{\"value\": 1}]")
                .respond("sample", "{\"value\": 3}"),
        );
        let llm = client(provider.clone(), RetryPolicy::immediate(3));

        let sample: Sample = llm.call_json("sample").await.unwrap();
        assert_eq!(sample.value, 3);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_call_json_checked_retries_rejected_values() {
        let provider = Arc::new(
            FakeProvider::new()
                .respond("sample", "{\"value\": 0}")
                .respond("sample", "{\"value\": 0}")
                .respond("sample", "{\"value\": 0}"),
        );
        let llm = client(provider.clone(), RetryPolicy::immediate(3));

        let err = llm
            .call_json_checked("sample", |s: &Sample| {
                if s.value > 0 {
                    Ok(())
                } else {
                    Err("value must be positive".to_string())
                }
            })
            .await
            .unwrap_err();

        match err {
            LlmError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 3);
                assert!(last.contains("value must be positive"), "{last}");
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_complete_trims_and_propagates_errors() {
        let provider = Arc::new(FakeProvider::new().respond("term", "  stir fry \n"));
        let llm = client(provider, RetryPolicy::immediate(1));

        assert_eq!(llm.complete("term").await.unwrap(), "stir fry");
        assert!(llm.complete("term").await.is_err());
    }
}
