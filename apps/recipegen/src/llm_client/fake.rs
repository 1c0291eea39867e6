//! Scripted text provider for tests.
//!
//! Replies are queued per prompt substring (matched case-insensitively, first
//! registered pattern wins). A matching pattern with an empty queue, or no
//! matching pattern at all, is a request failure.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, TextProvider};

#[derive(Debug, Default)]
pub struct FakeProvider {
    routes: Mutex<Vec<(String, VecDeque<Option<String>>)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply for prompts containing `pattern`.
    pub fn respond(self, pattern: &str, reply: &str) -> Self {
        self.push(pattern, Some(reply.to_string()))
    }

    /// Queue a failed call for prompts containing `pattern`.
    pub fn fail(self, pattern: &str) -> Self {
        self.push(pattern, None)
    }

    fn push(mut self, pattern: &str, reply: Option<String>) -> Self {
        let pattern = pattern.to_lowercase();
        let routes = self.routes.get_mut().unwrap();
        match routes.iter_mut().find(|(p, _)| *p == pattern) {
            Some((_, queue)) => queue.push_back(reply),
            None => routes.push((pattern, VecDeque::from([reply]))),
        }
        self
    }

    /// Number of calls whose prompt contained `pattern`.
    pub fn calls_matching(&self, pattern: &str) -> usize {
        let pattern = pattern.to_lowercase();
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|prompt| prompt.to_lowercase().contains(&pattern))
            .count()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        let prompt_lower = prompt.to_lowercase();
        let mut routes = self.routes.lock().unwrap();
        let queue = routes
            .iter_mut()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
            .map(|(_, queue)| queue);

        match queue.and_then(|q| q.pop_front()) {
            Some(Some(reply)) => Ok(reply),
            Some(None) => Err(LlmError::Api {
                status: 503,
                message: "scripted failure".to_string(),
            }),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: no response scripted for prompt (first 80 chars): {}",
                prompt.chars().take(80).collect::<String>()
            ))),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_are_consumed_in_order() {
        let provider = FakeProvider::new()
            .fail("hello")
            .respond("hello", "world");

        assert!(provider.complete("say HELLO").await.is_err());
        assert_eq!(provider.complete("hello again").await.unwrap(), "world");
        assert!(provider.complete("hello, anyone?").await.is_err());
        assert_eq!(provider.calls_matching("hello"), 3);
    }

    #[tokio::test]
    async fn test_unmatched_prompt_fails() {
        let provider = FakeProvider::new().respond("alpha", "a");
        let err = provider.complete("beta").await.unwrap_err();
        assert!(matches!(err, LlmError::RequestFailed(_)));
        assert_eq!(provider.call_count(), 1);
    }
}
