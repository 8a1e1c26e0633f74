//! Text completion client abstraction.
//!
//! Plan generation talks to an AI model through this trait; audio
//! transcription uses its own canned mock and never touches the token
//! budget. The mock implementation ships as the only backend for now;
//! swapping in a real vendor client only requires implementing the trait.

use async_trait::async_trait;

use crate::services::error::ServiceResult;

/// Result of one completion call
#[derive(Debug, Clone)]
pub struct CompletionOutput {
    /// Generated text
    pub text: String,
    /// Tokens consumed by the call (prompt + completion)
    pub tokens_used: i64,
}

/// A text completion backend
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion against the model
    async fn complete(&self, prompt: &str) -> ServiceResult<CompletionOutput>;
}

/// Deterministic mock backend.
///
/// Echoes a canned response derived from the prompt and reports a token
/// count approximated at four characters per token, so budget accounting
/// behaves realistically without a vendor dependency.
#[derive(Debug, Clone)]
pub struct MockCompletionClient {
    model: String,
}

impl MockCompletionClient {
    /// Create a mock client pretending to be `model`
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    fn estimate_tokens(text: &str) -> i64 {
        // Rough heuristic used by most tokenizers' documentation
        (text.len() as i64 / 4).max(1)
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, prompt: &str) -> ServiceResult<CompletionOutput> {
        let text = format!(
            "[{model}] {prompt}",
            model = self.model,
            prompt = prompt.lines().next().unwrap_or_default()
        );
        let tokens_used = Self::estimate_tokens(prompt) + Self::estimate_tokens(&text);

        tracing::debug!(
            model = %self.model,
            tokens_used = tokens_used,
            "Mock completion generated"
        );

        Ok(CompletionOutput { text, tokens_used })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_completion_reports_tokens() {
        let client = MockCompletionClient::new("pulse-mock-1");
        let output = client.complete("Generate a weekly meal plan").await.unwrap();
        assert!(output.tokens_used > 0);
        assert!(output.text.contains("pulse-mock-1"));
    }

    #[tokio::test]
    async fn test_token_estimate_floor() {
        assert_eq!(MockCompletionClient::estimate_tokens("ab"), 1);
        assert_eq!(MockCompletionClient::estimate_tokens(&"x".repeat(400)), 100);
    }
}
