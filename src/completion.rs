//! Completion service used by the `ai` builtin.
//!
//! The evaluator only knows the [`CompletionService`] trait. The HTTP client
//! here talks to a chat-completions endpoint; tests and embedders can install
//! any other implementation on a [`Registry`](crate::Registry).

use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompletionError {
    #[error("unsupported provider '{0}'")]
    UnsupportedProvider(String),

    /// Error message reported by the service itself
    #[error("service error: {0}")]
    Service(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Turns a provider name and prompt parts into a completion.
pub trait CompletionService: Send + Sync {
    fn complete(&self, provider: &str, parts: &[String]) -> Result<String, CompletionError>;
}

/// Provider names the HTTP client answers to.
pub const PROVIDERS: &[&str] = &["gpt", "openai"];

/// Prompt text sent for `parts`.
pub fn build_prompt(parts: &[String]) -> String {
    parts.join(" : ")
}

/// Pull the completion text out of a response body.
///
/// Chat responses carry `choices[0].message.content`; legacy completion
/// responses carry `choices[0].text`. A body with `error.message` is the
/// service reporting a failure.
pub fn parse_completion_response(body: &str) -> Result<String, CompletionError> {
    let json: JsonValue = serde_json::from_str(body)
        .map_err(|e| CompletionError::UnexpectedResponse(format!("invalid JSON: {e}")))?;

    let choice = &json["choices"][0];
    if let Some(content) = choice["message"]["content"].as_str() {
        return Ok(content.to_string());
    }
    if let Some(text) = choice["text"].as_str() {
        return Ok(text.to_string());
    }
    if let Some(message) = json["error"]["message"].as_str() {
        return Err(CompletionError::Service(message.to_string()));
    }
    Err(CompletionError::UnexpectedResponse(
        "no choices or error in response".to_string(),
    ))
}

#[cfg(feature = "completion")]
pub use http::HttpCompletionClient;

#[cfg(feature = "completion")]
mod http {
    use log::debug;
    use serde_json::json;
    use ureq::{Agent, AgentBuilder};

    use super::{CompletionError, CompletionService, PROVIDERS, build_prompt, parse_completion_response};
    use crate::config::CompletionConfig;

    /// Blocking chat-completions client.
    pub struct HttpCompletionClient {
        agent: Agent,
        config: CompletionConfig,
    }

    impl HttpCompletionClient {
        pub fn new(config: CompletionConfig) -> Self {
            let agent = AgentBuilder::new().timeout(config.timeout).build();
            HttpCompletionClient { agent, config }
        }
    }

    impl CompletionService for HttpCompletionClient {
        fn complete(&self, provider: &str, parts: &[String]) -> Result<String, CompletionError> {
            if !PROVIDERS.contains(&provider) {
                return Err(CompletionError::UnsupportedProvider(provider.to_string()));
            }

            let body = json!({
                "model": self.config.model,
                "messages": [{ "role": "user", "content": build_prompt(parts) }],
            });
            debug!("completion request to {} ({})", self.config.endpoint, self.config.model);

            let response = self
                .agent
                .post(&self.config.endpoint)
                .set("Content-Type", "application/json")
                .set("Authorization", &format!("Bearer {}", self.config.api_key))
                .send_string(&body.to_string());

            // Error statuses still carry a JSON body with the service's message.
            let text = match response {
                Ok(response) => response.into_string(),
                Err(ureq::Error::Status(_, response)) => response.into_string(),
                Err(err) => return Err(CompletionError::Transport(err.to_string())),
            }
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

            parse_completion_response(&text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_joins_parts() {
        let parts = vec!["translate".to_string(), "hello".to_string()];
        assert_eq!(build_prompt(&parts), "translate : hello");
    }

    #[test]
    fn test_parse_chat_response() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        assert_eq!(parse_completion_response(body), Ok("hi".to_string()));
    }

    #[test]
    fn test_parse_legacy_response() {
        let body = r#"{"choices":[{"text":"legacy"}]}"#;
        assert_eq!(parse_completion_response(body), Ok("legacy".to_string()));
    }

    #[test]
    fn test_parse_service_error() {
        let body = r#"{"error":{"message":"invalid api key"}}"#;
        assert_eq!(
            parse_completion_response(body),
            Err(CompletionError::Service("invalid api key".to_string()))
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_completion_response("<html>"),
            Err(CompletionError::UnexpectedResponse(_))
        ));
    }
}
