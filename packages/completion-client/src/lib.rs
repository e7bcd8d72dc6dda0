//! Pure chat-completions REST API client.
//!
//! A clean, minimal client for OpenAI-compatible chat completion endpoints
//! with no domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use completion_client::{ChatRequest, CompletionClient, Message};
//!
//! let client = CompletionClient::from_env()?;
//!
//! let response = client
//!     .chat_completion(
//!         ChatRequest::new("gpt-3.5-turbo").message(Message::user("Hello!")),
//!     )
//!     .await?;
//! println!("{}", response.content);
//! ```

pub mod error;
pub mod types;

pub use error::{CompletionError, Result};
pub use types::{ChatRequest, ChatResponse, Message, Usage, DEFAULT_MODEL};

use tracing::{debug, warn};

const BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions API client.
#[derive(Clone)]
pub struct CompletionClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl CompletionClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| CompletionError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies or compatible providers). The URL
    /// should include the version prefix, e.g. `https://api.openai.com/v1`.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Sends the messages and returns the first choice's content. Non-2xx
    /// responses surface as [`CompletionError::Api`] with the status code,
    /// so callers can distinguish them from transport failures.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Completion request failed");
                CompletionError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Completion API error");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CompletionError::Parse("response carried no choices".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: raw.usage,
        })
    }

    /// Convenience wrapper: one user message, first choice's content back.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(model).message(Message::user(prompt));
        Ok(self.chat_completion(request).await?.content)
    }
}
