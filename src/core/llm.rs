//! Completion gateway: the integration boundary to the external
//! chat-completion provider.
//!
//! The provider sits behind the `CompletionProvider` trait so tests
//! substitute a fake. The production implementation speaks the
//! OpenAI-compatible `/v1/chat/completions` shape; all wire types
//! are private to this module.
//!
//! The gateway is the single point that converts transport and
//! provider failures into a degraded-but-valid result: callers
//! always get a `CompletionResult`, never an error. One attempt
//! per call, bounded by the configured client timeout.

use crate::core::config::ProviderConfig;
use crate::core::types::{AnswerSource, CompletionResult, ConversationTurn, Role};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed apologetic answer returned when the provider fails
pub const FALLBACK_ANSWER: &str =
    "I am sorry, I could not reach the answer service just now. \
     Please try your question again in a moment, insha'Allah.";

/// Provider-side failure, absorbed by the gateway
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// One-method seam to the external completion provider
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the persona and ordered history (oldest first, ending
    /// in the newest user turn) and return the raw best-candidate
    /// text.
    async fn complete(
        &self,
        system: &str,
        history: &[ConversationTurn],
    ) -> Result<String, ProviderError>;
}

/// Adapter for any HTTP endpoint implementing
/// `/v1/chat/completions`: OpenAI, and OpenAI-compatible local
/// servers (Ollama, LM Studio, ...).
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_base_url: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// Build a provider from configuration.
    ///
    /// The request timeout is baked into the client so a slow
    /// provider call cannot outlive `timeout_seconds`. The API key
    /// is `None` for keyless local models; when present it is sent
    /// as `Authorization: Bearer <key>`.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    async fn complete(
        &self,
        system: &str,
        history: &[ConversationTurn],
    ) -> Result<String, ProviderError> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(WireMessage {
            role: "system",
            content: system.to_string(),
        });
        for turn in history {
            messages.push(WireMessage {
                role: match turn.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: turn.content.clone(),
            });
        }

        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
        };

        debug!(
            model = %payload.model,
            turns = history.len(),
            "sending completion request"
        );

        let mut req = self.client.post(&self.api_base_url).json(&payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let response = check_status(response).await?;

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::Malformed(format!("failed to parse body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::Malformed("empty or missing content".to_string()))
    }
}

// Private wire types

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// Error envelope used by OpenAI and compatible APIs
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Consume the response and return it if successful, or a
/// structured error carrying the provider's message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(env) => env.error.message,
        Err(_) => body,
    };

    Err(ProviderError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Strip leading markdown heading markers from each line.
///
/// Callers speak answers aloud; "# Zakat" must come back as
/// "Zakat".
pub fn strip_heading_markers(text: &str) -> String {
    let cleaned: Vec<&str> = text
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with('#') {
                trimmed.trim_start_matches('#').trim_start()
            } else {
                line
            }
        })
        .collect();

    cleaned.join("\n").trim().to_string()
}

/// Forwards conversation histories to the provider and normalizes
/// replies
pub struct CompletionGateway {
    provider: Box<dyn CompletionProvider>,
    persona: String,
}

impl CompletionGateway {
    pub fn new(provider: Box<dyn CompletionProvider>, persona: String) -> Self {
        Self { provider, persona }
    }

    /// Replay the history and return a normalized answer.
    ///
    /// Never fails: any provider error degrades into the fixed
    /// fallback answer with `source: fallback`.
    pub async fn complete(&self, history: &[ConversationTurn]) -> CompletionResult {
        match self.provider.complete(&self.persona, history).await {
            Ok(text) => CompletionResult {
                answer: strip_heading_markers(&text),
                source: AnswerSource::Model,
            },
            Err(e) => {
                warn!(error = %e, "completion provider failed, returning fallback answer");
                CompletionResult {
                    answer: FALLBACK_ANSWER.to_string(),
                    source: AnswerSource::Fallback,
                }
            }
        }
    }
}
