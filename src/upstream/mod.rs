// Upstream chat-completion gateway: wire types and the transport seam
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reflection::types::PromptPair;

pub mod http;

pub use http::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request payload: `{ model, messages }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Two-message conversation: system prompt, then user prompt
    pub fn from_prompt(model: impl Into<String>, prompt: PromptPair) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: prompt.system,
                },
                ChatMessage {
                    role: Role::User,
                    content: prompt.user,
                },
            ],
        }
    }
}

/// Success payload shape. Every level is optional so a partial body still
/// decodes and the caller can decide it is malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// Raw status and body as returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid upstream endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream request failed: {0}")]
    Request(String),
}

/// Sends one completion request and hands back the raw response
///
/// Implementations never interpret the status code; that is the job of
/// `reflection::outcome::classify`.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(
        &self,
        credential: &str,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamResponse, TransportError>;
}
