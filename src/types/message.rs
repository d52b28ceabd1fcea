//! Chat-completion wire format (OpenAI-compatible).

use serde::{Deserialize, Serialize};

/// Chat message with a plain-text body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// Outbound request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Parsed non-streaming completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatCompletion {
    /// `choices[0].message.content`, if the provider sent one.
    pub content: Option<String>,
    /// `usage.total_tokens`, 0 when absent.
    pub total_tokens: u64,
}

impl ChatCompletion {
    /// Extract content and usage from a raw provider body.
    ///
    /// Missing paths are not errors here; an absent content surfaces later as an
    /// empty completion.
    pub fn from_value(body: &serde_json::Value) -> Self {
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(String::from);
        let total_tokens = body
            .pointer("/usage/total_tokens")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Self {
            content,
            total_tokens,
        }
    }
}
