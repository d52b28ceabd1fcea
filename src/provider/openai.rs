//! OpenAI-compatible chat-completion client.

use async_trait::async_trait;
use tracing::debug;

use super::CompletionProvider;
use crate::config::GeneratorConfig;
use crate::types::{ChatCompletion, ChatCompletionRequest};
use crate::{Error, Result};

/// Works for OpenAI and any endpoint speaking the same `/chat/completions` format.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    http_client: reqwest::Client,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        credential: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(credential)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = serde_json::from_str(&body)?;
        let completion = ChatCompletion::from_value(&json);
        debug!(
            status = status.as_u16(),
            total_tokens = completion.total_tokens,
            has_content = completion.content.is_some(),
            "chat completion received"
        );
        Ok(completion)
    }
}
