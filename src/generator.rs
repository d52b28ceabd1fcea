//! Compose generator: validated request in, typed result out.
//!
//! Each [`ComposeGenerator::generate`] call runs straight through these steps:
//! validate the request, look up the credential, render the prompt, make one
//! provider call, then clean the completion text. Every failure resolves to
//! [`GenerationResult::Failure`]; nothing is retried or cached, and a repeated
//! call produces a fresh completion.

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::GeneratorConfig;
use crate::normalize::strip_code_fences;
use crate::prompt::{render_prompt, SYSTEM_PROMPT};
use crate::provider::{CompletionProvider, OpenAiProvider};
use crate::types::{ChatCompletionRequest, ChatMessage, GenerationRequest, GenerationResult};
use crate::{Error, ErrorContext, Result};

/// Stateless generator; safe to share across tasks.
pub struct ComposeGenerator<P = OpenAiProvider> {
    config: GeneratorConfig,
    provider: P,
}

impl ComposeGenerator<OpenAiProvider> {
    /// Generator backed by the OpenAI-compatible HTTP provider.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let provider = OpenAiProvider::new(&config)?;
        Ok(Self { config, provider })
    }
}

impl<P: CompletionProvider> ComposeGenerator<P> {
    pub fn with_provider(config: GeneratorConfig, provider: P) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate a compose file. Never fails: errors come back as `Failure`.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let request_id = Uuid::new_v4();
        match self.try_generate(request, request_id).await {
            Ok(result) => result,
            Err(err) => {
                self.log_failure(&err, request, request_id);
                GenerationResult::from(&err)
            }
        }
    }

    /// Same as [`generate`](Self::generate) for an untyped payload.
    pub async fn generate_json(&self, raw: serde_json::Value) -> GenerationResult {
        match GenerationRequest::from_value(raw) {
            Ok(request) => self.generate(&request).await,
            Err(err) => {
                warn!(error = %err, "rejected malformed generation request");
                GenerationResult::from(&err)
            }
        }
    }

    /// Chat-completion body for `request`.
    pub fn build_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model().to_string(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(render_prompt(request)),
            ],
            temperature: self.config.temperature(),
            max_tokens: self.config.max_tokens(),
        }
    }

    async fn try_generate(
        &self,
        request: &GenerationRequest,
        request_id: Uuid,
    ) -> Result<GenerationResult> {
        request.validate()?;

        let credential = self.config.api_key().ok_or_else(|| {
            Error::configuration_with_context(
                format!("{} API key not configured.", self.config.provider_name()),
                ErrorContext::new()
                    .with_field_path("api_key")
                    .with_source("generator"),
            )
        })?;

        let body = self.build_request(request);
        info!(
            %request_id,
            template = %request.template_slug,
            model = %body.model,
            provider = self.provider.name(),
            "requesting compose generation"
        );

        let completion = self.provider.complete(credential, &body).await?;
        let content = completion
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(Error::EmptyCompletion)?;

        let compose = strip_code_fences(&content);
        if compose.is_empty() {
            return Err(Error::EmptyCompletion);
        }

        info!(
            %request_id,
            template = %request.template_slug,
            tokens = completion.total_tokens,
            bytes = compose.len(),
            "compose generated"
        );
        Ok(GenerationResult::success(
            compose,
            body.model,
            completion.total_tokens,
        ))
    }

    fn log_failure(&self, err: &Error, request: &GenerationRequest, request_id: Uuid) {
        let kind = err.failure_kind();
        match err {
            Error::Remote { status, body } => error!(
                %request_id,
                template = %request.template_slug,
                provider = self.provider.name(),
                status,
                body = %body,
                "provider returned an error"
            ),
            Error::Http(_) | Error::Serialization(_) => error!(
                %request_id,
                template = %request.template_slug,
                provider = self.provider.name(),
                error = %err,
                "provider call failed"
            ),
            Error::Configuration { .. } => error!(
                %request_id,
                code = kind.code(),
                error = %err,
                "generation skipped"
            ),
            _ => warn!(
                %request_id,
                template = %request.template_slug,
                code = kind.code(),
                error = %err,
                "generation failed"
            ),
        }
    }
}
