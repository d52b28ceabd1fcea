//! Generator configuration.
//!
//! Everything the generator reads from the outside world lives here and is passed
//! in at construction. [`GeneratorConfig::from_env`] is the only place that touches
//! process environment variables:
//!
//! | Variable                | Default                  |
//! |-------------------------|--------------------------|
//! | `OPENAI_API_KEY`        | none (required to generate) |
//! | `ASH_AI_MODEL`          | `gpt-4.1-mini`           |
//! | `ASH_AI_BASE_URL`       | `https://api.openai.com` |
//! | `ASH_HTTP_TIMEOUT_SECS` | `60`                     |

use std::env;
use std::fmt;
use std::time::Duration;

use crate::{Error, ErrorContext, Result};

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_ENDPOINT_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_PROVIDER_NAME: &str = "OpenAI";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Immutable configuration shared by every generation call.
#[derive(Clone)]
pub struct GeneratorConfig {
    provider_name: String,
    api_key: Option<String>,
    model: String,
    base_url: String,
    endpoint_path: String,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
}

impl GeneratorConfig {
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Build a configuration from `OPENAI_API_KEY` / `ASH_AI_*` environment variables.
    ///
    /// A missing key is not an error here; generation reports it per call.
    pub fn from_env() -> Result<Self> {
        let mut builder = GeneratorConfigBuilder::new();
        if let Some(key) = non_empty_env("OPENAI_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Some(model) = non_empty_env("ASH_AI_MODEL") {
            builder = builder.model(model);
        }
        if let Some(url) = non_empty_env("ASH_AI_BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Some(raw) = non_empty_env("ASH_HTTP_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                Error::configuration_with_context(
                    format!("Invalid timeout: {}", raw),
                    ErrorContext::new()
                        .with_field_path("ASH_HTTP_TIMEOUT_SECS")
                        .with_details("expected a whole number of seconds"),
                )
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Credential, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_path(&self) -> &str {
        &self.endpoint_path
    }

    /// Full chat-completion URL.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint_path)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Copy of this configuration with a different model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("provider_name", &self.provider_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("endpoint_path", &self.endpoint_path)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct GeneratorConfigBuilder {
    provider_name: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    endpoint_path: Option<String>,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
}

impl GeneratorConfigBuilder {
    pub fn new() -> Self {
        Self {
            provider_name: None,
            api_key: None,
            model: None,
            base_url: None,
            endpoint_path: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Display name used in the "API key not configured" message.
    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<GeneratorConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base_url.clone()),
            )
        })?;
        let endpoint_path = self
            .endpoint_path
            .unwrap_or_else(|| DEFAULT_ENDPOINT_PATH.to_string());
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{}", endpoint_path)
        };
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::configuration(format!(
                "Temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(Error::configuration("max_tokens must be greater than zero"));
        }
        Ok(GeneratorConfig {
            provider_name: self
                .provider_name
                .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string()),
            api_key: self.api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
            endpoint_path,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self.timeout,
        })
    }
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
