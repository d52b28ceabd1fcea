use crate::error_code::FailureKind;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "request.templateSlug", "fields[2].default")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "request_validator", "catalog")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the compose generator, catalog and provider layers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote error: HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Provider returned an empty completion")]
    EmptyCompletion,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalog YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// Failure category this error surfaces as at the generator boundary.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::Validation { .. } | Error::Yaml(_) => FailureKind::ValidationFailed,
            Error::Configuration { .. } => FailureKind::ConfigurationMissing,
            Error::EmptyCompletion => FailureKind::EmptyCompletion,
            Error::Http(_) | Error::Remote { .. } | Error::Serialization(_) => {
                FailureKind::ProviderUnavailable
            }
        }
    }

    /// Message safe to hand back to the caller.
    ///
    /// Provider failures collapse to a fixed message; request-side failures keep
    /// their own text, without the structured context suffix.
    pub fn user_message(&self) -> String {
        if let Some(fixed) = self.failure_kind().fixed_message() {
            return fixed.to_string();
        }
        match self {
            Error::Configuration { message, .. } | Error::Validation { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_never_leak_body() {
        let err = Error::Remote {
            status: 401,
            body: r#"{"error":{"message":"Incorrect API key provided: sk-abc"}}"#.into(),
        };
        assert_eq!(err.failure_kind(), FailureKind::ProviderUnavailable);
        assert_eq!(err.user_message(), "AI generation failed. Please try again.");
    }

    #[test]
    fn validation_message_drops_context_suffix() {
        let err = Error::validation_with_context(
            "templateSlug must not be empty",
            ErrorContext::new()
                .with_field_path("request.templateSlug")
                .with_source("request_validator"),
        );
        assert_eq!(err.user_message(), "templateSlug must not be empty");
        assert!(err.to_string().contains("field: request.templateSlug"));
        assert_eq!(
            err.context().and_then(|c| c.source.as_deref()),
            Some("request_validator")
        );
    }

    #[test]
    fn empty_completion_message() {
        assert_eq!(
            Error::EmptyCompletion.user_message(),
            "AI returned empty response."
        );
    }
}
