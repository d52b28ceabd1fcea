//! 生成失败分类：四种失败类型及其面向用户的固定提示。
//!
//! Compose generation failure codes.
//!
//! Every failed generation resolves to exactly one of these kinds. The caller only
//! ever sees the kind's user-facing message; provider bodies and credentials stay
//! in the operator logs.
//!
//! | Code  | Name                   | Cause                                    |
//! |-------|------------------------|------------------------------------------|
//! | E1001 | validation_failed      | Malformed request                        |
//! | E1002 | configuration_missing  | No credential configured                 |
//! | E3001 | provider_unavailable   | Transport error or non-2xx response      |
//! | E3002 | empty_completion       | Provider returned no usable text         |
//!
//! ## Example
//!
//! ```rust
//! use ash_compose::error_code::FailureKind;
//!
//! let kind = FailureKind::ProviderUnavailable;
//! assert_eq!(kind.code(), "E3001");
//! assert_eq!(kind.category(), "provider");
//! ```

use std::fmt;

/// User-facing message for any provider-side failure.
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str = "AI generation failed. Please try again.";

/// User-facing message when the provider answers without usable text.
pub const EMPTY_COMPLETION_MESSAGE: &str = "AI returned empty response.";

/// Failure category for a single generation call.
///
/// There is no retryable/fatal split: every failure is terminal for the call
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// E1001: request fields missing or malformed
    ValidationFailed,
    /// E1002: no credential available for the completion provider
    ConfigurationMissing,
    /// E3001: transport failure, non-2xx status, or unreadable body
    ProviderUnavailable,
    /// E3002: provider answered but the completion was empty
    EmptyCompletion,
}

impl FailureKind {
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "E1001",
            Self::ConfigurationMissing => "E1002",
            Self::ProviderUnavailable => "E3001",
            Self::EmptyCompletion => "E3002",
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::ConfigurationMissing => "configuration_missing",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::EmptyCompletion => "empty_completion",
        }
    }

    /// Returns `"request"` for caller-side problems, `"provider"` otherwise.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ValidationFailed | Self::ConfigurationMissing => "request",
            Self::ProviderUnavailable | Self::EmptyCompletion => "provider",
        }
    }

    /// Fixed message for kinds whose text never depends on the failure detail.
    ///
    /// Validation and configuration failures carry their own message and return `None`.
    pub fn fixed_message(&self) -> Option<&'static str> {
        match self {
            Self::ProviderUnavailable => Some(PROVIDER_UNAVAILABLE_MESSAGE),
            Self::EmptyCompletion => Some(EMPTY_COMPLETION_MESSAGE),
            Self::ValidationFailed | Self::ConfigurationMissing => None,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}
