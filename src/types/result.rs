//! Generation outcome.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Outcome of one generation call. Exactly one variant per response; no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    Success {
        /// Cleaned compose YAML.
        compose: String,
        model: String,
        /// Provider-reported total token usage.
        tokens: u64,
    },
    Failure {
        /// Human-readable message, safe to show to end users.
        error: String,
    },
}

impl GenerationResult {
    pub fn success(compose: impl Into<String>, model: impl Into<String>, tokens: u64) -> Self {
        GenerationResult::Success {
            compose: compose.into(),
            model: model.into(),
            tokens,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        GenerationResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }

    pub fn compose(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { compose, .. } => Some(compose),
            GenerationResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationResult::Failure { error } => Some(error),
            GenerationResult::Success { .. } => None,
        }
    }
}

impl From<&Error> for GenerationResult {
    fn from(err: &Error) -> Self {
        GenerationResult::failure(err.user_message())
    }
}
