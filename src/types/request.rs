//! Generation request and its structural validation.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, ErrorContext, Result};

/// Input to a single compose generation.
///
/// `config_values` keys are not checked against the template's field schema here;
/// see [`crate::catalog::AppTemplate::validate_values`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub template_slug: String,
    pub template_name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_string"
    )]
    pub compose_hints: Option<String>,
    pub config_values: IndexMap<String, String>,
}

/// `composeHints` may be omitted, but an explicit `null` is a type error.
fn present_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl GenerationRequest {
    pub fn new(template_slug: impl Into<String>, template_name: impl Into<String>) -> Self {
        Self {
            template_slug: template_slug.into(),
            template_name: template_name.into(),
            compose_hints: None,
            config_values: IndexMap::new(),
        }
    }

    pub fn with_hints(mut self, hints: impl Into<String>) -> Self {
        self.compose_hints = Some(hints.into());
        self
    }

    /// Append (or overwrite, keeping its original position) one config value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_values.insert(key.into(), value.into());
        self
    }

    pub fn with_values(mut self, values: IndexMap<String, String>) -> Self {
        self.config_values = values;
        self
    }

    /// Parse an untyped payload.
    ///
    /// Wrong shapes (missing fields, a non-string config value, ...) become
    /// validation errors rather than serialization errors so that the caller gets
    /// a request-side failure.
    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        let request: Self = serde_json::from_value(raw).map_err(|e| {
            Error::validation_with_context(
                format!("Invalid generation request: {}", e),
                ErrorContext::new().with_source("request_parser"),
            )
        })?;
        request.validate()?;
        Ok(request)
    }

    /// Check the structural invariants, reporting the first violation.
    ///
    /// A slug or name made only of whitespace counts as empty.
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.template_slug, "templateSlug")?;
        require_non_empty(&self.template_name, "templateName")?;
        Ok(())
    }

    /// Hints, if present and not blank.
    pub fn hints(&self) -> Option<&str> {
        self.compose_hints
            .as_deref()
            .filter(|h| !h.trim().is_empty())
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new()
                .with_field_path(format!("request.{}", field))
                .with_source("request_validator"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_slug_is_rejected_first() {
        let req = GenerationRequest::new("", "");
        let err = req.validate().unwrap_err();
        assert_eq!(err.user_message(), "templateSlug must not be empty");
    }

    #[test]
    fn blank_name_is_rejected() {
        let req = GenerationRequest::new("gitea", "   ");
        let err = req.validate().unwrap_err();
        assert_eq!(err.user_message(), "templateName must not be empty");
    }

    #[test]
    fn from_value_preserves_insertion_order() {
        let req = GenerationRequest::from_value(json!({
            "templateSlug": "gitea",
            "templateName": "Gitea",
            "configValues": {"ssh_port": "2222", "http_port": "3000", "db_password": "pw"}
        }))
        .unwrap();
        let keys: Vec<_> = req.config_values.keys().map(String::as_str).collect();
        assert_eq!(keys, ["ssh_port", "http_port", "db_password"]);
        assert!(req.compose_hints.is_none());
    }

    #[test]
    fn from_value_rejects_non_string_values() {
        let err = GenerationRequest::from_value(json!({
            "templateSlug": "gitea",
            "templateName": "Gitea",
            "configValues": {"http_port": 3000}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.user_message().starts_with("Invalid generation request"));
    }

    #[test]
    fn from_value_rejects_missing_name() {
        let err = GenerationRequest::from_value(json!({"templateSlug": "gitea"})).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn from_value_requires_config_values() {
        let err = GenerationRequest::from_value(json!({
            "templateSlug": "gitea",
            "templateName": "Gitea"
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.user_message().contains("configValues"));

        let req = GenerationRequest::from_value(json!({
            "templateSlug": "gitea",
            "templateName": "Gitea",
            "configValues": {}
        }))
        .unwrap();
        assert!(req.config_values.is_empty());
    }

    #[test]
    fn from_value_rejects_null_hints() {
        let err = GenerationRequest::from_value(json!({
            "templateSlug": "gitea",
            "templateName": "Gitea",
            "composeHints": null,
            "configValues": {}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let req = GenerationRequest::from_value(json!({
            "templateSlug": "gitea",
            "templateName": "Gitea",
            "composeHints": "Use gitea/gitea image.",
            "configValues": {}
        }))
        .unwrap();
        assert_eq!(req.hints(), Some("Use gitea/gitea image."));
    }

    #[test]
    fn blank_hints_are_treated_as_absent() {
        let req = GenerationRequest::new("a", "A").with_hints("  \n");
        assert!(req.hints().is_none());
        let req = GenerationRequest::new("a", "A").with_hints("Single container.");
        assert_eq!(req.hints(), Some("Single container."));
    }
}
