//! Application template.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::field::TemplateField;
use crate::types::GenerationRequest;
use crate::{Error, ErrorContext, Result};

/// External references for a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One self-hostable application in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppTemplate {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub emoji: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fields: Vec<TemplateField>,
    pub compose_hints: String,
    #[serde(default)]
    pub links: TemplateLinks,
}

impl AppTemplate {
    pub fn field(&self, id: &str) -> Option<&TemplateField> {
        self.fields.iter().find(|f| f.id() == id)
    }

    /// Pre-filled form values: every field that declares a default, in field order.
    pub fn default_values(&self) -> IndexMap<String, String> {
        self.fields
            .iter()
            .filter_map(|f| f.default_value().map(|d| (f.id().to_string(), d)))
            .collect()
    }

    /// Check user values against the field schema, reporting the first problem.
    pub fn validate_values(&self, values: &IndexMap<String, String>) -> Result<()> {
        for key in values.keys() {
            if self.field(key).is_none() {
                return Err(Error::validation_with_context(
                    format!("{} has no field named {}", self.name, key),
                    ErrorContext::new()
                        .with_field_path(key.clone())
                        .with_source(self.slug.clone()),
                ));
            }
        }
        for field in &self.fields {
            match values.get(field.id()).filter(|v| !v.trim().is_empty()) {
                Some(value) => field.check_value(value)?,
                None if field.required() => {
                    return Err(Error::validation_with_context(
                        format!("{} is required", field.label()),
                        ErrorContext::new()
                            .with_field_path(field.id().to_string())
                            .with_source(self.slug.clone()),
                    ));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Generation request for this template with the given field values.
    pub fn to_request(&self, values: IndexMap<String, String>) -> GenerationRequest {
        GenerationRequest::new(&self.slug, &self.name)
            .with_hints(&self.compose_hints)
            .with_values(values)
    }

    /// Case-insensitive substring match on name, description and tags.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.slug.trim().is_empty() || self.name.trim().is_empty() {
            return Err(Error::validation_with_context(
                "template slug and name must not be empty",
                ErrorContext::new().with_source("catalog"),
            ));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.id()) {
                return Err(Error::validation_with_context(
                    format!("duplicate field id {}", field.id()),
                    ErrorContext::new()
                        .with_field_path(field.id().to_string())
                        .with_source(self.slug.clone()),
                ));
            }
        }
        Ok(())
    }
}
