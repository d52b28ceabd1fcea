//! 应用模板目录：内置的自托管应用模板及其字段定义。
//!
//! Built-in application catalog.
//!
//! The catalog ships inside the binary as `apps.yaml` and is parsed once with
//! [`Catalog::builtin`]. Field definitions are validated while parsing, so a
//! loaded catalog only holds well-formed templates.

mod field;
mod template;

use std::collections::{BTreeSet, HashSet};

use crate::{Error, ErrorContext, Result};

pub use field::{FieldKind, TemplateField};
pub use template::{AppTemplate, TemplateLinks};

const BUILTIN_CATALOG: &str = include_str!("apps.yaml");

/// Ordered, read-only collection of templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<AppTemplate>,
}

impl Catalog {
    /// Parse the catalog embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Parse a catalog document (a YAML list of templates).
    pub fn from_yaml(content: &str) -> Result<Self> {
        let templates: Vec<AppTemplate> = serde_yaml::from_str(content)?;
        Self::new(templates)
    }

    pub fn new(templates: Vec<AppTemplate>) -> Result<Self> {
        let mut slugs = HashSet::new();
        for template in &templates {
            template.check()?;
            if !slugs.insert(template.slug.as_str()) {
                return Err(Error::validation_with_context(
                    format!("duplicate template slug {}", template.slug),
                    ErrorContext::new().with_source("catalog"),
                ));
            }
        }
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[AppTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&AppTemplate> {
        self.templates.iter().find(|t| t.slug == slug)
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.templates
            .iter()
            .map(|t| t.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a AppTemplate> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// Templates whose name, description or tags contain `term` (case-insensitive).
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a AppTemplate> {
        self.templates.iter().filter(move |t| t.matches(term))
    }
}
