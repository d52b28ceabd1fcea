//! Template field schema.

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorContext, Result};

/// One configurable field of an application template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct TemplateField {
    id: String,
    label: String,
    required: bool,
    kind: FieldKind,
}

/// Field kind with exactly the attributes that kind supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text {
        placeholder: Option<String>,
        default: Option<String>,
    },
    Number {
        placeholder: Option<String>,
        default: Option<i64>,
    },
    Select {
        options: Vec<String>,
        default: Option<String>,
    },
    Password {
        placeholder: Option<String>,
        default: Option<String>,
    },
    Toggle {
        default: bool,
    },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Number { .. } => "number",
            FieldKind::Select { .. } => "select",
            FieldKind::Password { .. } => "password",
            FieldKind::Toggle { .. } => "toggle",
        }
    }
}

impl TemplateField {
    /// Build a field, checking that the kind's attributes are consistent.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        required: bool,
        kind: FieldKind,
    ) -> Result<Self> {
        let field = Self {
            id: id.into(),
            label: label.into(),
            required,
            kind,
        };
        field.check()?;
        Ok(field)
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>, required: bool) -> Result<Self> {
        Self::new(
            id,
            label,
            required,
            FieldKind::Text {
                placeholder: None,
                default: None,
            },
        )
    }

    pub fn number(
        id: impl Into<String>,
        label: impl Into<String>,
        required: bool,
        default: Option<i64>,
    ) -> Result<Self> {
        Self::new(
            id,
            label,
            required,
            FieldKind::Number {
                placeholder: None,
                default,
            },
        )
    }

    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        required: bool,
        options: Vec<String>,
        default: Option<String>,
    ) -> Result<Self> {
        Self::new(id, label, required, FieldKind::Select { options, default })
    }

    pub fn toggle(id: impl Into<String>, label: impl Into<String>, default: bool) -> Result<Self> {
        Self::new(id, label, false, FieldKind::Toggle { default })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Text { placeholder, .. }
            | FieldKind::Number { placeholder, .. }
            | FieldKind::Password { placeholder, .. } => placeholder.as_deref(),
            FieldKind::Select { .. } | FieldKind::Toggle { .. } => None,
        }
    }

    /// Default rendered as the string a form would pre-fill.
    pub fn default_value(&self) -> Option<String> {
        match &self.kind {
            FieldKind::Text { default, .. }
            | FieldKind::Password { default, .. }
            | FieldKind::Select { default, .. } => default.clone(),
            FieldKind::Number { default, .. } => default.map(|n| n.to_string()),
            FieldKind::Toggle { default } => Some(default.to_string()),
        }
    }

    /// Check a user-supplied value against this field's kind.
    ///
    /// Emptiness is not checked here; required-ness is the template's concern.
    pub fn check_value(&self, value: &str) -> Result<()> {
        let invalid = |details: String| {
            Err(Error::validation_with_context(
                format!("{} has an invalid value", self.label),
                ErrorContext::new()
                    .with_field_path(self.id.clone())
                    .with_details(details),
            ))
        };
        match &self.kind {
            FieldKind::Number { .. } => {
                if value.trim().parse::<i64>().is_err() {
                    return invalid(format!("expected a whole number, got {:?}", value));
                }
            }
            FieldKind::Select { options, .. } => {
                if !options.iter().any(|o| o == value) {
                    return invalid(format!("expected one of {:?}, got {:?}", options, value));
                }
            }
            FieldKind::Toggle { .. } => {
                if parse_toggle(value).is_none() {
                    return invalid(format!("expected true or false, got {:?}", value));
                }
            }
            FieldKind::Text { .. } | FieldKind::Password { .. } => {}
        }
        Ok(())
    }

    fn check(&self) -> Result<()> {
        let fail = |message: &str| {
            Err(Error::validation_with_context(
                message.to_string(),
                ErrorContext::new()
                    .with_field_path(self.id.clone())
                    .with_source("template_field"),
            ))
        };
        if self.id.trim().is_empty() {
            return fail("field id must not be empty");
        }
        if self.label.trim().is_empty() {
            return fail("field label must not be empty");
        }
        if let FieldKind::Select { options, default } = &self.kind {
            if options.is_empty() {
                return fail("select field needs at least one option");
            }
            if let Some(d) = default {
                if !options.contains(d) {
                    return fail("select default must be one of the options");
                }
            }
        }
        Ok(())
    }
}

fn parse_toggle(value: &str) -> Option<bool> {
    match value.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Flat on-disk shape (`type` + optional attributes), as stored in `apps.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    id: String,
    label: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
}

impl TryFrom<RawField> for TemplateField {
    type Error = Error;

    fn try_from(raw: RawField) -> Result<Self> {
        let reject = |message: String| {
            Error::validation_with_context(
                message,
                ErrorContext::new()
                    .with_field_path(raw.id.clone())
                    .with_source("catalog"),
            )
        };
        if raw.options.is_some() && raw.kind != "select" {
            return Err(reject(format!("{} field cannot have options", raw.kind)));
        }
        let kind = match raw.kind.as_str() {
            "text" => FieldKind::Text {
                placeholder: raw.placeholder.clone(),
                default: raw.default.clone(),
            },
            "password" => FieldKind::Password {
                placeholder: raw.placeholder.clone(),
                default: raw.default.clone(),
            },
            "number" => {
                let default = match raw.default.as_deref() {
                    Some(d) => Some(
                        d.trim()
                            .parse::<i64>()
                            .map_err(|_| reject(format!("number default {:?} is not numeric", d)))?,
                    ),
                    None => None,
                };
                FieldKind::Number {
                    placeholder: raw.placeholder.clone(),
                    default,
                }
            }
            "select" => {
                if raw.placeholder.is_some() {
                    return Err(reject("select field cannot have a placeholder".into()));
                }
                FieldKind::Select {
                    options: raw.options.clone().unwrap_or_default(),
                    default: raw.default.clone(),
                }
            }
            "toggle" => {
                if raw.placeholder.is_some() {
                    return Err(reject("toggle field cannot have a placeholder".into()));
                }
                let default = match raw.default.as_deref() {
                    Some(d) => parse_toggle(d)
                        .ok_or_else(|| reject(format!("toggle default {:?} is not a boolean", d)))?,
                    None => false,
                };
                FieldKind::Toggle { default }
            }
            other => return Err(reject(format!("unknown field type {:?}", other))),
        };
        TemplateField::new(raw.id, raw.label, raw.required, kind)
    }
}

impl From<TemplateField> for RawField {
    fn from(field: TemplateField) -> Self {
        let kind = field.kind.name().to_string();
        let placeholder = field.placeholder().map(String::from);
        let default = field.default_value();
        let options = match &field.kind {
            FieldKind::Select { options, .. } => Some(options.clone()),
            _ => None,
        };
        RawField {
            id: field.id,
            label: field.label,
            kind,
            required: field.required,
            placeholder,
            default,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> std::result::Result<TemplateField, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn parses_number_with_default() {
        let f = parse("{ id: port, label: Web Port, type: number, required: true, default: '8222' }")
            .unwrap();
        assert_eq!(
            f.kind(),
            &FieldKind::Number {
                placeholder: None,
                default: Some(8222)
            }
        );
        assert_eq!(f.default_value().as_deref(), Some("8222"));
        assert!(f.required());
    }

    #[test]
    fn parses_select_and_toggle() {
        let f = parse(
            "{ id: edition, label: Edition, type: select, required: true, default: ce, options: [ce, ee] }",
        )
        .unwrap();
        assert!(matches!(f.kind(), FieldKind::Select { options, .. } if options.len() == 2));

        let t = parse("{ id: gpu, label: GPU, type: toggle, default: 'true' }").unwrap();
        assert_eq!(t.kind(), &FieldKind::Toggle { default: true });
        assert!(!t.required());
    }

    #[test]
    fn rejects_inconsistent_attributes() {
        assert!(parse("{ id: a, label: A, type: select }").is_err());
        assert!(parse("{ id: a, label: A, type: select, options: [x], default: y }").is_err());
        assert!(parse("{ id: a, label: A, type: text, options: [x] }").is_err());
        assert!(parse("{ id: a, label: A, type: number, default: eighty }").is_err());
        assert!(parse("{ id: a, label: A, type: toggle, default: maybe }").is_err());
        assert!(parse("{ id: a, label: A, type: toggle, placeholder: x }").is_err());
        assert!(parse("{ id: a, label: A, type: slider }").is_err());
        assert!(parse("{ id: '', label: A, type: text }").is_err());
    }

    #[test]
    fn check_value_by_kind() {
        let port = TemplateField::number("port", "Port", true, Some(80)).unwrap();
        assert!(port.check_value("8080").is_ok());
        assert!(port.check_value("http").is_err());

        let edition = TemplateField::select(
            "edition",
            "Edition",
            true,
            vec!["ce".into(), "ee".into()],
            None,
        )
        .unwrap();
        assert!(edition.check_value("ee").is_ok());
        assert!(edition.check_value("pro").is_err());

        let gpu = TemplateField::toggle("gpu", "GPU", false).unwrap();
        assert!(gpu.check_value("false").is_ok());
        assert!(gpu.check_value("yes").is_err());

        let name = TemplateField::text("name", "Name", false).unwrap();
        assert!(name.check_value("anything goes").is_ok());
    }

    #[test]
    fn serializes_back_to_flat_shape() {
        let f = TemplateField::toggle("signups_allowed", "Allow Signups", false).unwrap();
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["type"], "toggle");
        assert_eq!(v["default"], "false");
        assert!(v.get("options").is_none());
    }
}
