//! Subscription plans and their static resource limits.
//!
//! Limits are data only: nothing in the generator consults them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorContext, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Pro,
}

/// A countable resource a plan may cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    ComposeConfigs,
    GenerationsPerHour,
}

/// Upper bound on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    Bounded(u32),
    Unlimited,
}

impl Plan {
    pub const ALL: [Plan; 2] = [Plan::Free, Plan::Pro];

    pub fn name(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
        }
    }

    pub fn limit(&self, resource: Resource) -> Limit {
        match (self, resource) {
            (Plan::Free, Resource::ComposeConfigs) => Limit::Bounded(5),
            (Plan::Free, Resource::GenerationsPerHour) => Limit::Bounded(10),
            (Plan::Pro, _) => Limit::Unlimited,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Plan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            other => Err(Error::validation_with_context(
                format!("Unknown plan: {}", other),
                ErrorContext::new().with_details("expected free or pro"),
            )),
        }
    }
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::ComposeConfigs, Resource::GenerationsPerHour];

    /// Human-readable name, e.g. "compose configs".
    pub fn label(&self) -> &'static str {
        match self {
            Resource::ComposeConfigs => "compose configs",
            Resource::GenerationsPerHour => "generations per hour",
        }
    }
}

impl Limit {
    pub fn allows(&self, current_usage: u32) -> bool {
        match self {
            Limit::Bounded(max) => current_usage < *max,
            Limit::Unlimited => true,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Bounded(n) => write!(f, "{}", n),
            Limit::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Result of an entitlement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entitlement {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub current_usage: u32,
    pub limit: Limit,
}

/// Whether one more unit of `resource` fits under `plan` given `current_usage`.
pub fn check_entitlement(plan: Plan, resource: Resource, current_usage: u32) -> Entitlement {
    let limit = plan.limit(resource);
    let allowed = limit.allows(current_usage);
    let reason = (!allowed).then(|| {
        format!(
            "You've reached the {} plan limit of {} {}. Upgrade to Pro for unlimited access.",
            plan,
            limit,
            resource.label()
        )
    });
    Entitlement {
        allowed,
        reason,
        current_usage,
        limit,
    }
}
