//! Prompt rendering for compose generation.
//!
//! Rendering is pure: the same request always yields the same prompt text.

use std::fmt::Write as _;

use crate::types::GenerationRequest;

/// System instruction sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "You are a Docker Compose expert. Output only valid YAML.";

/// Heading of the optional hints block.
pub const APP_REQUIREMENTS_HEADING: &str = "App requirements:";

const RULES: &[&str] = &[
    "Use named volumes (not bind mounts) unless the user specified paths",
    "Include health checks for critical services",
    "Set restart: unless-stopped on all services",
    "Use specific image tags, not :latest",
    "Include comments explaining non-obvious configuration",
    "Output ONLY valid YAML, no markdown fencing",
];

/// Render the user prompt for `request`.
///
/// Config values are listed as `- key: value` in insertion order. The
/// "App requirements" block only appears when the request carries non-blank hints.
/// Without it, two blank lines separate the config block from `Rules:`.
pub fn render_prompt(request: &GenerationRequest) -> String {
    let mut out = String::with_capacity(512);

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "You are a Docker Compose expert. Generate a production-ready docker-compose.yml for {}.",
        request.template_name
    );
    out.push('\n');

    out.push_str("User configuration:\n");
    for (i, (key, value)) in request.config_values.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "- {}: {}", key, value);
    }
    out.push_str("\n\n");

    if let Some(hints) = request.hints() {
        out.push_str(APP_REQUIREMENTS_HEADING);
        out.push('\n');
        out.push_str(hints);
        out.push('\n');
    }

    out.push_str("\nRules:");
    for rule in RULES {
        out.push_str("\n- ");
        out.push_str(rule);
    }
    out
}
