//! Completion text normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\A```(?:ya?ml)?[ \t]*(?:\r?\n|\z)").expect("leading fence pattern is valid")
});

static TRAILING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n)?```\z").expect("trailing fence pattern is valid"));

/// Strip one surrounding markdown code fence and trim whitespace.
///
/// Handles a leading ```` ``` ````, ```` ```yaml ```` or ```` ```yml ```` marker
/// (case-insensitive) and a single trailing ```` ``` ````. Text without fences is
/// only trimmed, so cleaning already-clean text is a no-op.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_leading = LEADING_FENCE.replace(trimmed, "");
    let without_trailing = TRAILING_FENCE.replace(&without_leading, "");
    without_trailing.trim().to_string()
}
