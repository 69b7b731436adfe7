//! Text normalization applied before any structural analysis.

use regex::Regex;
use std::sync::LazyLock;

/// A whole line holding only a page marker: "Page 3" or "page 3 of 10".
///
/// Gaps are any whitespace except a newline, so a marker can never span lines.
static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[^\S\n]*page[^\S\n]+[0-9]+[^\S\n]*(?:of[^\S\n]+[0-9]+)?[^\S\n]*$").unwrap()
});

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Strip page-number lines and collapse redundant whitespace.
///
/// Idempotent: normalizing already normalized text returns it unchanged.
pub fn normalize(text: &str) -> String {
    let text = PAGE_MARKER.replace_all(text, "");
    let text = NEWLINE_RUNS.replace_all(&text, "\n\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}
