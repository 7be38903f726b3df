//! Evidence classifier for posted messages.
//!
//! Decides whether a message makes a claim without supporting evidence.
//! The verdict is stored on the post at creation time and read again by the
//! evidence rule, so both call sites share this one function.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MIN_CLAIM_CHARS;

/// Substrings whose presence counts as evidence-like content.
const EVIDENCE_KEYWORDS: &[&str] = &[
    "because",
    "research",
    "study",
    "data",
    "evidence",
    "shows",
    "according to",
    "http://",
    "https://",
    "for example",
    "for instance",
    "e.g.",
];

/// Citation forms: bracketed numeric citation, parenthesized 4-digit year,
/// DOI marker.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static CITATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]|\(\d{4}\)|doi:").unwrap());

/// Returns `true` when `text` reads like an unsupported claim.
///
/// Pure, no I/O. All checks run on the lower-cased, trimmed text, in order:
/// empty text, questions, digits, evidence keywords, and citation patterns
/// are all exempt; what remains is flagged iff it is at least
/// [`MIN_CLAIM_CHARS`] characters long.
#[must_use]
pub fn lacks_evidence(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return false;
    }
    if text.contains('?') {
        return false;
    }
    if text.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if EVIDENCE_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return false;
    }
    if CITATION_REGEX.is_match(&text) {
        return false;
    }
    text.chars().count() >= MIN_CLAIM_CHARS
}
