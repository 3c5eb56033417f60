//! # Storage Key Derivation
//!
//! Storage keys are derived from the submission title so operators can read
//! them, with the creation timestamp appended so repeated titles never
//! collide.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Maximum sanitized-title length, leaving room for the timestamp suffix
const MAX_TITLE_LEN: usize = 60;

const FALLBACK_NAME: &str = "untitled-paper";

fn special_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid pattern"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid pattern"))
}

/// Clean a title for filename use
///
/// Strips everything outside `[\w\s-]`, collapses whitespace runs to a
/// single `_`, lowercases, truncates, and trims stray separators. An
/// unusable title falls back to a fixed placeholder.
pub fn sanitize_title(title: &str) -> String {
    let stripped = special_chars().replace_all(title, "");
    let joined = whitespace_runs().replace_all(stripped.trim(), "_");
    // char-wise truncation: \w keeps Unicode letters, so byte truncation
    // could split a code point
    let clean: String = joined.to_lowercase().chars().take(MAX_TITLE_LEN).collect();
    let clean = clean.trim_matches('_');

    if clean.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        clean.to_string()
    }
}

/// Derive the storage key for a submission created at `at`
pub fn storage_key(title: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}.pdf", sanitize_title(title), at.timestamp_millis())
}
