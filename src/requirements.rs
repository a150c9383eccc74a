//! Requirement extraction from raw ticket descriptions.
//!
//! Descriptions arrive with HTML fragments, tracker panel markers, and
//! markdown-style bullets mixed in. Extraction is a pure, deterministic
//! cleanup pass: no parsing of nested markup, just line-level stripping.

use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("hardcoded pattern is valid"))
}

/// Extracts discrete requirement lines from a ticket description.
///
/// Strips HTML-style tags and `{panel}` markers, splits on line
/// boundaries, trims, drops blanks and duplicates, and removes leading
/// list/heading markers (`#`, `*`, `-`, spaces) in a single pass per
/// line. If nothing survives but the cleaned description is non-empty,
/// the whole cleaned description is returned as a single requirement.
#[must_use]
pub fn extract(description: &str) -> Vec<String> {
    let cleaned = strip_markup(description);

    let mut requirements: Vec<String> = Vec::new();
    for line in cleaned.lines() {
        let line = line.trim().trim_start_matches(['#', '*', '-', ' ']).trim();
        if line.is_empty() {
            continue;
        }
        if !requirements.iter().any(|seen| seen == line) {
            requirements.push(line.to_string());
        }
    }

    if requirements.is_empty() {
        let fallback = cleaned.trim();
        if fallback.is_empty() {
            return Vec::new();
        }
        return vec![fallback.to_string()];
    }

    requirements
}

/// Removes HTML-style tags and tracker panel delimiters.
fn strip_markup(description: &str) -> String {
    let without_tags = tag_pattern().replace_all(description, "");
    without_tags.replace("{panel}", "").replace("{/panel}", "")
}
