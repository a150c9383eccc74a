//! Structured test cases and the synthesizer that derives them from
//! requirement lines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Requirements shorter than this are treated as noise, not requirements.
const MIN_REQUIREMENT_CHARS: usize = 5;
/// Action-phrase length carried into summaries and expected results.
const ACTION_PREVIEW_CHARS: usize = 100;

/// Keywords that introduce an action phrase, checked in this order.
const ACTION_KEYWORDS: [&str; 3] = ["verify", "should", "must"];

/// Priority of a test case, using the remote system's spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Must-pass verification.
    High,
    /// Default remote priority.
    Medium,
    /// Nice-to-have verification.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("High"),
            Self::Medium => f.write_str("Medium"),
            Self::Low => f.write_str("Low"),
        }
    }
}

/// Category of a test case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseType {
    /// The only category the synthesizer produces.
    #[default]
    Functional,
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Functional => f.write_str("Functional"),
        }
    }
}

/// A structured, steps-based verification procedure derived from one
/// requirement. Belongs to exactly one ticket for the duration of a
/// publish run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Sequence-generated identifier, `TC_001` style, scoped to one run.
    pub id: String,
    /// Short description of what the case verifies.
    pub summary: String,
    /// Case category.
    #[serde(rename = "type")]
    pub case_type: CaseType,
    /// Case priority.
    pub priority: Priority,
    /// Ordered procedure steps.
    pub steps: Vec<String>,
    /// What the system is expected to do.
    pub expected_result: String,
}

/// Synthesizes one test case per surviving requirement.
///
/// Requirements shorter than 5 characters are dropped. Output ordering
/// matches input ordering, and identifiers are assigned sequentially
/// within this call.
#[must_use]
pub fn synthesize(requirements: &[String]) -> Vec<TestCase> {
    let mut cases = Vec::new();
    for requirement in requirements {
        if requirement.chars().count() < MIN_REQUIREMENT_CHARS {
            continue;
        }
        let action = derive_action(requirement);
        let preview = clip(action, ACTION_PREVIEW_CHARS);
        cases.push(TestCase {
            id: format!("TC_{:03}", cases.len() + 1),
            summary: format!("Verify {preview}..."),
            case_type: CaseType::Functional,
            priority: Priority::High,
            steps: vec![
                "Access the system".to_string(),
                "Navigate to the relevant section".to_string(),
                format!("Perform {action}"),
                "Verify the system's response".to_string(),
            ],
            expected_result: format!("The system should successfully handle {preview}..."),
        });
    }
    cases
}

/// Derives the action phrase of a requirement.
///
/// The text after the first case-insensitive occurrence of `verify`,
/// `should`, or `must` (fixed precedence), or the whole requirement when
/// no keyword is present.
fn derive_action(requirement: &str) -> &str {
    let lowered = requirement.to_lowercase();
    for keyword in ACTION_KEYWORDS {
        if let Some(position) = lowered.find(keyword) {
            // Index back into the original text; lowercasing can shift
            // byte offsets for some characters, so fall through rather
            // than slice out of bounds.
            if let Some(rest) = requirement.get(position + keyword.len()..) {
                return rest.trim();
            }
        }
    }
    requirement.trim()
}

/// Truncates to at most `limit` characters on a char boundary.
pub(crate) fn clip(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
