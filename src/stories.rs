//! Splitting a model-drafted completion into individual test-case texts.
//!
//! The free-text drafting flow sends a user story through the LLM port
//! and gets back one block of prose. Case boundaries are lines starting
//! with `Test Case` or `TC<number>`; everything between two boundaries is
//! one case.

use std::sync::OnceLock;

use regex::Regex;

fn boundary_pattern() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"(?m)^(?:Test Case|TC\d+)").expect("hardcoded pattern is valid"))
}

/// Splits a completion into individual test-case texts.
///
/// Text before the first boundary is kept as its own entry when present,
/// so a completion with no recognizable boundaries yields itself as a
/// single case. Blank segments are dropped.
#[must_use]
pub fn parse_cases(completion: &str) -> Vec<String> {
    let mut starts: Vec<usize> =
        boundary_pattern().find_iter(completion).map(|found| found.start()).collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }
    starts.push(completion.len());

    let mut cases = Vec::new();
    for window in starts.windows(2) {
        let segment = completion[window[0]..window[1]].trim();
        if !segment.is_empty() {
            cases.push(segment.to_string());
        }
    }
    cases
}

#[cfg(test)]
mod tests {
    use super::parse_cases;

    #[test]
    fn splits_on_test_case_headings() {
        let completion = "Test Case 1: Login\nSteps here\nTest Case 2: Logout\nMore steps";
        let cases = parse_cases(completion);
        assert_eq!(cases.len(), 2);
        assert!(cases[0].starts_with("Test Case 1"));
        assert!(cases[1].starts_with("Test Case 2"));
    }

    #[test]
    fn splits_on_tc_number_headings() {
        let completion = "TC1: first\ndetail\nTC2: second";
        let cases = parse_cases(completion);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1], "TC2: second");
    }

    #[test]
    fn keeps_preamble_before_first_boundary() {
        let completion = "Here are the cases:\nTest Case 1: Login";
        let cases = parse_cases(completion);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0], "Here are the cases:");
    }

    #[test]
    fn completion_without_boundaries_is_a_single_case() {
        let cases = parse_cases("just one freeform block of text");
        assert_eq!(cases, vec!["just one freeform block of text"]);
    }

    #[test]
    fn empty_completion_yields_nothing() {
        assert!(parse_cases("").is_empty());
        assert!(parse_cases("   \n  ").is_empty());
    }
}
