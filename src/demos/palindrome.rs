//! Valid Palindrome (problem 125): two-pointer scan.
//!
//! The raw input is cleaned (ASCII alphanumerics only, lowercased) and two
//! pointers walk inward from both ends. Each comparison, each pointer move
//! that leaves work to do, and the final verdict are recorded as steps.
//!
//! For a cleaned string of length `n` the sequence length is
//! `1 + comparisons + non-final moves + 1`, which [`step_count`] computes
//! without materializing the steps.

use serde::{Deserialize, Serialize};

use super::engine::{AlgorithmStep, StepGenerator};

/// Source listing shown next to the animation.
pub const LISTING: &str = r"fn is_palindrome(s: &str) -> bool {
    let cleaned: Vec<char> = s
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let (mut left, mut right) = (0, cleaned.len().saturating_sub(1));
    while left < right {
        if cleaned[left] != cleaned[right] {
            return false;
        }
        left += 1;
        right -= 1;
    }

    true
}";

/// Zero-based lines of [`LISTING`] that steps highlight.
pub mod lines {
    /// Pointer initialization.
    pub const START: usize = 7;
    /// Character comparison.
    pub const COMPARE: usize = 9;
    /// Early `return false`.
    pub const RETURN_FALSE: usize = 10;
    /// Pointers move inward.
    pub const ADVANCE: usize = 12;
    /// Final `true`.
    pub const RETURN_TRUE: usize = 16;
}

/// What a palindrome step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PalindromeStepKind {
    /// Pointers placed at both ends of the cleaned string.
    Start,
    /// The two pointed-at characters are compared.
    Compare,
    /// A comparison failed; the scan stops.
    Mismatch,
    /// Both pointers moved one position inward.
    Advance,
    /// Every pair matched.
    Success,
}

/// One snapshot of the two-pointer scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalindromeStep {
    /// What this step records.
    pub kind: PalindromeStepKind,
    /// Left pointer; cleared on the success step.
    pub left: Option<usize>,
    /// Right pointer; absent for an empty cleaned string and on success.
    pub right: Option<usize>,
    /// True only while a comparison is shown.
    pub comparing: bool,
    /// Character under the left pointer.
    pub left_char: Option<char>,
    /// Character under the right pointer.
    pub right_char: Option<char>,
    /// Outcome of the latest comparison; `None` before any comparison.
    pub is_match: Option<bool>,
    /// Narration.
    pub message: String,
    /// Line of [`LISTING`] to highlight.
    pub highlight_line: usize,
}

impl AlgorithmStep for PalindromeStep {
    fn message(&self) -> &str {
        &self.message
    }

    fn highlight_line(&self) -> usize {
        self.highlight_line
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            PalindromeStepKind::Mismatch | PalindromeStepKind::Success
        )
    }
}

/// Lowercase `raw` and drop everything that is not an ASCII letter or digit.
#[must_use]
pub fn clean(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Generate the full step sequence for `raw`.
///
/// Total over all inputs: an input with no alphanumerics yields the start
/// step followed immediately by success.
#[must_use]
pub fn generate_steps(raw: &str) -> Vec<PalindromeStep> {
    let cleaned_str = clean(raw);
    let cleaned: Vec<char> = cleaned_str.chars().collect();
    let mut steps = Vec::with_capacity(cleaned.len() + 2);

    steps.push(PalindromeStep {
        kind: PalindromeStepKind::Start,
        left: Some(0),
        right: cleaned.len().checked_sub(1),
        comparing: false,
        left_char: cleaned.first().copied(),
        right_char: cleaned.last().copied(),
        is_match: None,
        message: format!("Cleaned string: \"{cleaned_str}\". Starting with two pointers."),
        highlight_line: lines::START,
    });

    if let Some(mut right) = cleaned.len().checked_sub(1) {
        let mut left = 0;
        while left < right {
            let (l, r) = (cleaned[left], cleaned[right]);
            let is_match = l == r;
            let verdict = if is_match {
                "Match!"
            } else {
                "No match - not a palindrome"
            };
            steps.push(PalindromeStep {
                kind: PalindromeStepKind::Compare,
                left: Some(left),
                right: Some(right),
                comparing: true,
                left_char: Some(l),
                right_char: Some(r),
                is_match: Some(is_match),
                message: format!("Comparing '{l}' and '{r}': {verdict}"),
                highlight_line: lines::COMPARE,
            });

            if !is_match {
                steps.push(PalindromeStep {
                    kind: PalindromeStepKind::Mismatch,
                    left: Some(left),
                    right: Some(right),
                    comparing: false,
                    left_char: Some(l),
                    right_char: Some(r),
                    is_match: Some(false),
                    message: "Characters don't match. Return false.".to_string(),
                    highlight_line: lines::RETURN_FALSE,
                });
                return steps;
            }

            left += 1;
            right -= 1;

            if left < right {
                steps.push(PalindromeStep {
                    kind: PalindromeStepKind::Advance,
                    left: Some(left),
                    right: Some(right),
                    comparing: false,
                    left_char: Some(cleaned[left]),
                    right_char: Some(cleaned[right]),
                    is_match: Some(true),
                    message: "Characters match! Move pointers inward.".to_string(),
                    highlight_line: lines::ADVANCE,
                });
            }
        }
    }

    steps.push(PalindromeStep {
        kind: PalindromeStepKind::Success,
        left: None,
        right: None,
        comparing: false,
        left_char: None,
        right_char: None,
        is_match: Some(true),
        message: "All characters checked. It's a palindrome!".to_string(),
        highlight_line: lines::RETURN_TRUE,
    });

    steps
}

/// Length of [`generate_steps`]`(raw)` without building the steps.
#[must_use]
pub fn step_count(raw: &str) -> usize {
    // Cleaned text is pure ASCII, so byte and char indices coincide.
    let cleaned = clean(raw).into_bytes();
    let mut count = 2;
    let mut left = 0;
    let mut right = cleaned.len().saturating_sub(1);

    while left < right {
        count += 1;
        if cleaned[left] != cleaned[right] {
            return count;
        }
        left += 1;
        right -= 1;
        if left < right {
            count += 1;
        }
    }

    count
}

/// Whether `raw` reads the same both ways after cleaning.
#[must_use]
pub fn is_palindrome(raw: &str) -> bool {
    let cleaned = clean(raw).into_bytes();
    cleaned.iter().eq(cleaned.iter().rev())
}

/// Step generator for the Valid Palindrome visualizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palindrome;

impl StepGenerator for Palindrome {
    type Input = str;
    type Step = PalindromeStep;

    const LISTING: &'static str = LISTING;

    fn generate(input: &str) -> Vec<PalindromeStep> {
        generate_steps(input)
    }

    fn step_count(input: &str) -> usize {
        step_count(input)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: closed-form count equals the generated length.
        #[test]
        fn prop_step_count_matches(raw in ".{0,40}") {
            prop_assert_eq!(step_count(&raw), generate_steps(&raw).len());
        }

        /// Property: count = 1 + comparisons + non-final moves + 1.
        #[test]
        fn prop_count_decomposition(raw in "[a-c ,]{0,30}") {
            let steps = generate_steps(&raw);
            let compares = steps.iter().filter(|s| s.kind == PalindromeStepKind::Compare).count();
            let moves = steps.iter().filter(|s| s.kind == PalindromeStepKind::Advance).count();
            prop_assert_eq!(steps.len(), 1 + compares + moves + 1);
        }

        /// Property: exactly one terminal step, and it is last.
        #[test]
        fn prop_single_terminal(raw in "[a-b]{0,20}") {
            let steps = generate_steps(&raw);
            let terminals = steps.iter().filter(|s| s.is_terminal()).count();
            prop_assert_eq!(terminals, 1);
            prop_assert!(steps.last().is_some_and(AlgorithmStep::is_terminal));
        }

        /// Property: the window shrinks by one on each side per comparison.
        #[test]
        fn prop_window_shrinks(raw in "[a-b]{0,20}") {
            let steps = generate_steps(&raw);
            let compares: Vec<_> = steps
                .iter()
                .filter(|s| s.kind == PalindromeStepKind::Compare)
                .collect();
            for pair in compares.windows(2) {
                prop_assert_eq!(pair[1].left, pair[0].left.map(|l| l + 1));
                prop_assert_eq!(pair[1].right, pair[0].right.map(|r| r - 1));
            }
        }

        /// Property: the verdict agrees with a direct palindrome check.
        #[test]
        fn prop_verdict_matches(raw in "[a-cA-C0-9 ]{0,20}") {
            let steps = generate_steps(&raw);
            let verdict = steps.last().and_then(|s| s.is_match);
            prop_assert_eq!(verdict, Some(is_palindrome(&raw)));
        }
    }
}
