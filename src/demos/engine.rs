//! Shared shape of the step generators.
//!
//! Every visualized algorithm is a pure function from its input to an
//! ordered, immutable sequence of snapshots. Renderers (TUI, WASM, CLI)
//! only ever index into that sequence, so two runs over the same input
//! must produce identical sequences.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use crate::error::VizResult;

/// A single recorded snapshot of an algorithm's state.
pub trait AlgorithmStep: Clone + Debug + PartialEq + Serialize + DeserializeOwned {
    /// Narration shown next to the visualization.
    fn message(&self) -> &str;

    /// Zero-based line of the paired source listing to highlight.
    fn highlight_line(&self) -> usize;

    /// Whether this step ends the sequence (success, failure or invalid input).
    fn is_terminal(&self) -> bool;
}

/// A deterministic generator of step sequences.
///
/// # Example
///
/// ```
/// use algoviz::demos::{Palindrome, StepGenerator};
///
/// let steps = Palindrome::generate("Madam");
/// assert_eq!(steps.len(), Palindrome::step_count("Madam"));
/// ```
pub trait StepGenerator {
    /// Input the generator consumes.
    type Input: ?Sized;

    /// Snapshot type the generator records.
    type Step: AlgorithmStep;

    /// Source listing whose lines the steps highlight.
    const LISTING: &'static str;

    /// Produce the full step sequence for `input`.
    fn generate(input: &Self::Input) -> Vec<Self::Step>;

    /// Number of steps `generate` would produce.
    fn step_count(input: &Self::Input) -> usize {
        Self::generate(input).len()
    }
}

/// Blake3 digest of a serialized step sequence.
///
/// Two sequences with the same checksum are field-for-field identical,
/// which is what replay across renderers relies on.
///
/// # Errors
///
/// Returns `VizError::Serialization` if a step cannot be serialized.
pub fn sequence_checksum<S: Serialize>(steps: &[S]) -> VizResult<String> {
    let bytes = serde_json::to_vec(steps)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}
