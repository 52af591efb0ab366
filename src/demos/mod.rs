//! Algorithm step generators.
//!
//! Each visualized problem turns its input into an ordered, immutable
//! sequence of snapshots. The sequence is regenerated wholesale whenever the
//! input changes; renderers only index into it.
//!
//! # Demos
//!
//! 1. [`palindrome`] - Valid Palindrome, two-pointer scan
//! 2. [`alien_dictionary`] - Alien Dictionary, Kahn's topological sort

pub mod alien_dictionary;
pub mod engine;
pub mod palindrome;

// Re-exports for convenience
pub use alien_dictionary::{
    AlienDictionary, AlienOutcome, Graph, InDegree, TopologicalStep, TopologicalStepKind,
};
pub use engine::{sequence_checksum, AlgorithmStep, StepGenerator};
pub use palindrome::{Palindrome, PalindromeStep, PalindromeStepKind};
