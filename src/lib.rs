//! # algoviz
//!
//! Step-by-step animated visualizer for textbook algorithms.
//!
//! Each problem's input is turned into an immutable sequence of snapshots
//! by a pure step generator; a playback controller walks that sequence on
//! a timer, and renderers (terminal UI, CLI, WASM) draw one frame per step.
//!
//! - 125. Valid Palindrome: two-pointer scan
//! - 269. Alien Dictionary: Kahn's topological sort
//!
//! ## Example
//!
//! ```rust
//! use algoviz::prelude::*;
//!
//! let mut session = Session::new(&VizConfig::default());
//! session.play();
//! session.tick(std::time::Duration::from_secs(2));
//! assert_eq!(session.current_step(), 1);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod demos;
pub mod error;
pub mod playback;
pub mod renderers;
pub mod session;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::{Difficulty, Problem, ProblemId};
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::demos::{
        AlgorithmStep, AlienDictionary, Palindrome, PalindromeStep, StepGenerator,
        TopologicalStep,
    };
    pub use crate::error::{VizError, VizResult};
    pub use crate::playback::{PlaybackCommand, PlaybackController, PlaybackState, Speed};
    pub use crate::renderers::{ProblemView, RenderFrame};
    pub use crate::session::{Session, StepSequence};
}

/// Re-export for public API
pub use error::{VizError, VizResult};
