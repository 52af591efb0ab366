//! TUI module for algoviz.
//!
//! Reusable TUI application state and logic kept out of `bin/viz_tui.rs`
//! so it can be tested. The binary only does terminal I/O and drawing.

#[cfg(feature = "tui")]
pub mod viz_app;
