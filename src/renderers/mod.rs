//! Renderer-agnostic frames and their front ends.
//!
//! # Architecture
//!
//! ```text
//! Session (problem, inputs, steps, playback)
//!       ↓
//! ┌─────────────────────┐
//! │     RenderFrame     │
//! │ (pure, serialisable)│
//! └─────────────────────┘
//!    ↓        ↓        ↓
//!   TUI      CLI     WASM
//! ```

pub mod frame;
pub mod wasm;

pub use frame::{
    AlienView, Cell, CodeLine, Comparison, Node, NodeStatus, PalindromeView, PointerRole,
    ProblemView, RenderFrame,
};
pub use wasm::VisualizerRunner;
#[cfg(feature = "wasm")]
pub use wasm::WasmVisualizer;
