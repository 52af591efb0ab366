//! Browser binding for the session.
//!
//! wasm-bindgen cannot export Rust enums with data or borrowed results, so
//! the browser talks to a [`VisualizerRunner`] through plain numbers,
//! strings and JSON frames. The runner itself is target-independent and
//! tested natively; [`WasmVisualizer`] is the thin exported wrapper.

use std::time::Duration;

use crate::config::VizConfig;
use crate::error::VizResult;
use crate::playback::Speed;
use crate::renderers::RenderFrame;
use crate::session::Session;

/// JSON-facing driver around a [`Session`].
#[derive(Debug, Clone, Default)]
pub struct VisualizerRunner {
    session: Session,
}

impl VisualizerRunner {
    /// Create a runner with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns error if YAML parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config = VizConfig::from_yaml(yaml)?;
        Ok(Self {
            session: Session::new(&config),
        })
    }

    /// Underlying session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Start playback.
    pub fn play(&mut self) {
        self.session.play();
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.session.pause();
    }

    /// Toggle playback. Returns the new play flag.
    pub fn toggle(&mut self) -> bool {
        self.session.toggle();
        self.session.playback().is_playing()
    }

    /// Back to the first step.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// One step back.
    pub fn step_back(&mut self) {
        self.session.step_back();
    }

    /// One step forward.
    pub fn step_forward(&mut self) {
        self.session.step_forward();
    }

    /// Set the speed multiplier.
    ///
    /// # Errors
    ///
    /// Returns `VizError::InvalidSpeed` if off the 0.5 grid or out of range.
    pub fn set_speed(&mut self, speed: f64) -> VizResult<()> {
        self.session.set_speed(Speed::new(speed)?);
        Ok(())
    }

    /// Feed elapsed milliseconds from `requestAnimationFrame`.
    ///
    /// Negative or non-finite values are ignored. Returns the number of
    /// steps advanced.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tick(&mut self, elapsed_ms: f64) -> usize {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        // Whole microseconds keep repeated frame deltas from drifting.
        let micros = (elapsed_ms * 1000.0).round() as u64;
        self.session.tick(Duration::from_micros(micros))
    }

    /// Select a problem by number.
    ///
    /// # Errors
    ///
    /// Returns `VizError::UnknownProblem` for numbers not in the catalog.
    pub fn select_problem(&mut self, number: u32) -> VizResult<()> {
        self.session.select_problem_number(number)
    }

    /// Replace the active problem's input.
    pub fn set_input(&mut self, text: &str) {
        self.session.set_input(text);
    }

    /// Load a preset of the active problem.
    pub fn apply_preset(&mut self, index: usize) -> bool {
        self.session.apply_preset(index)
    }

    /// Current frame.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        self.session.frame()
    }

    /// Current frame as JSON, `"{}"` if serialization fails.
    #[must_use]
    pub fn frame_json(&self) -> String {
        self.frame()
            .to_json()
            .unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(feature = "wasm")]
mod bindings {
    use super::VisualizerRunner;
    use wasm_bindgen::prelude::*;

    /// Browser-exported visualizer.
    #[wasm_bindgen]
    pub struct WasmVisualizer {
        inner: VisualizerRunner,
    }

    #[wasm_bindgen]
    impl WasmVisualizer {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Self {
            Self {
                inner: VisualizerRunner::new(),
            }
        }

        pub fn from_yaml(yaml: &str) -> Result<WasmVisualizer, JsValue> {
            VisualizerRunner::from_yaml(yaml)
                .map(|inner| Self { inner })
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn play(&mut self) {
            self.inner.play();
        }

        pub fn pause(&mut self) {
            self.inner.pause();
        }

        pub fn toggle(&mut self) -> bool {
            self.inner.toggle()
        }

        pub fn reset(&mut self) {
            self.inner.reset();
        }

        pub fn step_back(&mut self) {
            self.inner.step_back();
        }

        pub fn step_forward(&mut self) {
            self.inner.step_forward();
        }

        pub fn set_speed(&mut self, speed: f64) -> Result<(), JsValue> {
            self.inner
                .set_speed(speed)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn tick(&mut self, elapsed_ms: f64) -> usize {
            self.inner.tick(elapsed_ms)
        }

        pub fn select_problem(&mut self, number: u32) -> Result<(), JsValue> {
            self.inner
                .select_problem(number)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn set_input(&mut self, text: &str) {
            self.inner.set_input(text);
        }

        pub fn apply_preset(&mut self, index: usize) -> bool {
            self.inner.apply_preset(index)
        }

        pub fn frame_json(&self) -> String {
            self.inner.frame_json()
        }

        pub fn frame(&self) -> Result<JsValue, JsValue> {
            serde_wasm_bindgen::to_value(&self.inner.frame())
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }
    }

    impl Default for WasmVisualizer {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(feature = "wasm")]
pub use bindings::WasmVisualizer;
