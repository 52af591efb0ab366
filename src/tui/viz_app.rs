//! Visualizer TUI application state and logic.
//!
//! Terminal I/O is handled by the `viz-tui` binary; key handling, the
//! input editor and elapsed-time bookkeeping live here so they can be
//! tested without a terminal.

use std::time::Duration;

use crossterm::event::KeyCode;

use crate::config::VizConfig;
use crate::playback::PlaybackCommand;
use crate::renderers::RenderFrame;
use crate::session::Session;

/// Line editor for the active problem's input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputEditor {
    /// Text being edited.
    pub buffer: String,
}

/// Application state for the visualizer TUI.
#[derive(Debug, Clone)]
pub struct VizApp {
    /// Problem, inputs, steps and playback.
    pub session: Session,
    /// Open while the user edits the input; keys go to the editor.
    pub editor: Option<InputEditor>,
    /// Frames drawn so far.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl VizApp {
    /// Create with the embedded default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = VizConfig::embedded().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Embedded config rejected, using built-in defaults");
            VizConfig::default()
        });
        Self::from_config(&config)
    }

    /// Create from a configuration.
    #[must_use]
    pub fn from_config(config: &VizConfig) -> Self {
        Self {
            session: Session::new(config),
            editor: None,
            frame_count: 0,
            should_quit: false,
        }
    }

    /// Whether the input editor is open.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    /// Advance by the wall time since the last frame.
    ///
    /// Returns the number of steps advanced.
    pub fn update(&mut self, elapsed: Duration) -> usize {
        self.frame_count += 1;
        self.session.tick(elapsed)
    }

    /// Frame to draw.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        self.session.frame()
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        if self.editor.is_some() {
            self.handle_edit_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.session.apply(PlaybackCommand::Toggle),
            KeyCode::Left => self.session.apply(PlaybackCommand::StepBack),
            KeyCode::Right => self.session.apply(PlaybackCommand::StepForward),
            KeyCode::Char('r') => self.session.apply(PlaybackCommand::Reset),
            KeyCode::Char('+' | '=') => self.session.apply(PlaybackCommand::Faster),
            KeyCode::Char('-') => self.session.apply(PlaybackCommand::Slower),
            KeyCode::Char('n') => {
                self.session.next_problem();
            }
            KeyCode::Char('p') => {
                self.session.previous_problem();
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.session.apply_preset(index);
            }
            KeyCode::Char('e') => {
                self.editor = Some(InputEditor {
                    buffer: self.session.input_text(),
                });
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                if let Some(editor) = self.editor.take() {
                    self.session.set_input(&editor.buffer);
                }
            }
            KeyCode::Esc => self.editor = None,
            KeyCode::Backspace => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.buffer.push(c);
                }
            }
            _ => {}
        }
    }
}

impl Default for VizApp {
    fn default() -> Self {
        Self::new()
    }
}
