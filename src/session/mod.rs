//! Session coordinator.
//!
//! Owns the selected problem, the per-problem inputs, the step sequence for
//! the active problem and the playback controller. Every user-visible
//! transition goes through here so the four stay consistent:
//!
//! - problem change: regenerate, index 0, Idle, base interval swapped
//! - input change: regenerate, index kept if still in range, play flag kept
//! - transport commands and elapsed time: forwarded to the controller

use std::time::Duration;

use crate::catalog::{Problem, ProblemId};
use crate::config::VizConfig;
use crate::demos::{
    alien_dictionary, palindrome, sequence_checksum, AlgorithmStep, PalindromeStep,
    TopologicalStep,
};
use crate::error::VizResult;
use crate::playback::{PlaybackCommand, PlaybackController, PlaybackState, Speed};
use crate::renderers::RenderFrame;

/// Step sequence of the active problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSequence {
    /// Two-pointer scan.
    Palindrome(Vec<PalindromeStep>),
    /// Topological sort.
    AlienDictionary(Vec<TopologicalStep>),
}

impl StepSequence {
    /// Generate the sequence for `problem` from its input.
    #[must_use]
    pub fn generate(problem: ProblemId, palindrome_input: &str, alien_words: &[String]) -> Self {
        match problem {
            ProblemId::ValidPalindrome => {
                Self::Palindrome(palindrome::generate_steps(palindrome_input))
            }
            ProblemId::AlienDictionary => {
                Self::AlienDictionary(alien_dictionary::generate_steps(alien_words))
            }
        }
    }

    /// Problem the sequence belongs to.
    #[must_use]
    pub const fn problem(&self) -> ProblemId {
        match self {
            Self::Palindrome(_) => ProblemId::ValidPalindrome,
            Self::AlienDictionary(_) => ProblemId::AlienDictionary,
        }
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Palindrome(steps) => steps.len(),
            Self::AlienDictionary(steps) => steps.len(),
        }
    }

    /// Whether there are no steps. Generators never produce this.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Narration of step `index`.
    #[must_use]
    pub fn message(&self, index: usize) -> Option<&str> {
        match self {
            Self::Palindrome(steps) => steps.get(index).map(AlgorithmStep::message),
            Self::AlienDictionary(steps) => steps.get(index).map(AlgorithmStep::message),
        }
    }

    /// Highlighted listing line of step `index`.
    #[must_use]
    pub fn highlight_line(&self, index: usize) -> Option<usize> {
        match self {
            Self::Palindrome(steps) => steps.get(index).map(AlgorithmStep::highlight_line),
            Self::AlienDictionary(steps) => steps.get(index).map(AlgorithmStep::highlight_line),
        }
    }

    /// Whether step `index` is the final verdict.
    #[must_use]
    pub fn is_terminal(&self, index: usize) -> bool {
        match self {
            Self::Palindrome(steps) => steps.get(index).is_some_and(AlgorithmStep::is_terminal),
            Self::AlienDictionary(steps) => {
                steps.get(index).is_some_and(AlgorithmStep::is_terminal)
            }
        }
    }

    /// Blake3 digest of the serialized sequence.
    ///
    /// # Errors
    ///
    /// Returns `VizError::Serialization` if a step cannot be serialized.
    pub fn checksum(&self) -> VizResult<String> {
        match self {
            Self::Palindrome(steps) => sequence_checksum(steps),
            Self::AlienDictionary(steps) => sequence_checksum(steps),
        }
    }
}

/// Interactive visualization session.
#[derive(Debug, Clone)]
pub struct Session {
    problem: ProblemId,
    palindrome_input: String,
    alien_words: Vec<String>,
    palindrome_interval: Duration,
    alien_interval: Duration,
    steps: StepSequence,
    playback: PlaybackController,
}

impl Session {
    /// Start a session from configuration.
    #[must_use]
    pub fn new(config: &VizConfig) -> Self {
        let problem = config.initial_problem();
        let palindrome_input = config.session.palindrome_input.clone();
        let alien_words = config.session.alien_words.clone();
        let steps = StepSequence::generate(problem, &palindrome_input, &alien_words);
        let playback = PlaybackController::new(steps.len(), config.base_interval(problem))
            .with_speed(config.default_speed());

        tracing::debug!(problem = %problem, steps = steps.len(), "Session started");

        Self {
            problem,
            palindrome_input,
            alien_words,
            palindrome_interval: config.base_interval(ProblemId::ValidPalindrome),
            alien_interval: config.base_interval(ProblemId::AlienDictionary),
            steps,
            playback,
        }
    }

    /// Active problem.
    #[must_use]
    pub const fn problem(&self) -> ProblemId {
        self.problem
    }

    /// Catalog entry of the active problem.
    #[must_use]
    pub fn problem_info(&self) -> &'static Problem {
        self.problem.problem()
    }

    /// Current palindrome input.
    #[must_use]
    pub fn palindrome_input(&self) -> &str {
        &self.palindrome_input
    }

    /// Current alien word list.
    #[must_use]
    pub fn alien_words(&self) -> &[String] {
        &self.alien_words
    }

    /// Active problem's input as editable text.
    #[must_use]
    pub fn input_text(&self) -> String {
        match self.problem {
            ProblemId::ValidPalindrome => self.palindrome_input.clone(),
            ProblemId::AlienDictionary => self.alien_words.join(", "),
        }
    }

    /// Step sequence of the active problem.
    #[must_use]
    pub const fn steps(&self) -> &StepSequence {
        &self.steps
    }

    /// Playback controller.
    #[must_use]
    pub const fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Index of the step being shown.
    #[must_use]
    pub const fn current_step(&self) -> usize {
        self.playback.current()
    }

    /// Playback state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Switch problem: regenerate, return to step 0 and stop.
    pub fn select_problem(&mut self, problem: ProblemId) {
        self.problem = problem;
        self.steps = StepSequence::generate(problem, &self.palindrome_input, &self.alien_words);
        self.playback.set_base_interval(self.interval_for(problem));
        self.playback.replace_sequence(self.steps.len());
        self.playback.reset();
        tracing::debug!(problem = %problem, steps = self.steps.len(), "Problem selected");
    }

    /// Select by catalog number.
    ///
    /// # Errors
    ///
    /// Returns `VizError::UnknownProblem` for numbers not in the catalog.
    pub fn select_problem_number(&mut self, number: u32) -> VizResult<()> {
        self.select_problem(ProblemId::from_number(number)?);
        Ok(())
    }

    /// Move to the next problem. Returns `false` at the end of the catalog.
    pub fn next_problem(&mut self) -> bool {
        self.problem.next().is_some_and(|next| {
            self.select_problem(next);
            true
        })
    }

    /// Move to the previous problem. Returns `false` at the start.
    pub fn previous_problem(&mut self) -> bool {
        self.problem.previous().is_some_and(|previous| {
            self.select_problem(previous);
            true
        })
    }

    /// Replace the palindrome input.
    pub fn set_palindrome_input(&mut self, input: impl Into<String>) {
        self.palindrome_input = input.into();
        if self.problem == ProblemId::ValidPalindrome {
            self.regenerate();
        }
    }

    /// Replace the alien word list.
    pub fn set_alien_words(&mut self, words: Vec<String>) {
        self.alien_words = words;
        if self.problem == ProblemId::AlienDictionary {
            self.regenerate();
        }
    }

    /// Replace the alien word list from comma-separated text.
    pub fn set_alien_text(&mut self, text: &str) {
        self.set_alien_words(alien_dictionary::parse_word_list(text));
    }

    /// Replace the active problem's input from raw text.
    pub fn set_input(&mut self, text: &str) {
        match self.problem {
            ProblemId::ValidPalindrome => self.set_palindrome_input(text),
            ProblemId::AlienDictionary => self.set_alien_text(text),
        }
    }

    /// Load preset `index` (0-based) of the active problem.
    ///
    /// Returns `false` if there is no such preset.
    pub fn apply_preset(&mut self, index: usize) -> bool {
        match self.problem_info().preset(index) {
            Some(preset) => {
                tracing::debug!(label = preset.label, "Preset applied");
                self.set_input(preset.input);
                true
            }
            None => false,
        }
    }

    /// Apply a transport command.
    pub fn apply(&mut self, command: PlaybackCommand) {
        self.playback.apply(command);
    }

    /// Start automatic advancement.
    pub fn play(&mut self) {
        self.playback.play();
    }

    /// Stop automatic advancement.
    pub fn pause(&mut self) {
        self.playback.pause();
    }

    /// Play if idle, pause if playing.
    pub fn toggle(&mut self) {
        self.playback.toggle();
    }

    /// Back to step 0, idle.
    pub fn reset(&mut self) {
        self.playback.reset();
    }

    /// One step back, idle.
    pub fn step_back(&mut self) {
        self.playback.step_back();
    }

    /// One step forward, idle.
    pub fn step_forward(&mut self) {
        self.playback.step_forward();
    }

    /// Change the speed multiplier.
    pub fn set_speed(&mut self, speed: Speed) {
        self.playback.set_speed(speed);
    }

    /// Let `elapsed` time pass. Returns the number of steps advanced.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        self.playback.tick(elapsed)
    }

    /// Fire the advance armed with `token`; stale tokens are ignored.
    pub fn fire(&mut self, token: u64) -> bool {
        self.playback.fire(token)
    }

    /// Snapshot of everything a renderer needs for the current step.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::capture(self)
    }

    fn interval_for(&self, problem: ProblemId) -> Duration {
        match problem {
            ProblemId::ValidPalindrome => self.palindrome_interval,
            ProblemId::AlienDictionary => self.alien_interval,
        }
    }

    fn regenerate(&mut self) {
        self.steps =
            StepSequence::generate(self.problem, &self.palindrome_input, &self.alien_words);
        self.playback.replace_sequence(self.steps.len());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&VizConfig::default())
    }
}
