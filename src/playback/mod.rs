//! Animation playback state machine.
//!
//! The controller owns the `(current step, playing, speed)` tuple for a
//! step sequence of known length and the timer that drives automatic
//! advancement.
//!
//! ```text
//!            play                       pause / reset / step back / step forward
//!   Idle ────────────▶ Playing ──────────────────────────────────────────▶ Idle
//!                         │  timer fires: current += 1
//!                         └─ reaching the last step ─────────────────────▶ Idle
//! ```
//!
//! After every change to the tuple, the sequence length or the base
//! interval the pending advance is cancelled and, if still playing with
//! steps left, re-armed with `base_interval / speed`.

pub mod timer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{VizError, VizResult};
pub use timer::{AdvanceTimer, PendingAdvance};

/// Base delay between palindrome steps at 1x.
pub const PALINDROME_INTERVAL: Duration = Duration::from_millis(2000);

/// Base delay between alien-dictionary steps at 1x.
pub const ALIEN_DICTIONARY_INTERVAL: Duration = Duration::from_millis(2500);

/// Playback speed multiplier: 0.5x to 3.0x in 0.5 increments.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Speed(f64);

impl Speed {
    /// Slowest supported multiplier.
    pub const MIN: Self = Self(0.5);
    /// Fastest supported multiplier.
    pub const MAX: Self = Self(3.0);
    /// Real-time multiplier.
    pub const NORMAL: Self = Self(1.0);
    /// Granularity of the speed control.
    pub const INCREMENT: f64 = 0.5;

    /// Validate a multiplier.
    ///
    /// # Errors
    ///
    /// Returns `VizError::InvalidSpeed` if `value` is outside 0.5..=3.0 or
    /// not a multiple of 0.5.
    pub fn new(value: f64) -> VizResult<Self> {
        let on_grid = ((value / Self::INCREMENT).round() * Self::INCREMENT - value).abs()
            < f64::EPSILON;
        if value.is_finite() && (Self::MIN.0..=Self::MAX.0).contains(&value) && on_grid {
            Ok(Self(value))
        } else {
            Err(VizError::InvalidSpeed(value))
        }
    }

    /// The multiplier as a float.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// One increment faster, saturating at [`Speed::MAX`].
    #[must_use]
    pub fn faster(self) -> Self {
        Self((self.0 + Self::INCREMENT).min(Self::MAX.0))
    }

    /// One increment slower, saturating at [`Speed::MIN`].
    #[must_use]
    pub fn slower(self) -> Self {
        Self((self.0 - Self::INCREMENT).max(Self::MIN.0))
    }

    /// Delay for `base` at this speed.
    #[must_use]
    pub fn scale(self, base: Duration) -> Duration {
        base.div_f64(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<f64> for Speed {
    type Error = VizError;

    fn try_from(value: f64) -> VizResult<Self> {
        Self::new(value)
    }
}

impl From<Speed> for f64 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Whether the timer is driving the animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Index only moves on explicit commands.
    #[default]
    Idle,
    /// A recurring advance is scheduled.
    Playing,
}

/// User-facing transport commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackCommand {
    /// Start automatic advancement.
    Play,
    /// Stop automatic advancement.
    Pause,
    /// Play if idle, pause if playing.
    Toggle,
    /// Back to the first step, idle.
    Reset,
    /// One step back, idle.
    StepBack,
    /// One step forward, idle.
    StepForward,
    /// Change the speed multiplier.
    SetSpeed(Speed),
    /// One speed increment up.
    Faster,
    /// One speed increment down.
    Slower,
}

/// Playback controller for a step sequence.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    len: usize,
    current: usize,
    state: PlaybackState,
    speed: Speed,
    base_interval: Duration,
    timer: AdvanceTimer,
}

impl PlaybackController {
    /// Create an idle controller at step 0 of a `len`-step sequence.
    #[must_use]
    pub const fn new(len: usize, base_interval: Duration) -> Self {
        Self {
            len,
            current: 0,
            state: PlaybackState::Idle,
            speed: Speed::NORMAL,
            base_interval,
            timer: AdvanceTimer::new(),
        }
    }

    /// Builder-style speed override.
    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Index of the step being shown.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Length of the sequence being played.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the play flag is set.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current speed multiplier.
    #[must_use]
    pub const fn speed(&self) -> Speed {
        self.speed
    }

    /// Delay between steps at 1x.
    #[must_use]
    pub const fn base_interval(&self) -> Duration {
        self.base_interval
    }

    /// Delay between automatic advances at the current speed.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.speed.scale(self.base_interval)
    }

    /// Index of the final step.
    #[must_use]
    pub const fn last_index(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// Whether the final step is shown.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.current >= self.last_index()
    }

    /// Whether step back would move.
    #[must_use]
    pub const fn can_step_back(&self) -> bool {
        self.current > 0
    }

    /// Whether step forward would move.
    #[must_use]
    pub const fn can_step_forward(&self) -> bool {
        self.current < self.last_index()
    }

    /// The scheduled advance, for callers that drive their own timers.
    #[must_use]
    pub const fn pending_advance(&self) -> Option<PendingAdvance> {
        self.timer.pending()
    }

    /// Start automatic advancement.
    ///
    /// At the last step the flag is still set, but nothing is scheduled.
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
        tracing::debug!(step = self.current, len = self.len, "Playback started");
        self.rearm();
    }

    /// Stop automatic advancement at the current step.
    pub fn pause(&mut self) {
        self.state = PlaybackState::Idle;
        tracing::debug!(step = self.current, "Playback paused");
        self.rearm();
    }

    /// Play if idle, pause if playing.
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Idle => self.play(),
            PlaybackState::Playing => self.pause(),
        }
    }

    /// Return to the first step and stop.
    pub fn reset(&mut self) {
        self.current = 0;
        self.state = PlaybackState::Idle;
        tracing::debug!("Playback reset");
        self.rearm();
    }

    /// Move one step back (clamped at 0) and stop.
    pub fn step_back(&mut self) {
        self.current = self.current.saturating_sub(1);
        self.state = PlaybackState::Idle;
        self.rearm();
    }

    /// Move one step forward (clamped at the last step) and stop.
    pub fn step_forward(&mut self) {
        self.current = (self.current + 1).min(self.last_index());
        self.state = PlaybackState::Idle;
        self.rearm();
    }

    /// Change the speed; a pending advance restarts with the new delay.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        tracing::debug!(%speed, "Playback speed set");
        self.rearm();
    }

    /// Change the delay at 1x.
    pub fn set_base_interval(&mut self, base_interval: Duration) {
        self.base_interval = base_interval;
        self.rearm();
    }

    /// Point the controller at a regenerated sequence of `len` steps.
    ///
    /// The index survives if still in range and otherwise returns to 0. The
    /// play flag is left alone.
    pub fn replace_sequence(&mut self, len: usize) {
        self.len = len;
        if self.current >= len {
            self.current = 0;
        }
        tracing::debug!(len, step = self.current, "Step sequence replaced");
        self.rearm();
    }

    /// Apply a transport command.
    pub fn apply(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::Play => self.play(),
            PlaybackCommand::Pause => self.pause(),
            PlaybackCommand::Toggle => self.toggle(),
            PlaybackCommand::Reset => self.reset(),
            PlaybackCommand::StepBack => self.step_back(),
            PlaybackCommand::StepForward => self.step_forward(),
            PlaybackCommand::SetSpeed(speed) => self.set_speed(speed),
            PlaybackCommand::Faster => self.set_speed(self.speed.faster()),
            PlaybackCommand::Slower => self.set_speed(self.speed.slower()),
        }
    }

    /// Let `elapsed` time pass, applying every advance that falls due.
    ///
    /// Returns the number of steps advanced.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let mut remaining = elapsed;
        let mut advanced = 0;
        while let Some((_, leftover)) = self.timer.advance(remaining) {
            self.advance();
            advanced += 1;
            remaining = leftover;
        }
        advanced
    }

    /// Fire the advance armed with `token`.
    ///
    /// Stale tokens (cancelled or superseded armings) are ignored and
    /// return `false`.
    pub fn fire(&mut self, token: u64) -> bool {
        if self.timer.take_if(token).is_some() {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if self.current < self.last_index() {
            self.current += 1;
        }
        if self.is_at_end() {
            self.state = PlaybackState::Idle;
            tracing::debug!(step = self.current, "Reached last step, playback stopped");
        }
        self.rearm();
    }

    fn rearm(&mut self) {
        self.timer.cancel();
        if self.is_playing() && self.current < self.last_index() {
            self.timer.arm(self.delay());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_millis(2000);

    fn controller(len: usize) -> PlaybackController {
        PlaybackController::new(len, BASE)
    }

    #[test]
    fn test_speed_validation() {
        assert!(Speed::new(0.5).is_ok());
        assert!(Speed::new(1.5).is_ok());
        assert!(Speed::new(3.0).is_ok());
        assert!(Speed::new(0.0).is_err());
        assert!(Speed::new(0.75).is_err());
        assert!(Speed::new(3.5).is_err());
        assert!(Speed::new(f64::NAN).is_err());
    }

    #[test]
    fn test_speed_saturates() {
        assert_eq!(Speed::MAX.faster(), Speed::MAX);
        assert_eq!(Speed::MIN.slower(), Speed::MIN);
        assert_eq!(Speed::NORMAL.faster().value(), 1.5);
        assert_eq!(Speed::NORMAL.slower().value(), 0.5);
    }

    #[test]
    fn test_speed_scale() {
        assert_eq!(Speed::NORMAL.scale(BASE), BASE);
        assert_eq!(Speed::MIN.scale(BASE), Duration::from_millis(4000));
        let two = Speed::new(2.0).expect("valid");
        assert_eq!(two.scale(ALIEN_DICTIONARY_INTERVAL), Duration::from_millis(1250));
    }

    #[test]
    fn test_speed_serde() {
        let speed: Speed = serde_json::from_str("2.5").expect("deserialize");
        assert_eq!(speed.value(), 2.5);
        assert!(serde_json::from_str::<Speed>("4.0").is_err());
        assert_eq!(serde_json::to_string(&speed).expect("serialize"), "2.5");
        assert_eq!(speed.to_string(), "2.5x");
    }

    #[test]
    fn test_new_controller_idle() {
        let c = controller(5);
        assert_eq!(c.current(), 0);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.pending_advance().is_none());
        assert!(!c.can_step_back());
        assert!(c.can_step_forward());
    }

    #[test]
    fn test_play_to_end() {
        let n = 6;
        let mut c = controller(n);
        c.play();
        for expected in 1..n {
            assert_eq!(c.tick(c.delay()), 1);
            assert_eq!(c.current(), expected);
        }
        assert_eq!(c.current(), n - 1);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.pending_advance().is_none());
        assert_eq!(c.tick(Duration::from_secs(60)), 0);
        assert_eq!(c.current(), n - 1);
    }

    #[test]
    fn test_tick_partial_delay_does_not_advance() {
        let mut c = controller(4);
        c.play();
        assert_eq!(c.tick(Duration::from_millis(1999)), 0);
        assert_eq!(c.current(), 0);
        assert_eq!(c.tick(Duration::from_millis(1)), 1);
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn test_long_tick_applies_several_advances() {
        let mut c = controller(10);
        c.play();
        assert_eq!(c.tick(Duration::from_millis(6500)), 3);
        assert_eq!(c.current(), 3);
        // The 500ms remainder counts toward the next advance.
        assert_eq!(c.tick(Duration::from_millis(1500)), 1);
    }

    #[test]
    fn test_play_at_last_step_schedules_nothing() {
        let mut c = controller(3);
        c.step_forward();
        c.step_forward();
        c.play();
        assert!(c.is_playing());
        assert!(c.pending_advance().is_none());
        assert_eq!(c.tick(Duration::from_secs(10)), 0);
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn test_step_back_clamped() {
        let mut c = controller(3);
        c.step_back();
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn test_step_forward_clamped() {
        let mut c = controller(3);
        for _ in 0..5 {
            c.step_forward();
        }
        assert_eq!(c.current(), 2);
        assert!(!c.can_step_forward());
    }

    #[test]
    fn test_steps_force_idle_and_cancel() {
        let mut c = controller(5);
        c.play();
        c.tick(Duration::from_millis(1000));
        c.step_forward();
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.pending_advance().is_none());
        assert_eq!(c.tick(Duration::from_secs(10)), 0);
        assert_eq!(c.current(), 1);

        c.play();
        c.step_back();
        assert_eq!(c.state(), PlaybackState::Idle);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn test_reset() {
        let mut c = controller(5);
        c.play();
        c.tick(c.delay() * 2);
        assert_eq!(c.current(), 2);
        c.reset();
        assert_eq!(c.current(), 0);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.pending_advance().is_none());
    }

    #[test]
    fn test_toggle() {
        let mut c = controller(5);
        c.toggle();
        assert!(c.is_playing());
        c.toggle();
        assert!(!c.is_playing());
    }

    #[test]
    fn test_speed_change_rearms_from_now() {
        let mut c = controller(5);
        c.play();
        c.tick(Duration::from_millis(1500));
        c.set_speed(Speed::new(2.0).expect("valid"));
        assert_eq!(c.delay(), Duration::from_millis(1000));
        assert_eq!(c.tick(Duration::from_millis(999)), 0);
        assert_eq!(c.tick(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_replace_sequence_resets_out_of_range_index() {
        let mut c = controller(10);
        for _ in 0..7 {
            c.step_forward();
        }
        c.replace_sequence(12);
        assert_eq!(c.current(), 7);
        c.replace_sequence(5);
        assert_eq!(c.current(), 0);
        c.replace_sequence(7);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn test_replace_sequence_keeps_play_flag_and_rearms() {
        let mut c = controller(10);
        c.play();
        c.tick(Duration::from_millis(1500));
        let before = c.pending_advance().expect("armed");
        c.replace_sequence(8);
        assert!(c.is_playing());
        let after = c.pending_advance().expect("armed");
        assert_ne!(before.token, after.token);
        assert_eq!(c.tick(Duration::from_millis(1999)), 0);
    }

    #[test]
    fn test_fire_with_token() {
        let mut c = controller(5);
        c.play();
        let stale = c.pending_advance().expect("armed").token;
        c.set_speed(Speed::MAX);
        assert!(!c.fire(stale));
        assert_eq!(c.current(), 0);

        let fresh = c.pending_advance().expect("armed").token;
        assert!(c.fire(fresh));
        assert_eq!(c.current(), 1);
        assert!(!c.fire(fresh));
    }

    #[test]
    fn test_apply_commands() {
        let mut c = controller(5);
        c.apply(PlaybackCommand::StepForward);
        c.apply(PlaybackCommand::StepForward);
        assert_eq!(c.current(), 2);
        c.apply(PlaybackCommand::StepBack);
        assert_eq!(c.current(), 1);
        c.apply(PlaybackCommand::Faster);
        assert_eq!(c.speed().value(), 1.5);
        c.apply(PlaybackCommand::Slower);
        c.apply(PlaybackCommand::Slower);
        assert_eq!(c.speed(), Speed::MIN);
        c.apply(PlaybackCommand::SetSpeed(Speed::MAX));
        assert_eq!(c.speed(), Speed::MAX);
        c.apply(PlaybackCommand::Play);
        assert!(c.is_playing());
        c.apply(PlaybackCommand::Pause);
        assert!(!c.is_playing());
        c.apply(PlaybackCommand::Toggle);
        assert!(c.is_playing());
        c.apply(PlaybackCommand::Reset);
        assert_eq!(c.current(), 0);
        assert!(!c.is_playing());
    }

    #[test]
    fn test_empty_sequence() {
        let mut c = controller(0);
        c.play();
        c.step_forward();
        assert_eq!(c.current(), 0);
        assert!(c.pending_advance().is_none());
    }
}
