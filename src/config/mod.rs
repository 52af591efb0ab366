//! Configuration system with YAML schema and validation.
//!
//! Mistakes are caught in three layers:
//! - serde rejects unknown keys and malformed values
//! - `validator` range checks on each section
//! - semantic checks that need more than one field or the catalog

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::catalog::ProblemId;
use crate::error::{VizError, VizResult};
use crate::playback::Speed;

/// Configuration shipped with the binary.
pub const DEFAULT_YAML: &str = include_str!("../../presets/default.yaml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Animation timing.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Initial problem and inputs.
    #[validate(nested)]
    #[serde(default)]
    pub session: SessionConfig,

    /// Log filter used when `RUST_LOG` is unset.
    #[validate(nested)]
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// The configuration embedded from `presets/default.yaml`.
    ///
    /// # Errors
    ///
    /// Returns error if the embedded file fails to parse, which a unit test
    /// rules out.
    pub fn embedded() -> VizResult<Self> {
        Self::from_yaml(DEFAULT_YAML)
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> VizResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> VizResult<()> {
        Speed::new(self.playback.default_speed).map_err(|_| {
            VizError::config(format!(
                "default_speed must be 0.5 to 3.0 in steps of 0.5, got {}",
                self.playback.default_speed
            ))
        })?;

        ProblemId::from_number(self.session.initial_problem)?;

        if let Some(word) = self
            .session
            .alien_words
            .iter()
            .find(|w| w.trim().is_empty() || w.contains(','))
        {
            return Err(VizError::config(format!(
                "alien_words entries must be non-empty and contain no commas, got {word:?}"
            )));
        }

        Ok(())
    }

    /// Validated default speed.
    #[must_use]
    pub fn default_speed(&self) -> Speed {
        Speed::new(self.playback.default_speed).unwrap_or_default()
    }

    /// Base interval for a problem at 1x.
    #[must_use]
    pub const fn base_interval(&self, problem: ProblemId) -> Duration {
        match problem {
            ProblemId::ValidPalindrome => {
                Duration::from_millis(self.playback.palindrome_interval_ms)
            }
            ProblemId::AlienDictionary => Duration::from_millis(self.playback.alien_interval_ms),
        }
    }

    /// Initial problem, falling back to the first catalog entry.
    #[must_use]
    pub fn initial_problem(&self) -> ProblemId {
        ProblemId::from_number(self.session.initial_problem).unwrap_or_default()
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            playback: PlaybackConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    speed: Option<Speed>,
    initial_problem: Option<ProblemId>,
    palindrome_input: Option<String>,
    alien_words: Option<Vec<String>>,
    palindrome_interval: Option<Duration>,
    alien_interval: Option<Duration>,
    log_filter: Option<String>,
}

impl VizConfigBuilder {
    /// Set the default speed.
    #[must_use]
    pub const fn speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Set the problem shown first.
    #[must_use]
    pub const fn initial_problem(mut self, problem: ProblemId) -> Self {
        self.initial_problem = Some(problem);
        self
    }

    /// Set the initial palindrome input.
    #[must_use]
    pub fn palindrome_input(mut self, input: impl Into<String>) -> Self {
        self.palindrome_input = Some(input.into());
        self
    }

    /// Set the initial alien word list.
    #[must_use]
    pub fn alien_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alien_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Set the palindrome base interval.
    #[must_use]
    pub const fn palindrome_interval(mut self, interval: Duration) -> Self {
        self.palindrome_interval = Some(interval);
        self
    }

    /// Set the alien-dictionary base interval.
    #[must_use]
    pub const fn alien_interval(mut self, interval: Duration) -> Self {
        self.alien_interval = Some(interval);
        self
    }

    /// Set the fallback log filter.
    #[must_use]
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(speed) = self.speed {
            config.playback.default_speed = speed.value();
        }
        if let Some(problem) = self.initial_problem {
            config.session.initial_problem = problem.number();
        }
        if let Some(input) = self.palindrome_input {
            config.session.palindrome_input = input;
        }
        if let Some(words) = self.alien_words {
            config.session.alien_words = words;
        }
        if let Some(interval) = self.palindrome_interval {
            config.playback.palindrome_interval_ms = duration_millis(interval);
        }
        if let Some(interval) = self.alien_interval {
            config.playback.alien_interval_ms = duration_millis(interval);
        }
        if let Some(filter) = self.log_filter {
            config.logging.filter = filter;
        }

        config
    }
}

fn duration_millis(interval: Duration) -> u64 {
    u64::try_from(interval.as_millis()).unwrap_or(u64::MAX)
}

/// Animation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Palindrome delay between steps at 1x, in milliseconds.
    #[validate(range(min = 100, max = 60_000))]
    #[serde(default = "default_palindrome_interval_ms")]
    pub palindrome_interval_ms: u64,
    /// Alien-dictionary delay between steps at 1x, in milliseconds.
    #[validate(range(min = 100, max = 60_000))]
    #[serde(default = "default_alien_interval_ms")]
    pub alien_interval_ms: u64,
    /// Speed multiplier at startup.
    #[validate(range(min = 0.5, max = 3.0))]
    #[serde(default = "default_speed")]
    pub default_speed: f64,
}

const fn default_palindrome_interval_ms() -> u64 {
    2000
}

const fn default_alien_interval_ms() -> u64 {
    2500
}

const fn default_speed() -> f64 {
    1.0
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            palindrome_interval_ms: default_palindrome_interval_ms(),
            alien_interval_ms: default_alien_interval_ms(),
            default_speed: default_speed(),
        }
    }
}

/// Initial problem and inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Catalog number of the problem shown first.
    #[serde(default = "default_initial_problem")]
    pub initial_problem: u32,
    /// Initial palindrome input.
    #[validate(length(max = 1000))]
    #[serde(default = "default_palindrome_input")]
    pub palindrome_input: String,
    /// Initial alien word list.
    #[validate(length(max = 100))]
    #[serde(default = "default_alien_words")]
    pub alien_words: Vec<String>,
}

const fn default_initial_problem() -> u32 {
    125
}

fn default_palindrome_input() -> String {
    "A man, a plan, a canal: Panama".to_string()
}

fn default_alien_words() -> Vec<String> {
    ["wrt", "wrf", "er", "ett", "rftt"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_problem: default_initial_problem(),
            palindrome_input: default_palindrome_input(),
            alien_words: default_alien_words(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    #[validate(length(min = 1))]
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "algoviz=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
