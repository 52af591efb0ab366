//! CLI argument parsing.
//!
//! Hand-rolled so parsing stays testable from any iterator of strings.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the two-pointer trace for a phrase
    Palindrome {
        /// Raw phrase; extra positional words are joined with spaces.
        text: String,
        /// Emit the trace as JSON.
        json: bool,
    },
    /// Print the topological-sort trace for a word list
    Alien {
        /// Words in alien dictionary order.
        words: Vec<String>,
        /// Emit the trace as JSON.
        json: bool,
    },
    /// List the problem catalog
    Problems,
    /// Animate a problem on stdout
    Play {
        /// Problem number or short name.
        problem: String,
        /// Input override for the selected problem.
        input: Option<String>,
        /// Speed multiplier override.
        speed: Option<f64>,
        /// Configuration file.
        config_path: Option<PathBuf>,
        /// Advance without sleeping between steps.
        instant: bool,
    },
    /// Validate a configuration file
    ConfigCheck {
        /// Path to the configuration YAML file.
        config_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name, as with `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Configuration file named by the command, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&std::path::Path> {
        match &self.command {
            Command::Play {
                config_path: Some(path),
                ..
            } => Some(path.as_path()),
            Command::ConfigCheck { config_path } => Some(config_path.as_path()),
            _ => None,
        }
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "palindrome" => Self::parse_palindrome_command(&args[2..]),
            "alien" => Self::parse_alien_command(&args[2..]),
            "problems" => Command::Problems,
            "play" => Self::parse_play_command(&args[2..]),
            "config-check" => Self::parse_config_check_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Split `rest` into positional words and the `--json` flag.
    fn positionals_and_json(rest: &[String]) -> (Vec<&str>, bool) {
        let mut json = false;
        let mut positionals = Vec::new();
        for arg in rest {
            if arg == "--json" {
                json = true;
            } else {
                positionals.push(arg.as_str());
            }
        }
        (positionals, json)
    }

    fn parse_palindrome_command(rest: &[String]) -> Command {
        let (positionals, json) = Self::positionals_and_json(rest);
        if positionals.is_empty() {
            eprintln!("Error: 'palindrome' command requires a phrase");
            return Command::Help;
        }

        Command::Palindrome {
            text: positionals.join(" "),
            json,
        }
    }

    fn parse_alien_command(rest: &[String]) -> Command {
        let (positionals, json) = Self::positionals_and_json(rest);
        // `alien wrt,wrf,er` and `alien wrt wrf er` are equivalent
        let words = crate::demos::alien_dictionary::parse_word_list(&positionals.join(","));
        if words.is_empty() {
            eprintln!("Error: 'alien' command requires a comma-separated word list");
            return Command::Help;
        }

        Command::Alien { words, json }
    }

    fn parse_play_command(rest: &[String]) -> Command {
        let Some(problem) = rest.first() else {
            eprintln!("Error: 'play' command requires a problem number or name");
            return Command::Help;
        };

        let mut input = None;
        let mut speed = None;
        let mut config_path = None;
        let mut instant = false;

        let mut i = 1;
        while i < rest.len() {
            match rest[i].as_str() {
                "--input" => {
                    if let Some(value) = rest.get(i + 1) {
                        input = Some(value.clone());
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--speed" => {
                    if let Some(value) = rest.get(i + 1) {
                        if let Ok(x) = value.trim_end_matches('x').parse() {
                            speed = Some(x);
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--config" => {
                    if let Some(value) = rest.get(i + 1) {
                        config_path = Some(PathBuf::from(value));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--instant" => {
                    instant = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Play {
            problem: problem.clone(),
            input,
            speed,
            config_path,
            instant,
        }
    }

    fn parse_config_check_command(rest: &[String]) -> Command {
        let Some(path) = rest.first() else {
            eprintln!("Error: 'config-check' command requires a config path");
            return Command::Help;
        };

        Command::ConfigCheck {
            config_path: PathBuf::from(path),
        }
    }
}
