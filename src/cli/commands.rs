//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use crate::catalog::ProblemId;
use crate::config::VizConfig;
use crate::demos::{alien_dictionary, palindrome, sequence_checksum};
use crate::error::VizResult;
use crate::playback::Speed;
use crate::session::Session;

use super::output::{
    format_alien_verdict, format_palindrome_verdict, print_banner, print_config_summary,
    print_frame, print_help, print_problem_list, print_steps, print_verdict, print_version,
    TraceReport,
};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Palindrome { text, json } => trace_palindrome(&text, json),
        Command::Alien { words, json } => trace_alien(&words, json),
        Command::Problems => list_problems(),
        Command::Play {
            problem,
            input,
            speed,
            config_path,
            instant,
        } => {
            let options = PlayOptions {
                input,
                speed,
                config_path,
                instant,
            };
            play(&problem, &options)
        }
        Command::ConfigCheck { config_path } => config_check(&config_path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
///
/// Taken from the config file the command names, falling back to the
/// embedded config when there is none or it does not load.
#[must_use]
pub fn log_filter(args: &Args) -> String {
    args.config_path()
        .and_then(|path| VizConfig::load(path).ok())
        .or_else(|| VizConfig::embedded().ok())
        .map_or_else(
            || VizConfig::default().logging.filter,
            |config| config.logging.filter,
        )
}

fn report_error(result: VizResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Print the Valid Palindrome trace for `text`.
#[must_use]
pub fn trace_palindrome(text: &str, json: bool) -> ExitCode {
    report_error(write_palindrome_trace(text, json))
}

fn write_palindrome_trace(text: &str, json: bool) -> VizResult<()> {
    let steps = palindrome::generate_steps(text);
    let result = palindrome::is_palindrome(text);
    let checksum = sequence_checksum(&steps)?;
    tracing::info!(steps = steps.len(), result, "Palindrome trace generated");

    if json {
        let report = TraceReport {
            problem: ProblemId::ValidPalindrome.number(),
            input: text,
            result,
            checksum,
            steps: steps.as_slice(),
        };
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print_banner("algoviz - 125. Valid Palindrome");
    println!("Input: \"{text}\"\n");
    print_steps(&steps);
    print_verdict(&format_palindrome_verdict(result), &checksum);
    Ok(())
}

/// Print the Alien Dictionary trace for `words`.
#[must_use]
pub fn trace_alien(words: &[String], json: bool) -> ExitCode {
    report_error(write_alien_trace(words, json))
}

fn write_alien_trace(words: &[String], json: bool) -> VizResult<()> {
    let steps = alien_dictionary::generate_steps(words);
    let outcome = alien_dictionary::outcome(words);
    let checksum = sequence_checksum(&steps)?;
    tracing::info!(steps = steps.len(), "Alien dictionary trace generated");

    if json {
        let report = TraceReport {
            problem: ProblemId::AlienDictionary.number(),
            input: words,
            result: &outcome,
            checksum,
            steps: steps.as_slice(),
        };
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print_banner("algoviz - 269. Alien Dictionary");
    println!("Words: {}\n", words.join(", "));
    print_steps(&steps);
    print_verdict(&format_alien_verdict(&outcome), &checksum);
    Ok(())
}

/// List the problem catalog.
#[must_use]
pub fn list_problems() -> ExitCode {
    print_banner("algoviz - Problems");
    print_problem_list();
    println!("Usage: algoviz play <number|name> [--input <text>]");
    ExitCode::SUCCESS
}

/// Options for [`play`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayOptions {
    /// Input override for the selected problem.
    pub input: Option<String>,
    /// Speed multiplier override.
    pub speed: Option<f64>,
    /// Configuration file.
    pub config_path: Option<std::path::PathBuf>,
    /// Advance without sleeping.
    pub instant: bool,
}

/// Animate `problem` on stdout until its last step.
#[must_use]
pub fn play(problem: &str, options: &PlayOptions) -> ExitCode {
    let session = match prepare_session(problem, options) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let info = session.problem_info();
    print_banner(&format!("algoviz - {}. {}", info.id.number(), info.title));
    println!(
        "Input: {}   Speed: {}   Delay: {} ms\n",
        session.input_text(),
        session.playback().speed(),
        session.playback().delay().as_millis()
    );

    let sleep: fn(Duration) = if options.instant {
        |_| {}
    } else {
        std::thread::sleep
    };
    let shown = run_playback(session, sleep);
    tracing::info!(steps = shown, "Playback finished");
    ExitCode::SUCCESS
}

/// Build the session `play` animates.
///
/// # Errors
///
/// Returns error if the problem is unknown, the speed is off the grid, or
/// the config file cannot be loaded.
pub fn prepare_session(problem: &str, options: &PlayOptions) -> VizResult<Session> {
    let config = match &options.config_path {
        Some(path) => VizConfig::load(path)?,
        None => VizConfig::embedded()?,
    };
    let problem: ProblemId = problem.parse()?;

    let mut session = Session::new(&config);
    session.select_problem(problem);
    if let Some(input) = &options.input {
        session.set_input(input);
    }
    if let Some(speed) = options.speed {
        session.set_speed(Speed::new(speed)?);
    }
    Ok(session)
}

/// Play `session` to the end, printing each frame and calling `sleep` with
/// the delay before each advance. Returns the number of frames printed.
pub fn run_playback(mut session: Session, sleep: impl Fn(Duration)) -> usize {
    session.play();
    print_frame(&session.frame());
    let mut shown = 1;

    while session.playback().is_playing() {
        let delay = session.playback().delay();
        sleep(delay);
        if session.tick(delay) == 0 {
            break;
        }
        print_frame(&session.frame());
        shown += 1;
    }
    shown
}

/// Validate a configuration file.
#[must_use]
pub fn config_check(path: &Path) -> ExitCode {
    print_banner("algoviz - Config Check");
    println!("Validating: {}\n", path.display());

    match VizConfig::load(path) {
        Ok(config) => {
            print_config_summary(&config);
            println!("\n✓ Configuration valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("✗ Configuration invalid");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
