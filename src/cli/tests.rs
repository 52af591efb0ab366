//! CLI module tests.

use super::args::{Args, Command};
use super::commands::{
    config_check, list_problems, log_filter, play, prepare_session, run_cli, run_playback,
    trace_alien, trace_palindrome, PlayOptions,
};
use super::output::{
    format_alien_verdict, format_palindrome_verdict, format_problem_row, format_step_line,
    format_view, TraceReport,
};
use crate::catalog::ProblemId;
use crate::demos::{alien_dictionary, palindrome, AlienOutcome};
use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["algoviz"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_variants() {
    for flag in ["-h", "--help", "help"] {
        let args = Args::parse_from(["algoviz", flag]);
        assert_eq!(args.command, Command::Help, "{flag}");
    }
}

#[test]
fn test_parse_version_variants() {
    for flag in ["-V", "--version", "version"] {
        let args = Args::parse_from(["algoviz", flag]);
        assert_eq!(args.command, Command::Version, "{flag}");
    }
}

#[test]
fn test_parse_unknown_command() {
    let args = Args::parse_from(["algoviz", "unknown-cmd"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_palindrome_command() {
    let args = Args::parse_from(["algoviz", "palindrome", "race a car"]);
    assert_eq!(
        args.command,
        Command::Palindrome {
            text: "race a car".to_string(),
            json: false,
        }
    );
}

#[test]
fn test_parse_palindrome_joins_words_and_reads_json() {
    let args = Args::parse_from(["algoviz", "palindrome", "race", "--json", "a", "car"]);
    assert_eq!(
        args.command,
        Command::Palindrome {
            text: "race a car".to_string(),
            json: true,
        }
    );
}

#[test]
fn test_parse_palindrome_missing_text() {
    let args = Args::parse_from(["algoviz", "palindrome", "--json"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_alien_command() {
    let args = Args::parse_from(["algoviz", "alien", "wrt, wrf,er"]);
    assert_eq!(
        args.command,
        Command::Alien {
            words: vec!["wrt".into(), "wrf".into(), "er".into()],
            json: false,
        }
    );
}

#[test]
fn test_parse_alien_separate_words() {
    let args = Args::parse_from(["algoviz", "alien", "--json", "z", "x"]);
    assert_eq!(
        args.command,
        Command::Alien {
            words: vec!["z".into(), "x".into()],
            json: true,
        }
    );
}

#[test]
fn test_parse_alien_missing_words() {
    let args = Args::parse_from(["algoviz", "alien", " , "]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_problems_command() {
    let args = Args::parse_from(["algoviz", "problems"]);
    assert_eq!(args.command, Command::Problems);
}

#[test]
fn test_parse_play_command_defaults() {
    let args = Args::parse_from(["algoviz", "play", "125"]);
    assert_eq!(
        args.command,
        Command::Play {
            problem: "125".to_string(),
            input: None,
            speed: None,
            config_path: None,
            instant: false,
        }
    );
}

#[test]
fn test_parse_play_command_with_all_options() {
    let args = Args::parse_from([
        "algoviz",
        "play",
        "alien",
        "--input",
        "z,x",
        "--speed",
        "2.5x",
        "--config",
        "viz.yaml",
        "--instant",
    ]);
    assert_eq!(
        args.command,
        Command::Play {
            problem: "alien".to_string(),
            input: Some("z,x".to_string()),
            speed: Some(2.5),
            config_path: Some(PathBuf::from("viz.yaml")),
            instant: true,
        }
    );
}

#[test]
fn test_parse_play_command_ignores_bad_values() {
    let args = Args::parse_from(["algoviz", "play", "125", "--bogus", "--speed", "fast"]);
    match args.command {
        Command::Play { speed, input, .. } => {
            assert_eq!(speed, None);
            assert_eq!(input, None);
        }
        other => panic!("Expected Play command, got {other:?}"),
    }

    let args = Args::parse_from(["algoviz", "play", "125", "--input"]);
    assert!(matches!(args.command, Command::Play { input: None, .. }));
}

#[test]
fn test_parse_play_missing_problem() {
    let args = Args::parse_from(["algoviz", "play"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_config_check() {
    let args = Args::parse_from(["algoviz", "config-check", "viz.yaml"]);
    assert_eq!(
        args.command,
        Command::ConfigCheck {
            config_path: PathBuf::from("viz.yaml"),
        }
    );

    let args = Args::parse_from(["algoviz", "config-check"]);
    assert_eq!(args.command, Command::Help);
}

// ============================================================================
// Output formatting tests
// ============================================================================

#[test]
fn test_format_step_line_pads_to_total() {
    assert_eq!(format_step_line(0, 21, "start"), "[ 1/21] start");
    assert_eq!(format_step_line(20, 21, "done"), "[21/21] done");
    assert_eq!(format_step_line(1, 2, "x"), "[2/2] x");
}

#[test]
fn test_format_verdicts() {
    assert!(format_palindrome_verdict(true).contains("true"));
    assert!(format_palindrome_verdict(false).contains("not a palindrome"));

    let ordered = AlienOutcome::Ordered {
        order: "wertf".to_string(),
    };
    assert_eq!(format_alien_verdict(&ordered), "✓ Result: \"wertf\"");
    assert!(format_alien_verdict(&AlienOutcome::Cycle).contains("cycle"));

    let invalid = AlienOutcome::Invalid {
        earlier: "abc".to_string(),
        later: "ab".to_string(),
    };
    let text = format_alien_verdict(&invalid);
    assert!(text.contains("\"abc\""));
    assert!(text.contains("\"ab\""));
}

#[test]
fn test_format_problem_row() {
    let row = format_problem_row(ProblemId::AlienDictionary.problem());
    assert!(row.contains("269"));
    assert!(row.contains("Alien Dictionary"));
    assert!(row.contains("[Hard]"));
}

#[test]
fn test_format_view_marks_pointers() {
    let mut session = crate::session::Session::default();
    session.set_palindrome_input("abba");
    assert_eq!(format_view(&session.frame().view), "[a] b  b [a]");

    session.select_problem(ProblemId::AlienDictionary);
    session.set_alien_text("z,x");
    let last = session.steps().len() - 1;
    for _ in 0..last {
        session.step_forward();
    }
    assert_eq!(format_view(&session.frame().view), "queue []  result \"zx\"");
}

#[test]
fn test_trace_report_json() {
    let steps = palindrome::generate_steps("ab");
    let report = TraceReport {
        problem: 125,
        input: "ab",
        result: false,
        checksum: "c".to_string(),
        steps: steps.as_slice(),
    };
    let value: serde_json::Value =
        serde_json::from_str(&report.to_json().expect("json")).expect("parse");
    assert_eq!(value["problem"], 125);
    assert_eq!(value["result"], false);
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(3));

    let words = vec!["z".to_string(), "x".to_string()];
    let steps = alien_dictionary::generate_steps(&words);
    let outcome = alien_dictionary::outcome(&words);
    let report = TraceReport {
        problem: 269,
        input: words.as_slice(),
        result: &outcome,
        checksum: "c".to_string(),
        steps: steps.as_slice(),
    };
    let value: serde_json::Value =
        serde_json::from_str(&report.to_json().expect("json")).expect("parse");
    assert_eq!(value["input"][1], "x");
    assert_eq!(value["result"]["order"], "zx");
}

// ============================================================================
// Command tests
// ============================================================================

#[test]
fn test_run_cli_help_and_version() {
    assert_eq!(
        run_cli(Args {
            command: Command::Help
        }),
        ExitCode::SUCCESS
    );
    assert_eq!(
        run_cli(Args {
            command: Command::Version
        }),
        ExitCode::SUCCESS
    );
}

#[test]
fn test_trace_commands_succeed() {
    assert_eq!(trace_palindrome("race a car", false), ExitCode::SUCCESS);
    assert_eq!(trace_palindrome("Madam", true), ExitCode::SUCCESS);

    let words: Vec<String> = ["z", "x", "z"].iter().map(ToString::to_string).collect();
    assert_eq!(trace_alien(&words, false), ExitCode::SUCCESS);
    assert_eq!(trace_alien(&words, true), ExitCode::SUCCESS);
}

#[test]
fn test_list_problems_succeeds() {
    assert_eq!(list_problems(), ExitCode::SUCCESS);
}

#[test]
fn test_prepare_session_applies_options() {
    let options = PlayOptions {
        input: Some("z, x".to_string()),
        speed: Some(2.0),
        ..PlayOptions::default()
    };
    let session = prepare_session("alien", &options).expect("session");
    assert_eq!(session.problem(), ProblemId::AlienDictionary);
    assert_eq!(session.alien_words(), ["z", "x"]);
    assert_eq!(session.playback().delay(), Duration::from_millis(1250));
}

#[test]
fn test_prepare_session_errors() {
    assert!(prepare_session("sudoku", &PlayOptions::default()).is_err());
    assert!(prepare_session("1", &PlayOptions::default()).is_err());

    let bad_speed = PlayOptions {
        speed: Some(0.7),
        ..PlayOptions::default()
    };
    assert!(prepare_session("125", &bad_speed).is_err());

    let missing_config = PlayOptions {
        config_path: Some(PathBuf::from("does/not/exist.yaml")),
        ..PlayOptions::default()
    };
    assert!(prepare_session("125", &missing_config).is_err());
}

#[test]
fn test_run_playback_shows_every_step() {
    let session = prepare_session("125", &PlayOptions::default()).expect("session");
    let delays = RefCell::new(Vec::new());
    let shown = run_playback(session, |d| delays.borrow_mut().push(d));

    assert_eq!(shown, 21);
    let delays = delays.into_inner();
    assert_eq!(delays.len(), 20);
    assert!(delays.iter().all(|d| *d == Duration::from_millis(2000)));
}

#[test]
fn test_run_playback_respects_speed() {
    let options = PlayOptions {
        input: Some("race a car".to_string()),
        speed: Some(2.0),
        ..PlayOptions::default()
    };
    let session = prepare_session("palindrome", &options).expect("session");
    let delays = RefCell::new(Vec::new());
    let shown = run_playback(session, |d| delays.borrow_mut().push(d));

    assert_eq!(shown, 9);
    assert!(delays
        .into_inner()
        .iter()
        .all(|d| *d == Duration::from_millis(1000)));
}

#[test]
fn test_play_command_instant() {
    let options = PlayOptions {
        input: Some("z,x".to_string()),
        instant: true,
        ..PlayOptions::default()
    };
    assert_eq!(play("269", &options), ExitCode::SUCCESS);
    assert_ne!(play("42", &options), ExitCode::SUCCESS);
}

#[test]
fn test_config_check_valid_and_invalid() {
    let mut valid = tempfile::NamedTempFile::new().expect("temp file");
    write!(valid, "playback:\n  default_speed: 2.0\n").expect("write");
    assert_eq!(config_check(valid.path()), ExitCode::SUCCESS);

    let mut invalid = tempfile::NamedTempFile::new().expect("temp file");
    write!(invalid, "playback:\n  default_speed: 1.2\n").expect("write");
    assert_ne!(config_check(invalid.path()), ExitCode::SUCCESS);

    assert_ne!(
        config_check(&PathBuf::from("nonexistent.yaml")),
        ExitCode::SUCCESS
    );
}

#[test]
fn test_config_check_embedded_preset() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let path = std::path::Path::new(&manifest_dir).join("presets/default.yaml");
    if path.exists() {
        assert_eq!(config_check(&path), ExitCode::SUCCESS);
    }
}

#[test]
fn test_args_config_path() {
    let args = Args::parse_from(["algoviz", "play", "125", "--config", "viz.yaml"]);
    assert_eq!(args.config_path(), Some(std::path::Path::new("viz.yaml")));

    let args = Args::parse_from(["algoviz", "config-check", "other.yaml"]);
    assert_eq!(args.config_path(), Some(std::path::Path::new("other.yaml")));

    assert_eq!(Args::parse_from(["algoviz", "play", "125"]).config_path(), None);
    assert_eq!(Args::parse_from(["algoviz", "problems"]).config_path(), None);
}

#[test]
fn test_log_filter_follows_command_config() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "logging:\n  filter: algoviz=debug\n").expect("write");
    let path = file.path().to_string_lossy().to_string();

    let play_args = Args::parse_from(["algoviz", "play", "125", "--config", path.as_str()]);
    assert_eq!(log_filter(&play_args), "algoviz=debug");

    let check_args = Args::parse_from(["algoviz", "config-check", path.as_str()]);
    assert_eq!(log_filter(&check_args), "algoviz=debug");
}

#[test]
fn test_log_filter_falls_back_to_embedded() {
    let args = Args::parse_from(["algoviz", "problems"]);
    assert_eq!(log_filter(&args), "algoviz=info");

    let missing = Args::parse_from(["algoviz", "config-check", "nonexistent.yaml"]);
    assert_eq!(log_filter(&missing), "algoviz=info");
}
