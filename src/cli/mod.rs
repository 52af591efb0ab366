//! CLI module for algoviz.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{
    config_check, list_problems, log_filter, play, prepare_session, run_cli, run_playback,
    trace_alien, trace_palindrome, PlayOptions,
};
pub use output::{
    format_alien_verdict, format_palindrome_verdict, format_problem_row, format_step_line,
    format_view, print_help, print_version, TraceReport,
};

#[cfg(test)]
mod tests;
