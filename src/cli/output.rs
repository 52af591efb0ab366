//! CLI output formatting.
//!
//! Line formatters return strings so tests can check them; the `print_*`
//! wrappers write to stdout.

use serde::Serialize;

use crate::catalog::{problems, Problem};
use crate::config::VizConfig;
use crate::demos::{AlgorithmStep, AlienOutcome};
use crate::error::VizResult;
use crate::renderers::{ProblemView, RenderFrame};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    println!("algoviz {} ({})", env!("ALGOVIZ_VERSION"), env!("GIT_HASH"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"algoviz - Step-by-step algorithm visualizer

USAGE:
    algoviz <COMMAND> [OPTIONS]

COMMANDS:
    palindrome <text>             Trace Valid Palindrome (125) on a phrase
        --json                    Emit the step sequence as JSON

    alien <w1,w2,...>             Trace Alien Dictionary (269) on a word list
        --json                    Emit the step sequence as JSON

    problems                      List the problem catalog

    play <problem>                Animate a problem (number or name)
        --input <text>            Input override (comma-separated for alien)
        --speed <x>               Speed multiplier, 0.5 to 3.0 in steps of 0.5
        --config <file.yaml>      Load settings from a config file
        --instant                 Do not wait between steps

    config-check <file.yaml>      Validate a config file

    help                          Show this help message
    version                       Show version information

EXAMPLES:
    algoviz palindrome 'A man, a plan, a canal: Panama'
    algoviz alien wrt,wrf,er,ett,rftt --json
    algoviz play alien --input 'z,x' --speed 2
    algoviz config-check presets/default.yaml

For the interactive view run: viz-tui [config.yaml]
"
    );
}

/// Print a banner line in a box.
pub fn print_banner(title: &str) {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║ {title:<61} ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");
}

/// `[i/n] message` with 1-based numbering.
#[must_use]
pub fn format_step_line(index: usize, total: usize, message: &str) -> String {
    let width = total.to_string().len();
    format!("[{:>width$}/{total}] {message}", index + 1)
}

/// Print every step of a sequence.
pub fn print_steps<S: AlgorithmStep>(steps: &[S]) {
    for (i, step) in steps.iter().enumerate() {
        println!("{}", format_step_line(i, steps.len(), step.message()));
    }
}

/// One-line verdict for a palindrome trace.
#[must_use]
pub fn format_palindrome_verdict(is_palindrome: bool) -> String {
    if is_palindrome {
        "✓ Result: true (palindrome)".to_string()
    } else {
        "✗ Result: false (not a palindrome)".to_string()
    }
}

/// One-line verdict for an alien dictionary trace.
#[must_use]
pub fn format_alien_verdict(outcome: &AlienOutcome) -> String {
    match outcome {
        AlienOutcome::Ordered { order } => format!("✓ Result: \"{order}\""),
        AlienOutcome::Cycle => "✗ Result: \"\" (cycle detected)".to_string(),
        AlienOutcome::Invalid { earlier, later } => {
            format!("✗ Result: \"\" (\"{earlier}\" listed before its prefix \"{later}\")")
        }
    }
}

/// Print a verdict between rules.
pub fn print_verdict(verdict: &str, checksum: &str) {
    println!("\n{RULE}");
    println!("{verdict}");
    println!("Checksum: {checksum}");
    println!("{RULE}");
}

/// JSON document emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct TraceReport<'a, I: Serialize + ?Sized, S: Serialize, R: Serialize> {
    /// Problem number.
    pub problem: u32,
    /// Input as given.
    pub input: &'a I,
    /// Final answer.
    pub result: R,
    /// Blake3 digest of `steps`.
    pub checksum: String,
    /// Every step.
    pub steps: &'a [S],
}

impl<I: Serialize + ?Sized, S: Serialize, R: Serialize> TraceReport<'_, I, S, R> {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `VizError::Serialization` if a field cannot be serialized.
    pub fn to_json(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One catalog row.
#[must_use]
pub fn format_problem_row(problem: &Problem) -> String {
    format!(
        "{:>4}. {:<20} [{}]  {} presets",
        problem.id.number(),
        problem.title,
        problem.difficulty,
        problem.presets.len()
    )
}

/// Print the problem catalog.
pub fn print_problem_list() {
    for problem in problems() {
        println!("{}", format_problem_row(problem));
        for (i, preset) in problem.presets.iter().enumerate() {
            println!("        {}. {:<16} {}", i + 1, preset.label, preset.input);
        }
        println!();
    }
}

/// Compact one-line picture of a frame's data structure.
#[must_use]
pub fn format_view(view: &ProblemView) -> String {
    match view {
        ProblemView::Palindrome(view) => {
            let cells: String = view
                .cells
                .iter()
                .map(|cell| match cell.role {
                    crate::renderers::PointerRole::None => format!(" {} ", cell.ch),
                    _ => format!("[{}]", cell.ch),
                })
                .collect();
            if cells.is_empty() {
                "(empty)".to_string()
            } else {
                cells
            }
        }
        ProblemView::AlienDictionary(view) => {
            let queue: String = view.queue.iter().collect();
            let result: String = view.result.iter().collect();
            format!("queue [{queue}]  result \"{result}\"")
        }
    }
}

/// Print one animated frame.
pub fn print_frame(frame: &RenderFrame) {
    println!(
        "{}  {}",
        format_step_line(frame.step, frame.total_steps, &frame.message),
        format_view(&frame.view)
    );
}

/// Print a configuration summary.
pub fn print_config_summary(config: &VizConfig) {
    println!("  Schema version:       {}", config.schema_version);
    println!(
        "  Palindrome interval:  {} ms",
        config.playback.palindrome_interval_ms
    );
    println!("  Alien interval:       {} ms", config.playback.alien_interval_ms);
    println!("  Default speed:        {}", config.default_speed());
    println!("  Initial problem:      {}", config.session.initial_problem);
    println!(
        "  Palindrome input:     \"{}\"",
        config.session.palindrome_input
    );
    println!(
        "  Alien words:          {}",
        config.session.alien_words.join(", ")
    );
    println!("  Log filter:           {}", config.logging.filter);
}
