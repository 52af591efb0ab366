//! algoviz CLI - step-by-step algorithm visualizer
//!
//! Command-line interface for tracing and animating the visualized problems.

use std::process::ExitCode;

use algoviz::cli::{log_filter, run_cli, Args};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(log_filter(&args));
    run_cli(args)
}

/// `RUST_LOG` wins; otherwise the command's config filter applies.
fn init_tracing(fallback: String) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
