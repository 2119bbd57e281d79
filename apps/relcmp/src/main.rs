//! # relcmp - Record List Comparator
//!
//! The main binary for comparing lists of related records regardless of
//! their order.
//!
//! ## Usage
//!
//! ```bash
//! # Same relationships, by id?
//! relcmp compare shown.json fresh.json
//!
//! # By a nested key, with a machine-readable answer
//! relcmp --json-mode compare shown.json fresh.json --key left.id
//!
//! # What differs, comparing whole records
//! relcmp diff shown.json fresh.json --full
//!
//! # Which refreshes actually changed the list
//! relcmp changes snapshots.json
//! ```
//!
//! Exit status: 0 equivalent, 1 different, 2 error.

use clap::Parser;
use relcmp::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status for any error.
const EXIT_ERROR: i32 = 2;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    match cli::execute(cli) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Initialize tracing on stderr; stdout carries command output.
///
/// RELCMP_LOG_FORMAT=json enables machine-parseable output. RUST_LOG
/// overrides the default filter.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("RELCMP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose { "relcmp=debug" } else { "relcmp=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
