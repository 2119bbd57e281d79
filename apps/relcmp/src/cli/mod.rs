//! # relcmp CLI Module
//!
//! This module implements the CLI interface for relcmp.
//!
//! ## Available Commands
//!
//! - `compare` - Tell whether two record lists are equivalent
//! - `diff` - Show the keys that keep two lists from being equivalent
//! - `changes` - Show which snapshots of a list a change filter lets through

mod commands;

use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use relcmp_core::primitives::ID_FIELD;
use relcmp_core::{Identifiable, KeyPath, RelcmpError, Value};
use std::fmt;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// relcmp - compare record lists regardless of order
///
/// Two lists are equivalent when they hold the same keys the same number of
/// times. Order and fields outside the key do not matter.
#[derive(Parser, Debug)]
#[command(name = "relcmp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a relcmp.toml config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tell whether two JSON record lists are equivalent
    Compare {
        /// JSON file holding the first list
        left: PathBuf,

        /// JSON file holding the second list
        right: PathBuf,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Show the keys present on one side only
    Diff {
        /// JSON file holding the first list
        left: PathBuf,

        /// JSON file holding the second list
        right: PathBuf,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Filter a JSON array of list snapshots down to the changes
    Changes {
        /// JSON file holding an array of record lists
        file: PathBuf,

        #[command(flatten)]
        key: KeyArgs,
    },
}

/// Key selection shared by all commands.
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Dotted path of the key field (defaults to the configured key)
    #[arg(short, long, conflicts_with = "full")]
    pub key: Option<String>,

    /// Compare whole records instead of a key field
    #[arg(long)]
    pub full: bool,
}

// =============================================================================
// KEY MODE
// =============================================================================

/// How records are reduced to comparison keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMode {
    /// The `id` property, read through `Identifiable::id`.
    Ids,
    /// Any other key path.
    Path(KeyPath),
    /// The whole record.
    Full,
}

impl KeyMode {
    /// Resolve command-line arguments against the configuration.
    pub fn resolve(args: &KeyArgs, config: &Config) -> Result<Self, RelcmpError> {
        if args.full {
            return Ok(Self::Full);
        }
        let path = match &args.key {
            Some(key) => KeyPath::parse(key)?,
            None => config.key_path()?,
        };
        if path.is_field(ID_FIELD) {
            Ok(Self::Ids)
        } else {
            Ok(Self::Path(path))
        }
    }

    /// The key of one record. Absent keys are `None`.
    pub fn key(&self, record: &Value) -> Option<Value> {
        match self {
            Self::Ids => record.id(),
            Self::Path(path) => path.select(record).cloned(),
            Self::Full => Some(record.clone()),
        }
    }
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ids => write!(f, "{}", ID_FIELD),
            Self::Path(path) => write!(f, "{}", path),
            Self::Full => write!(f, "<full record>"),
        }
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Result of a successful command, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The inputs were equivalent (or never changed).
    Same,
    /// The inputs differed.
    Changed,
}

impl Outcome {
    /// Exit status: 0 for `Same`, 1 for `Changed`. Errors use 2.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Same => 0,
            Self::Changed => 1,
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<Outcome, RelcmpError> {
    let config = Config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Compare { left, right, key } => {
            let mode = KeyMode::resolve(&key, &config)?;
            cmd_compare(&config, &mode, json_mode, &left, &right)
        }
        Commands::Diff { left, right, key } => {
            let mode = KeyMode::resolve(&key, &config)?;
            cmd_diff(&config, &mode, json_mode, &left, &right)
        }
        Commands::Changes { file, key } => {
            let mode = KeyMode::resolve(&key, &config)?;
            cmd_changes(&config, &mode, json_mode, &file)
        }
    }
}
