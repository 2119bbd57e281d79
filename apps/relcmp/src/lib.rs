//! # relcmp
//!
//! Library half of the relcmp binary: CLI definition, command
//! implementations and configuration loading. Exposed so integration tests
//! can drive commands without spawning a process.

pub mod cli;
pub mod config;
