//! # Configuration
//!
//! Loads `relcmp.toml`.
//!
//! Lookup order:
//! 1. `--config <FILE>` (must exist)
//! 2. `RELCMP_CONFIG` environment variable (must exist)
//! 3. `./relcmp.toml`, if present
//! 4. Built-in defaults
//!
//! ```toml
//! key = "id"
//! max_file_size = 104857600
//! max_records = 100000
//! ```

use relcmp_core::primitives::{DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_RECORDS, ID_FIELD};
use relcmp_core::{KeyPath, RelcmpError};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "RELCMP_CONFIG";

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "relcmp.toml";

/// Maximum size of the config file itself (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Key path used when neither `--key` nor `--full` is given.
    pub key: String,
    /// Largest accepted input file, in bytes.
    pub max_file_size: u64,
    /// Largest accepted number of records per list.
    pub max_records: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key: ID_FIELD.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, RelcmpError> {
        let config: Self =
            toml::from_str(text).map_err(|e| RelcmpError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load using the standard lookup order.
    pub fn load(explicit: Option<&Path>) -> Result<Self, RelcmpError> {
        Self::load_from(explicit, std::env::var_os(CONFIG_ENV))
    }

    /// Load with the environment value passed in.
    pub fn load_from(explicit: Option<&Path>, env: Option<OsString>) -> Result<Self, RelcmpError> {
        let required = explicit
            .map(Path::to_path_buf)
            .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from));

        let path = match required {
            Some(path) => path,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    tracing::debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        tracing::debug!("Loading config from {:?}", path);
        Self::read(&path)
    }

    fn read(path: &Path) -> Result<Self, RelcmpError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            RelcmpError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(RelcmpError::InputTooLarge {
                actual: metadata.len(),
                limit: MAX_CONFIG_FILE_SIZE,
                unit: "bytes",
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            RelcmpError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<(), RelcmpError> {
        if self.max_file_size == 0 {
            return Err(RelcmpError::Config(
                "max_file_size must be greater than zero".to_string(),
            ));
        }
        if self.max_records == 0 {
            return Err(RelcmpError::Config(
                "max_records must be greater than zero".to_string(),
            ));
        }
        self.key_path().map(|_| ())
    }

    /// The configured default key as a parsed path.
    pub fn key_path(&self) -> Result<KeyPath, RelcmpError> {
        KeyPath::parse(&self.key)
    }
}
