//! # Primitives
//!
//! Fixed constants shared by the comparison engine and the CLI.
//!
//! These values are compiled in and are immutable at runtime.

/// Separator between segments of a key path (`"left.id"`).
pub const KEY_PATH_SEPARATOR: char = '.';

/// Key path used by the identity-key comparator.
pub const ID_FIELD: &str = "id";

/// Maximum number of segments in a key path.
///
/// Keys are shallow in practice; anything deeper is almost certainly
/// a malformed argument.
pub const MAX_KEY_PATH_DEPTH: usize = 32;

/// Maximum length of a single key path string.
pub const MAX_KEY_PATH_LENGTH: usize = 256;

// =============================================================================
// INPUT LIMITS (defaults, overridable through configuration)
// =============================================================================

/// Default maximum size of an input file (100 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Default maximum number of records in a single input list.
pub const DEFAULT_MAX_RECORDS: usize = 100_000;
