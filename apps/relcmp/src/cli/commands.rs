//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{KeyMode, Outcome};
use crate::config::Config;
use relcmp_core::{ArrayComparator, ChangeFilter, KeyDiff, RelcmpError, Value, canonical_cmp};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

// =============================================================================
// INPUT VALIDATION
// =============================================================================

/// Validate file path before reading.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it
/// names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, RelcmpError> {
    let canonical = path.canonicalize().map_err(|e| {
        RelcmpError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(RelcmpError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), RelcmpError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| RelcmpError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(RelcmpError::InputTooLarge {
            actual: metadata.len(),
            limit: max_size,
            unit: "bytes",
        });
    }
    Ok(())
}

/// Validate the number of records in one list.
fn validate_record_count(count: usize, config: &Config) -> Result<(), RelcmpError> {
    if count > config.max_records {
        return Err(RelcmpError::InputTooLarge {
            actual: count as u64,
            limit: config.max_records as u64,
            unit: "records",
        });
    }
    Ok(())
}

/// Read a file within the configured limits and parse it as JSON.
fn read_json(path: &Path, config: &Config) -> Result<Value, RelcmpError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, config.max_file_size)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| RelcmpError::Io(format!("Read file: {}", e)))?;

    serde_json::from_slice(&contents)
        .map_err(|e| RelcmpError::Parse(format!("'{}': {}", path.display(), e)))
}

/// Turn a parsed JSON value into a list of records.
fn into_records(value: Value, path: &Path, config: &Config) -> Result<Vec<Value>, RelcmpError> {
    let kind = value.kind();
    let records = value.into_array().ok_or_else(|| {
        RelcmpError::Parse(format!(
            "'{}': expected an array of records, found {}",
            path.display(),
            kind
        ))
    })?;
    validate_record_count(records.len(), config)?;
    Ok(records)
}

/// Load one record list from a JSON file.
pub fn load_records(path: &Path, config: &Config) -> Result<Vec<Value>, RelcmpError> {
    let records = into_records(read_json(path, config)?, path, config)?;
    tracing::info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Load an array of record lists from a JSON file.
pub fn load_snapshots(path: &Path, config: &Config) -> Result<Vec<Vec<Value>>, RelcmpError> {
    let snapshots = into_records(read_json(path, config)?, path, config)?
        .into_iter()
        .map(|snapshot| into_records(snapshot, path, config))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!("Loaded {} snapshots from {:?}", snapshots.len(), path);
    Ok(snapshots)
}

// =============================================================================
// COMPARISON
// =============================================================================

/// Order of record keys: absent keys first, then [`canonical_cmp`].
fn key_order(left: &Option<Value>, right: &Option<Value>) -> Ordering {
    match (left, right) {
        (Some(a), Some(b)) => canonical_cmp(a, b),
        _ => left.is_some().cmp(&right.is_some()),
    }
}

/// Compare two record lists under a key mode.
///
/// Keys are sorted and merged, so this stays O(n log n) for whole records
/// as well as for key fields.
pub fn compare_records(mode: &KeyMode, left: &[Value], right: &[Value]) -> bool {
    ArrayComparator::new(|record: &Value| mode.key(record))
        .compare_sorted_by(left, right, key_order)
}

/// Diff two record lists under a key mode.
pub fn diff_records(mode: &KeyMode, left: &[Value], right: &[Value]) -> KeyDiff<Option<Value>> {
    ArrayComparator::new(|record: &Value| mode.key(record))
        .diff_sorted_by(left, right, key_order)
}

/// Indices of the snapshots a change filter lets through.
pub fn distinct_snapshots(mode: &KeyMode, snapshots: Vec<Vec<Value>>) -> Vec<usize> {
    let mut filter = ChangeFilter::new(|a: &[Value], b: &[Value]| compare_records(mode, a, b));

    snapshots
        .into_iter()
        .enumerate()
        .filter_map(|(index, snapshot)| filter.observe(snapshot).then_some(index))
        .collect()
}

/// Render a key for text output.
fn render_key(key: &Option<Value>) -> Result<String, RelcmpError> {
    match key {
        Some(value) => serde_json::to_string(value).map_err(serialize_error),
        None => Ok("<missing>".to_string()),
    }
}

/// One key of a diff report. Absent keys have no `key` member, so they stay
/// distinct from a present `null`.
fn report_key(key: &Option<Value>) -> serde_json::Value {
    match key {
        Some(value) => serde_json::json!({ "present": true, "key": value }),
        None => serde_json::json!({ "present": false }),
    }
}

/// JSON report of a diff, as printed by `diff --json-mode`.
pub fn diff_report(mode: &KeyMode, diff: &KeyDiff<Option<Value>>) -> serde_json::Value {
    serde_json::json!({
        "equivalent": diff.is_empty(),
        "key": mode.to_string(),
        "missing": diff.missing.iter().map(report_key).collect::<Vec<_>>(),
        "unexpected": diff.unexpected.iter().map(report_key).collect::<Vec<_>>()
    })
}

fn serialize_error(e: serde_json::Error) -> RelcmpError {
    RelcmpError::Io(format!("Serialize output: {}", e))
}

fn print_json(output: &serde_json::Value) -> Result<(), RelcmpError> {
    let text = serde_json::to_string_pretty(output).map_err(serialize_error)?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// COMPARE COMMAND
// =============================================================================

/// Tell whether two record lists are equivalent.
pub fn cmd_compare(
    config: &Config,
    mode: &KeyMode,
    json_mode: bool,
    left: &Path,
    right: &Path,
) -> Result<Outcome, RelcmpError> {
    tracing::debug!("Comparing by key: {}", mode);

    let left_records = load_records(left, config)?;
    let right_records = load_records(right, config)?;
    let equivalent = compare_records(mode, &left_records, &right_records);

    if json_mode {
        print_json(&serde_json::json!({
            "equivalent": equivalent,
            "key": mode.to_string(),
            "left_count": left_records.len(),
            "right_count": right_records.len()
        }))?;
    } else {
        println!("Equivalent: {}", if equivalent { "yes" } else { "no" });
        println!("Key:        {}", mode);
        println!("Left:       {} records ({})", left_records.len(), left.display());
        println!("Right:      {} records ({})", right_records.len(), right.display());
    }

    Ok(if equivalent {
        Outcome::Same
    } else {
        Outcome::Changed
    })
}

// =============================================================================
// DIFF COMMAND
// =============================================================================

/// Show the keys present on one side only.
pub fn cmd_diff(
    config: &Config,
    mode: &KeyMode,
    json_mode: bool,
    left: &Path,
    right: &Path,
) -> Result<Outcome, RelcmpError> {
    tracing::debug!("Diffing by key: {}", mode);

    let left_records = load_records(left, config)?;
    let right_records = load_records(right, config)?;
    let diff = diff_records(mode, &left_records, &right_records);

    if json_mode {
        print_json(&diff_report(mode, &diff))?;
    } else if diff.is_empty() {
        println!("No differences (key: {})", mode);
    } else {
        println!("Missing from right ({}):", diff.missing.len());
        for key in &diff.missing {
            println!("  - {}", render_key(key)?);
        }
        println!("Unexpected in right ({}):", diff.unexpected.len());
        for key in &diff.unexpected {
            println!("  + {}", render_key(key)?);
        }
    }

    Ok(if diff.is_empty() {
        Outcome::Same
    } else {
        Outcome::Changed
    })
}

// =============================================================================
// CHANGES COMMAND
// =============================================================================

/// Show which snapshots a change filter lets through.
pub fn cmd_changes(
    config: &Config,
    mode: &KeyMode,
    json_mode: bool,
    file: &Path,
) -> Result<Outcome, RelcmpError> {
    tracing::debug!("Filtering snapshots by key: {}", mode);

    let snapshots = load_snapshots(file, config)?;
    let total = snapshots.len();
    let distinct = distinct_snapshots(mode, snapshots);

    if json_mode {
        print_json(&serde_json::json!({
            "key": mode.to_string(),
            "snapshots": total,
            "distinct": distinct
        }))?;
    } else {
        println!("Snapshots: {}", total);
        println!("Distinct:  {}", distinct.len());
        for index in &distinct {
            println!("  #{}", index);
        }
    }

    Ok(if distinct.len() > 1 {
        Outcome::Changed
    } else {
        Outcome::Same
    })
}
