//! Loading Data Unit snapshots from disk.
//!
//! Two formats are accepted:
//! - `.jsonl`: one Data Unit object per line, blank lines ignored
//! - anything else: a JSON array of Data Unit objects

use std::path::Path;

use tokio::fs;

use crate::domain::DataUnit;
use crate::error::{Error, Result};

/// Load a snapshot, choosing the format by file extension.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read, [`Error::Snapshot`] if it cannot
/// be parsed.
pub async fn load_snapshot(path: &Path) -> Result<Vec<DataUnit>> {
    let content = fs::read_to_string(path).await?;

    let is_jsonl = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));

    let units = if is_jsonl {
        parse_jsonl(&content)?
    } else {
        parse_json(&content)?
    };

    tracing::debug!(path = %path.display(), unit_count = units.len(), "Loaded snapshot");
    Ok(units)
}

/// Parse a JSON array of Data Units.
///
/// # Errors
///
/// [`Error::Snapshot`] on malformed input.
pub fn parse_json(content: &str) -> Result<Vec<DataUnit>> {
    serde_json::from_str(content).map_err(|e| Error::Snapshot(e.to_string()))
}

/// Parse one Data Unit per non-blank line.
///
/// # Errors
///
/// [`Error::Snapshot`] naming the first malformed line (1-based).
pub fn parse_jsonl(content: &str) -> Result<Vec<DataUnit>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .map_err(|e| Error::Snapshot(format!("line {}: {e}", idx + 1)))
        })
        .collect()
}
