//! CLI argument structs for all commands.

use std::path::PathBuf;

use clap::Parser;

/// Arguments for commands that only need a snapshot
#[derive(Parser, Debug, Clone)]
pub struct SnapshotArgs {
    /// Snapshot file (`.json` array or `.jsonl`, one unit per line)
    pub snapshot: PathBuf,
}

/// Arguments for the `deps` and `dependents` commands
#[derive(Parser, Debug, Clone)]
pub struct TraverseArgs {
    /// Snapshot file (`.json` array or `.jsonl`, one unit per line)
    pub snapshot: PathBuf,

    /// Developer name of the unit to start from
    #[arg(value_parser = validate_developer_name)]
    pub unit: String,

    /// Maximum traversal depth
    #[arg(short, long)]
    pub depth: Option<usize>,
}

/// Arguments for the `check-edge` command
#[derive(Parser, Debug, Clone)]
pub struct CheckEdgeArgs {
    /// Snapshot file (`.json` array or `.jsonl`, one unit per line)
    pub snapshot: PathBuf,

    /// Unit that would hold the new reference
    #[arg(long, value_parser = validate_developer_name)]
    pub from: String,

    /// Unit the new reference would point to
    #[arg(long, value_parser = validate_developer_name)]
    pub to: String,
}

/// Validate a developer name given on the command line.
///
/// # Errors
///
/// Returns a message if the name is empty after trimming.
pub fn validate_developer_name(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Developer name cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn developer_name_is_trimmed() {
        assert_eq!(validate_developer_name("  Accounts ").unwrap(), "Accounts");
        assert!(validate_developer_name("   ").is_err());
    }
}
