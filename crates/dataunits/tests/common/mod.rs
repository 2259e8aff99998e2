//! Common test utilities shared across CLI integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the dataunits binary built for this test run
pub fn dataunits_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dataunits"))
}

/// Run the dataunits binary in the specified directory.
///
/// Colors and Unicode icons are turned off so assertions can match plain text.
pub fn run_dataunits_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(dataunits_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("DATAUNITS_ASCII")
        .output()
        .expect("Failed to execute dataunits binary")
}

/// Write a snapshot file into `dir` and return its file name
pub fn write_snapshot(dir: &Path, name: &str, content: &str) -> String {
    std::fs::write(dir.join(name), content).expect("Failed to write snapshot");
    name.to_string()
}

/// JSON for a unit selecting `Id` and referencing `Id` on each of `deps`
pub fn unit_json(name: &str, deps: &[&str]) -> String {
    let filters: Vec<serde_json::Value> = deps
        .iter()
        .map(|dep| {
            serde_json::json!({
                "field": "AccountId",
                "operator": "=",
                "valueType": "reference",
                "reference": { "dataUnit": dep, "field": "Id" },
            })
        })
        .collect();
    serde_json::json!({
        "developerName": name,
        "object": "Account",
        "fields": ["Id", "AccountId"],
        "filters": filters,
    })
    .to_string()
}

/// A JSON array snapshot built from `(name, deps)` pairs
pub fn snapshot_json(units: &[(&str, &[&str])]) -> String {
    let body: Vec<String> = units.iter().map(|(name, deps)| unit_json(name, deps)).collect();
    format!("[{}]", body.join(",\n"))
}
