//! Integration tests for the dataunits CLI.
//!
//! These tests run the built binary against snapshot files in a temporary
//! directory and check its output and exit status.

use rstest::{fixture, rstest};
use serde_json::Value;
use tempfile::TempDir;

mod common;
use common::{run_dataunits_in_dir, snapshot_json, write_snapshot};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Directory holding `units.json` where B references A
#[fixture]
fn pair_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_snapshot(
        temp.path(),
        "units.json",
        &snapshot_json(&[("B", &["A"]), ("A", &[])]),
    );
    temp
}

/// Directory holding `chain.json`: C -> B -> A, plus D -> A
#[fixture]
fn chain_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_snapshot(
        temp.path(),
        "chain.json",
        &snapshot_json(&[("A", &[]), ("B", &["A"]), ("C", &["B"]), ("D", &["A"])]),
    );
    temp
}

/// Directory holding `cycle.json` where A and B reference each other
#[fixture]
fn cycle_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_snapshot(
        temp.path(),
        "cycle.json",
        &snapshot_json(&[("A", &["B"]), ("B", &["A"])]),
    );
    temp
}

/// A unit whose filter logic names conditions it does not have
const BAD_FILTER_LOGIC: &str =
    r#"[{"developerName":"A","object":"Account","fields":["Id"],"filterLogic":"1 AND 2"}]"#;

const STRICT_CONFIG: &str = "engine:\n  check-filter-logic: true\n";

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

// ============================================================================
// Order Command Tests
// ============================================================================

#[rstest]
fn test_order_lists_numbered_units(pair_dir: TempDir) {
    let output = run_dataunits_in_dir(pair_dir.path(), &["order", "units.json"]);

    assert!(
        output.status.success(),
        "order failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["1. A", "2. B"]);
}

#[rstest]
fn test_order_json(pair_dir: TempDir) {
    let output = run_dataunits_in_dir(pair_dir.path(), &["--json", "order", "units.json"]);

    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!(["A", "B"]));
}

#[rstest]
fn test_order_empty_snapshot(temp_dir: TempDir) {
    write_snapshot(temp_dir.path(), "empty.json", "[]");

    let output = run_dataunits_in_dir(temp_dir.path(), &["order", "empty.json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Snapshot contains no data units."));
}

#[rstest]
fn test_order_accepts_jsonl(temp_dir: TempDir) {
    let content = format!(
        "{}\n{}\n",
        common::unit_json("B", &["A"]),
        common::unit_json("A", &[])
    );
    write_snapshot(temp_dir.path(), "units.jsonl", &content);

    let output = run_dataunits_in_dir(temp_dir.path(), &["--json", "order", "units.jsonl"]);

    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!(["A", "B"]));
}

#[rstest]
#[case::text(&["order", "cycle.json"])]
#[case::json(&["--json", "order", "cycle.json"])]
fn test_order_rejects_cycle(cycle_dir: TempDir, #[case] args: &[&str]) {
    let output = run_dataunits_in_dir(cycle_dir.path(), args);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no order may be printed on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert!(stderr.contains("A -> B -> A"), "stderr: {stderr}");
}

#[rstest]
fn test_order_missing_snapshot_fails(temp_dir: TempDir) {
    let output = run_dataunits_in_dir(temp_dir.path(), &["order", "missing.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
}

// ============================================================================
// Validate Command Tests
// ============================================================================

#[rstest]
fn test_validate_json(chain_dir: TempDir) {
    let output = run_dataunits_in_dir(chain_dir.path(), &["--json", "validate", "chain.json"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({ "valid": true, "unitCount": 4 })
    );
}

#[rstest]
fn test_validate_text_uses_ascii_icon_without_color(chain_dir: TempDir) {
    let output = run_dataunits_in_dir(chain_dir.path(), &["validate", "chain.json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4 data units, no circular dependencies"));
    assert!(stdout.is_ascii(), "NO_COLOR output should be ASCII: {stdout}");
}

#[rstest]
fn test_validate_missing_reference_target(temp_dir: TempDir) {
    write_snapshot(
        temp_dir.path(),
        "units.json",
        &snapshot_json(&[("A", &["Ghost"])]),
    );

    let output = run_dataunits_in_dir(temp_dir.path(), &["validate", "units.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ghost"), "stderr: {stderr}");
}

// ============================================================================
// Deps / Dependents Command Tests
// ============================================================================

#[rstest]
#[case::deps_all(&["deps", "chain.json", "C"], serde_json::json!([
    { "developerName": "B", "depth": 1 },
    { "developerName": "A", "depth": 2 },
]))]
#[case::deps_limited(&["deps", "chain.json", "C", "--depth", "1"], serde_json::json!([
    { "developerName": "B", "depth": 1 },
]))]
#[case::dependents_all(&["dependents", "chain.json", "A"], serde_json::json!([
    { "developerName": "B", "depth": 1 },
    { "developerName": "D", "depth": 1 },
    { "developerName": "C", "depth": 2 },
]))]
#[case::dependents_limited(&["dependents", "chain.json", "A", "-d", "1"], serde_json::json!([
    { "developerName": "B", "depth": 1 },
    { "developerName": "D", "depth": 1 },
]))]
fn test_traverse_json(chain_dir: TempDir, #[case] args: &[&str], #[case] expected: Value) {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);

    let output = run_dataunits_in_dir(chain_dir.path(), &full);

    assert!(
        output.status.success(),
        "traverse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout_json(&output), expected);
}

#[rstest]
fn test_dependents_text_lists_indented_units(chain_dir: TempDir) {
    let output = run_dataunits_in_dir(chain_dir.path(), &["dependents", "chain.json", "A"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["A dependents:", "  - B", "  - D", "    - C"]);
}

#[rstest]
fn test_deps_of_leaf_reports_none(chain_dir: TempDir) {
    let output = run_dataunits_in_dir(chain_dir.path(), &["deps", "chain.json", "A"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A has no dependencies."));
}

#[rstest]
#[case::deps("deps")]
#[case::dependents("dependents")]
fn test_unknown_unit_fails(chain_dir: TempDir, #[case] command: &str) {
    let output = run_dataunits_in_dir(chain_dir.path(), &[command, "chain.json", "Ghost"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: Data unit not found: Ghost"),
        "stderr: {stderr}"
    );
}

#[rstest]
fn test_blank_unit_name_is_rejected(chain_dir: TempDir) {
    let output = run_dataunits_in_dir(chain_dir.path(), &["deps", "chain.json", "  "]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Developer name cannot be empty"));
}

// ============================================================================
// Check-Edge Command Tests
// ============================================================================

#[rstest]
#[case::closes_cycle("A", "C", true)]
#[case::self_edge("B", "B", true)]
#[case::safe("C", "D", false)]
fn test_check_edge_json(
    chain_dir: TempDir,
    #[case] from: &str,
    #[case] to: &str,
    #[case] creates_cycle: bool,
) {
    let output = run_dataunits_in_dir(
        chain_dir.path(),
        &["--json", "check-edge", "chain.json", "--from", from, "--to", to],
    );

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({ "from": from, "to": to, "createsCycle": creates_cycle })
    );
}

#[rstest]
#[case::cycle("A", "C", "A -> C would create a circular dependency")]
#[case::safe("C", "D", "C -> D is safe")]
fn test_check_edge_text(
    chain_dir: TempDir,
    #[case] from: &str,
    #[case] to: &str,
    #[case] expected: &str,
) {
    let output = run_dataunits_in_dir(
        chain_dir.path(),
        &["check-edge", "chain.json", "--from", from, "--to", to],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(expected), "stdout: {stdout}");
}

#[rstest]
fn test_check_edge_unknown_unit_fails(chain_dir: TempDir) {
    let output = run_dataunits_in_dir(
        chain_dir.path(),
        &["check-edge", "chain.json", "--from", "A", "--to", "Ghost"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Data unit not found: Ghost"), "stderr: {stderr}");
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[rstest]
fn test_filter_logic_is_ignored_by_default(temp_dir: TempDir) {
    write_snapshot(temp_dir.path(), "units.json", BAD_FILTER_LOGIC);

    let output = run_dataunits_in_dir(temp_dir.path(), &["validate", "units.json"]);

    assert!(
        output.status.success(),
        "default config must not check filter logic: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[rstest]
fn test_config_flag_enables_filter_logic_check(temp_dir: TempDir) {
    write_snapshot(temp_dir.path(), "units.json", BAD_FILTER_LOGIC);
    std::fs::write(temp_dir.path().join("strict.yaml"), STRICT_CONFIG).unwrap();

    let output = run_dataunits_in_dir(
        temp_dir.path(),
        &["--config", "strict.yaml", "validate", "units.json"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid filter logic"), "stderr: {stderr}");
}

#[rstest]
fn test_config_file_in_working_directory_is_used(temp_dir: TempDir) {
    write_snapshot(temp_dir.path(), "units.json", BAD_FILTER_LOGIC);
    std::fs::write(temp_dir.path().join("dataunits.yaml"), STRICT_CONFIG).unwrap();

    let output = run_dataunits_in_dir(temp_dir.path(), &["order", "units.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid filter logic"), "stderr: {stderr}");
}

#[rstest]
fn test_missing_config_flag_file_fails(pair_dir: TempDir) {
    let output = run_dataunits_in_dir(
        pair_dir.path(),
        &["-c", "nope.yaml", "order", "units.json"],
    );

    assert!(!output.status.success());
}
