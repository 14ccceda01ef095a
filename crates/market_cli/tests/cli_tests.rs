use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the dme binary
fn dme() -> Command {
    Command::cargo_bin("dme").expect("Failed to find dme binary")
}

/// Stores the readings fixture under `root` and returns the new dataset id.
fn store_fixture(root: &TempDir) -> String {
    let output = dme()
        .arg("store")
        .arg(fixture_path("readings.csv"))
        .arg("--title")
        .arg("Buoy readings")
        .arg("--category")
        .arg("observational")
        .arg("--author")
        .arg("M. Okafor")
        .arg("--license")
        .arg("CC0-1.0")
        .arg("--root")
        .arg(root.path())
        .output()
        .expect("store invocation failed");
    assert!(output.status.success(), "store failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .split_whitespace()
        .find(|token| token.starts_with("dataset_"))
        .expect("store output contains the dataset id")
        .to_string()
}

// ============================================================================
// store / verify / info
// ============================================================================

#[test]
fn test_store_prints_dataset_id() {
    let root = TempDir::new().unwrap();
    let id = store_fixture(&root);
    assert!(id.starts_with("dataset_"));
}

#[test]
fn test_store_rejects_unknown_category() {
    let root = TempDir::new().unwrap();
    dme()
        .arg("store")
        .arg(fixture_path("readings.csv"))
        .arg("--title")
        .arg("X")
        .arg("--category")
        .arg("genomic")
        .arg("--root")
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown data category"));
}

#[test]
fn test_verify_freshly_stored_dataset() {
    let root = TempDir::new().unwrap();
    let id = store_fixture(&root);

    dme()
        .arg("verify")
        .arg(&id)
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Integrity verified"));
}

#[test]
fn test_verify_missing_dataset_fails() {
    let root = TempDir::new().unwrap();
    dme()
        .arg("verify")
        .arg("dataset_20240101000000_000000000000")
        .arg("--root")
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("FAILED"));
}

#[test]
fn test_info_shows_metadata() {
    let root = TempDir::new().unwrap();
    let id = store_fixture(&root);

    dme()
        .arg("info")
        .arg(&id)
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Buoy readings"))
        .stdout(predicate::str::contains("observational"))
        .stdout(predicate::str::contains("M. Okafor"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_filters_by_category() {
    let root = TempDir::new().unwrap();
    store_fixture(&root);

    dme()
        .arg("list")
        .arg("--category")
        .arg("observational")
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 dataset(s)"));

    dme()
        .arg("list")
        .arg("--category")
        .arg("survey")
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 dataset(s)"));
}

#[test]
fn test_list_json_output() {
    let root = TempDir::new().unwrap();
    store_fixture(&root);

    dme()
        .arg("list")
        .arg("--format")
        .arg("json")
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data_type\": \"observational\""));
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_passing_table() {
    let root = TempDir::new().unwrap();
    dme()
        .arg("validate")
        .arg(fixture_path("table.json"))
        .arg("--rules")
        .arg(fixture_path("rules.yml"))
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"));
}

#[test]
fn test_validate_failing_table_exits_nonzero() {
    let root = TempDir::new().unwrap();
    dme()
        .arg("validate")
        .arg(fixture_path("table.json"))
        .arg("--rules")
        .arg(fixture_path("strict_rules.yml"))
        .arg("--root")
        .arg(root.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("column not found in dataset"));
}

#[test]
fn test_validate_missing_rule_file_fails() {
    let root = TempDir::new().unwrap();
    dme()
        .arg("validate")
        .arg(fixture_path("table.json"))
        .arg("--rules")
        .arg("nonexistent.yml")
        .arg("--root")
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read rule file"));
}

// ============================================================================
// transactions
// ============================================================================

#[test]
fn test_transactions_empty_journal() {
    let root = TempDir::new().unwrap();
    dme()
        .arg("transactions")
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 transaction(s)"));
}
