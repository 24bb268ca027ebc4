use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn help_lists_subcommands() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("sensitivity"));
}

#[test]
fn project_prints_default_case_table() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.args(["project", "--scenario", "base"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Scenario: Base Case (base)"))
        .stdout(predicate::str::contains("Cumulative CF"))
        .stdout(predicate::str::contains("Payback Year:     Year 5"));
}

#[test]
fn project_all_formats_writes_files() {
    let out_dir = assert_fs::TempDir::new().unwrap();
    let out_arg = out_dir.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.args(["project", "--format", "all", "--out-dir", &out_arg]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Comparison:"));

    for name in [
        "base_case_projection.csv",
        "base_case_projection.json",
        "base_case_report.txt",
        "conservative_projection.csv",
        "optimistic_report.txt",
        "scenario_comparison.csv",
    ] {
        out_dir.child(name).assert(predicate::path::exists());
    }

    let csv = fs::read_to_string(out_dir.child("base_case_projection.csv").path()).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("year,"));
    assert_eq!(lines.count(), 5);

    out_dir
        .child("base_case_report.txt")
        .assert(predicate::str::contains("Business Case Report: Base Case"));
}

#[test]
fn project_single_format_uses_case_file() {
    let out_dir = assert_fs::TempDir::new().unwrap();
    let out_arg = out_dir.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.args([
        "--case",
        "data/sample_case.json",
        "project",
        "--scenario",
        "premium",
        "--format",
        "json",
        "--out-dir",
        &out_arg,
    ]);
    cmd.assert().success();

    let json = fs::read_to_string(out_dir.child("premium_pricing_projection.json").path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(doc["result"]["scenario"]["id"], "premium");
    assert_eq!(doc["case"]["general"]["product_type"], "hardware");
    assert_eq!(doc["result"]["yearly"].as_array().unwrap().len(), 5);

    out_dir.child("premium_pricing_projection.csv").assert(predicate::path::missing());
    out_dir.child("scenario_comparison.csv").assert(predicate::path::missing());
}

#[test]
fn unknown_scenario_fails() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.args(["project", "--scenario", "moonshot"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("moonshot"));
}

#[test]
fn missing_case_file_fails() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.args(["--case", "does/not/exist.json", "compare"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load business case"));
}

#[test]
fn compare_writes_csv_with_scenario_table_override() {
    let output = assert_fs::NamedTempFile::new("comparison.csv").unwrap();
    let output_arg = output.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.args([
        "--scenarios",
        "data/scenarios.csv",
        "compare",
        "--output",
        &output_arg,
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Market Downturn"))
        .stdout(predicate::str::contains("Comparison written to"));

    let csv = fs::read_to_string(output.path()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("base,Base Case,"));
    assert!(lines[2].starts_with("downturn,Market Downturn,"));
    assert!(lines[3].starts_with("breakout,Breakout Year,"));
}

#[test]
fn sensitivity_prints_both_sides() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.args(["sensitivity", "--scenario", "optimistic"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Optimistic (price -10%)"))
        .stdout(predicate::str::contains("Optimistic (price +10%)"))
        .stdout(predicate::str::contains("Net profit swing:"));
}

#[test]
fn market_table_override_extends_horizon_data() {
    let case = assert_fs::NamedTempFile::new("case.json").unwrap();
    case.write_str(r#"{ "general": { "horizon_years": 7 } }"#).unwrap();
    let case_arg = case.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("business-case");
    cmd.args([
        "--case",
        &case_arg,
        "--market",
        "data/market.csv",
        "project",
        "--scenario",
        "base",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^\s+7 ").unwrap());
}
