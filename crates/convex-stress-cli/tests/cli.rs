//! End-to-end tests for the convex-stress binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's real config file.
fn stress(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("convex-stress").unwrap();
    cmd.env("CONVEX_STRESS_CONFIG", config_dir.join("config.json"))
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// ============================================================================
// evaluate
// ============================================================================

#[test]
fn evaluate_svb_minimal() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["evaluate", "--preset", "svb", "-f", "minimal"])
        .assert()
        .success()
        .stdout("67.55 at-risk\n");
}

#[test]
fn evaluate_defaults_to_configured_preset() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["evaluate", "-f", "minimal"])
        .assert()
        .success()
        .stdout("67.55 at-risk\n");
}

#[test]
fn evaluate_stable_json() {
    let dir = TempDir::new().unwrap();
    let doc = json_stdout(stress(dir.path()).args(["evaluate", "-p", "stable", "-f", "json"]));
    assert_eq!(doc["source"], "stable");
    assert_eq!(doc["result"]["tier"], "Stable");
    let score = doc["result"]["score"].as_f64().unwrap();
    assert!((score - 22.5).abs() < 1e-9);
    assert_eq!(doc["drivers"].as_array().unwrap().len(), 6);
    assert_eq!(doc["inputs"]["rateShockPct"], 1.0);
}

#[test]
fn evaluate_ceilings_from_flags() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args([
            "evaluate",
            "--rate-shock",
            "6",
            "--uninsured",
            "100",
            "--duration",
            "10",
            "--losses",
            "120",
            "--withdrawal",
            "100",
            "--concentration",
            "100",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("100.00 critical\n");
}

#[test]
fn evaluate_clamps_out_of_range() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args([
            "evaluate",
            "--rate-shock",
            "-4",
            "--uninsured",
            "-10",
            "--duration",
            "0",
            "--losses",
            "-1",
            "--withdrawal",
            "0",
            "--concentration",
            "0",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("0.00 stable\n");
}

#[test]
fn evaluate_rejects_non_finite() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["evaluate", "--uninsured", "NaN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Non-finite input for uninsuredPct"));
}

#[test]
fn evaluate_from_input_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inputs.json");
    fs::write(
        &path,
        r#"{"rateShockPct": 0, "uninsuredPct": 0, "durationYears": 0,
            "unrealizedLossPctCap": 0, "withdrawalSpeed": 0, "concentration": 0}"#,
    )
    .unwrap();
    stress(dir.path())
        .args(["evaluate", "-f", "minimal", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout("0.00 stable\n");
}

#[test]
fn evaluate_rejects_incomplete_input_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inputs.json");
    fs::write(&path, r#"{"rateShockPct": 2.5}"#).unwrap();
    stress(dir.path())
        .args(["evaluate", "--input"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing field"));
}

#[test]
fn evaluate_table_shows_drivers() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["evaluate", "--preset", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Critical"))
        .stdout(predicate::str::contains("Uninsured deposits"))
        .stdout(predicate::str::contains("Drivers"));
}

// ============================================================================
// presets
// ============================================================================

#[test]
fn presets_minimal_lists_catalog() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["presets", "-f", "minimal"])
        .assert()
        .success()
        .stdout("svb\nstable\nrateShock\nrun\n");
}

#[test]
fn presets_json_carries_tiers() {
    let dir = TempDir::new().unwrap();
    let doc = json_stdout(stress(dir.path()).args(["presets", "-f", "json"]));
    let tiers: Vec<&str> = doc
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["tier"].as_str().unwrap())
        .collect();
    assert_eq!(tiers, vec!["AtRisk", "Stable", "AtRisk", "Critical"]);
}

// ============================================================================
// session
// ============================================================================

#[test]
fn session_records_cycles_and_rejects_bad_lines() {
    let dir = TempDir::new().unwrap();
    let script = "# replay\npreset stable\nuninsured=90\nbogus\nwithdrawal=inf\n\
                  history\nquit\nconcentration=100\n";
    let doc = json_stdout(
        stress(dir.path())
            .args(["session", "--labels", "sequence", "-f", "json"])
            .write_stdin(script),
    );
    assert_eq!(doc["cycles"], 3);
    assert_eq!(doc["rejected"], 2);
    let labels: Vec<&str> = doc["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["#1", "#2", "#3"]);
    assert_eq!(doc["last"]["inputs"]["uninsuredPct"], 90.0);
    assert_eq!(doc["last"]["inputs"]["concentration"], 30.0);
}

#[test]
fn session_strict_stops_on_bad_line() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["session", "--strict"])
        .write_stdin("uninsured=95\nleverage=3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn session_skips_line_with_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let script = b"uninsured=90\nwithdrawal=\xff\xfe\nconcentration=100\n".to_vec();
    let doc = json_stdout(
        stress(dir.path())
            .args(["session", "--labels", "sequence", "-f", "json"])
            .write_stdin(script),
    );
    assert_eq!(doc["cycles"], 3);
    assert_eq!(doc["rejected"], 1);
    assert_eq!(doc["last"]["inputs"]["uninsuredPct"], 90.0);
    assert_eq!(doc["last"]["inputs"]["concentration"], 100.0);
}

#[test]
fn session_strict_stops_on_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["session", "--strict"])
        .write_stdin(b"uninsured=90\nwithdrawal=\xff\n".to_vec())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2: not valid UTF-8"));
}

#[test]
fn session_history_is_bounded() {
    let dir = TempDir::new().unwrap();
    let script: String = (1..=34).map(|i| format!("uninsured={}\n", i)).collect();
    let output = stress(dir.path())
        .args(["session", "--labels", "sequence", "-f", "csv"])
        .write_stdin(script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "label,score");
    assert_eq!(lines.len(), 31);
    // 35 cycles in total; the first five were evicted.
    assert!(lines[1].starts_with("#6,"));
    assert!(lines[30].starts_with("#35,"));
}

#[test]
fn session_reads_script_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("script.txt");
    fs::write(&path, "preset run\n").unwrap();
    stress(dir.path())
        .args(["session", "-f", "minimal", "--preset", "stable"])
        .arg(&path)
        .assert()
        .success()
        .stdout("72.90\n");
}

// ============================================================================
// sweep
// ============================================================================

#[test]
fn sweep_reports_crossing() {
    let dir = TempDir::new().unwrap();
    let doc = json_stdout(stress(dir.path()).args([
        "sweep", "withdrawal", "--preset", "svb", "--steps", "100", "-f", "json",
    ]));
    assert_eq!(doc["points"].as_array().unwrap().len(), 101);
    assert_eq!(doc["crossings"][0]["tier"], "Critical");
    assert_eq!(doc["crossings"][0]["value"], 100.0);
}

#[test]
fn sweep_rejects_zero_steps() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["sweep", "duration", "--steps", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("steps must be at least 1"));
}

#[test]
fn sweep_rejects_unknown_factor() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["sweep", "leverage"])
        .assert()
        .failure();
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_precision_applies_to_output() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["config", "set", "precision", "4"])
        .assert()
        .success();
    stress(dir.path())
        .args(["config", "get", "decimal_precision", "-f", "minimal"])
        .assert()
        .success()
        .stdout("4\n");
    stress(dir.path())
        .args(["evaluate", "-p", "svb", "-f", "minimal"])
        .assert()
        .success()
        .stdout("67.5500 at-risk\n");
}

#[test]
fn config_default_preset_and_format() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["config", "set", "default_preset", "run"])
        .assert()
        .success();
    stress(dir.path())
        .args(["config", "set", "format", "minimal"])
        .assert()
        .success();
    stress(dir.path())
        .arg("evaluate")
        .assert()
        .success()
        .stdout("72.90 critical\n");
}

#[test]
fn config_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["config", "set", "precision", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 6"));
    stress(dir.path())
        .args(["config", "set", "colour", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn config_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["config", "set", "precision", "0"])
        .assert()
        .success();
    stress(dir.path())
        .args(["config", "reset", "--all"])
        .assert()
        .success();
    stress(dir.path())
        .args(["config", "get", "precision", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn config_get_reports_value_source() {
    let dir = TempDir::new().unwrap();
    let doc = json_stdout(stress(dir.path()).args(["config", "get", "precision", "-f", "json"]));
    assert_eq!(doc["key"], "decimal_precision");
    assert_eq!(doc["value"], "2");
    assert_eq!(doc["source"], "default");
    stress(dir.path())
        .args(["config", "set", "label_format", "%M:%S"])
        .assert()
        .success();
    let doc = json_stdout(stress(dir.path()).args(["config", "show", "-f", "json"]));
    let stored: Vec<&str> = doc
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["source"] == "stored")
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(stored, vec!["label_format"]);
}

#[test]
fn config_reset_needs_a_target() {
    let dir = TempDir::new().unwrap();
    stress(dir.path())
        .args(["config", "reset"])
        .assert()
        .failure();
}

#[test]
fn broken_config_blocks_commands_but_not_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"decimal_precision": "99"}"#).unwrap();
    stress(dir.path())
        .args(["evaluate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("decimal_precision"));
    stress(dir.path())
        .args(["config", "reset", "precision"])
        .assert()
        .success();
    stress(dir.path())
        .args(["evaluate", "-f", "minimal"])
        .assert()
        .success()
        .stdout("67.55 at-risk\n");
}

#[test]
fn wrong_type_config_can_be_reset() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"decimal_precision": 4}"#).unwrap();
    stress(dir.path())
        .args(["evaluate"])
        .assert()
        .failure();
    stress(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring unreadable configuration"));
    stress(dir.path())
        .args(["config", "reset", "--all"])
        .assert()
        .success();
    stress(dir.path())
        .args(["evaluate", "-f", "minimal"])
        .assert()
        .success()
        .stdout("67.55 at-risk\n");
}
