use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gifcut() -> Command {
    let mut cmd = Command::cargo_bin("gifcut").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    gifcut()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("probe"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn test_presets_lists_defaults() {
    gifcut()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("10s"))
        .stdout(predicate::str::contains("00:00:30"))
        .stdout(predicate::str::contains("1m"))
        .stdout(predicate::str::contains("custom"));
}

#[test]
fn test_presets_json() {
    let output = gifcut().args(["presets", "--json"]).output().unwrap();
    assert!(output.status.success());

    let presets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let labels: Vec<&str> = presets
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["10s", "30s", "1m"]);
}

#[test]
fn test_presets_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("gifcut.toml");
    std::fs::write(
        &config,
        "[gifcut]\n\n[[gifcut.presets]]\nlabel = \"5s\"\nduration_secs = 5\n",
    )
    .unwrap();

    gifcut()
        .args(["--config", config.to_str().unwrap(), "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5s"))
        .stdout(predicate::str::contains("10s").not());
}

#[test]
fn test_convert_missing_input_fails() {
    gifcut()
        .args(["convert", "--input", "/nonexistent/video.mp4", "--preset", "10s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_preset_conflicts_with_explicit_bounds() {
    gifcut()
        .args([
            "convert", "--input", "video.mp4", "--preset", "10s", "--start", "00:00:05",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_invalid_log_level_rejected() {
    gifcut()
        .args(["--log-level", "loud", "presets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn test_env_overrides_are_validated() {
    gifcut()
        .env("GIFCUT_FIELD_POLICY", "sometimes")
        .arg("presets")
        .assert()
        .failure();
}
