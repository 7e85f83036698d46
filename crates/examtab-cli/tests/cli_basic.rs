//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! never touch the network.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_examtab"))
        .args(args)
        .env("EXAMTAB_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
    stdout
}

fn parse_json(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

#[test]
fn test_config_list_has_all_sections() {
    let dir = tempfile::tempdir().unwrap();
    let config = parse_json(&run_cli_success(dir.path(), &["config", "list"]));
    assert_eq!(config["fallback"]["jee_advanced"], "18-05-2026");
    assert_eq!(config["display"]["show_seconds"], true);
    let url = config["feed"]["url"].as_str().unwrap();
    assert!(url.starts_with("https://"));
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(
        dir.path(),
        &["config", "set", "fallback.neet", "03-05-2027"],
    );
    let value = run_cli_success(dir.path(), &["config", "get", "fallback.neet"]);
    assert_eq!(value.trim(), "03-05-2027");
}

#[test]
fn test_config_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["config", "set", "fallback.neet", "31-02-2027"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "display.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_countdown_offline_json() {
    let dir = tempfile::tempdir().unwrap();
    let view = parse_json(&run_cli_success(
        dir.path(),
        &["countdown", "--offline", "--exam", "neet", "--json"],
    ));
    assert_eq!(view["examId"], "neet");
    assert_eq!(view["displayName"], "NEET");
    assert!(view["countdown"]["totalMillis"].is_i64());
    assert_eq!(view["ready"]["catalog"], true);
}

#[test]
fn test_countdown_no_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let view = parse_json(&run_cli_success(
        dir.path(),
        &["countdown", "--offline", "--no-seconds", "--json"],
    ));
    assert_eq!(view["examId"], "jeeAdv");
    assert!(view["countdown"].get("seconds").is_none());
}

#[test]
fn test_custom_exam_lifecycle() {
    let dir = tempfile::tempdir().unwrap();

    let out = run_cli_success(
        dir.path(),
        &[
            "exam",
            "custom",
            "set",
            "--name",
            "BITSAT",
            "--date",
            "01-01-2099",
        ],
    );
    assert!(out.contains("saved BITSAT (01-01-2099)"));

    let shown = parse_json(&run_cli_success(dir.path(), &["exam", "custom", "show"]));
    assert_eq!(shown["name"], "BITSAT");
    assert_eq!(shown["valid"], true);

    run_cli_success(dir.path(), &["exam", "use", "custom", "--offline"]);
    let view = parse_json(&run_cli_success(
        dir.path(),
        &["countdown", "--offline", "--json"],
    ));
    assert_eq!(view["examId"], "custom");
    assert_eq!(view["displayName"], "BITSAT");
    assert!(view["countdown"]["totalMillis"].as_i64().unwrap() > 0);

    run_cli_success(dir.path(), &["exam", "custom", "clear"]);
    let view = parse_json(&run_cli_success(
        dir.path(),
        &["countdown", "--offline", "--json"],
    ));
    assert_eq!(view["displayName"], "Custom Exam");
    assert_eq!(view["countdown"]["totalMillis"], 0);
}

#[test]
fn test_custom_exam_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["exam", "custom", "set", "--date", "2099-01-01"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid calendar date"));

    let (_, stderr, code) = run_cli(
        dir.path(),
        &["exam", "custom", "set", "--date", "01/01/2099"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("DD-MM-YYYY"));
}

#[test]
fn test_exam_use_rejects_unknown_id() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["exam", "use", "cuet", "--offline"]);
    assert_ne!(code, 0);
}

#[test]
fn test_exam_list_json_marks_built_ins() {
    let dir = tempfile::tempdir().unwrap();
    let views = parse_json(&run_cli_success(
        dir.path(),
        &["exam", "list", "--offline", "--json"],
    ));
    let ids: Vec<&str> = views
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["examId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["jee", "neet", "jeeAdv"]);
}

#[test]
fn test_watch_stops_after_ticks() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["config", "set", "display.tick_ms", "100"]);
    let out = run_cli_success(dir.path(), &["watch", "--offline", "--ticks", "2"]);
    assert!(out.contains("JEE Advanced"));
    // Clock lines carry an AM/PM time.
    assert!(out.lines().any(|l| l.ends_with("AM") || l.ends_with("PM")));
}
