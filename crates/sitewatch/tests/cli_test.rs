//! Integration tests for the `sitewatch` CLI binary.
//!
//! Every test runs against its own temporary config file, so nothing
//! touches the user's real configuration.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `sitewatch` binary with env isolation.
fn sitewatch_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sitewatch");
    cmd.env("HOME", "/tmp/sitewatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/sitewatch-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("SITEWATCH_CONFIG")
        .env_remove("SITEWATCH_OUTPUT")
        .env_remove("SITEWATCH_REFRESH_INTERVAL_SECS")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Temp dir holding a config that points at an alert file.
fn file_source(alerts_json: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let alerts = dir.path().join("alerts.json");
    std::fs::write(&alerts, alerts_json).unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "[source]\nkind = \"file\"\npath = {:?}\n",
            alerts.display().to_string()
        ),
    )
    .unwrap();
    (dir, config)
}

const ALERTS: &str = r#"[
  {"id":"a1","timestamp":1700000000000,"type":"security","severity":"high",
   "title":"Door forced","description":"","source":"RFID","status":"active","acknowledged":false},
  {"id":"a2","timestamp":1700000100000,"type":"power","severity":"low",
   "title":"UPS on battery","description":"","source":"UPS","status":"active","acknowledged":false}
]"#;

fn mock_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    (dir, config)
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_dir, config) = mock_config();
    let output = sitewatch_cmd(&config).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config).arg("--help").assert().success().stdout(
        predicate::str::contains("alerts")
            .and(predicate::str::contains("thresholds"))
            .and(predicate::str::contains("notifications")),
    );
}

#[test]
fn test_version_flag() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitewatch"));
}

#[test]
fn test_completions_bash() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Alerts (mock source) ────────────────────────────────────────────

#[test]
fn test_alerts_list_orders_active_before_resolved() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["alerts", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("alert_01\nalert_02\nalert_03\n");
}

#[test]
fn test_alerts_list_resolved_only() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["alerts", "list", "--resolved", "-o", "plain"])
        .assert()
        .success()
        .stdout("alert_03\n");
}

#[test]
fn test_alerts_list_flags_conflict() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["alerts", "list", "--active", "--resolved"])
        .assert()
        .code(2);
}

#[test]
fn test_alerts_table_has_headers() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["alerts", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Severity")
                .and(predicate::str::contains("Unauthorized Access Attempt")),
        );
}

#[test]
fn test_alerts_show_json() {
    let (_dir, config) = mock_config();
    let output = sitewatch_cmd(&config)
        .args(["alerts", "show", "alert_02", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let alert = stdout_json(&output);
    assert_eq!(alert["type"], "temperature");
    assert_eq!(alert["severity"], "medium");
    assert_eq!(alert["status"], "active");
}

#[test]
fn test_alerts_show_unknown_is_not_found() {
    let (_dir, config) = mock_config();
    let output = sitewatch_cmd(&config)
        .args(["alerts", "show", "alert_99"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("not found"));
}

#[test]
fn test_alerts_stats_json() {
    let (_dir, config) = mock_config();
    let output = sitewatch_cmd(&config)
        .args(["alerts", "stats", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats = stdout_json(&output);
    assert_eq!(stats["activeCount"], 2);
    assert_eq!(stats["highPriorityActiveCount"], 1);
    assert_eq!(stats["unacknowledgedCount"], 2);
    assert_eq!(stats["categoryCount"], 3);
}

// ── Alerts (file source) ────────────────────────────────────────────

#[test]
fn test_ack_is_persisted() {
    let (dir, config) = file_source(ALERTS);
    sitewatch_cmd(&config)
        .args(["alerts", "ack", "a2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alert a2 acknowledged"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("alerts.json")).unwrap())
            .unwrap();
    assert_eq!(saved[1]["acknowledged"], true);
    assert_eq!(saved[1]["status"], "active");
    assert_eq!(saved[0]["acknowledged"], false);
}

#[test]
fn test_resolve_twice_reports_no_op() {
    let (_dir, config) = file_source(ALERTS);
    let first = sitewatch_cmd(&config)
        .args(["alerts", "resolve", "a1", "-o", "json"])
        .output()
        .unwrap();
    let first = stdout_json(&first);
    assert_eq!(first["changed"], true);
    assert_eq!(first["alert"]["acknowledged"], true);
    let resolved_at = first["alert"]["resolvedAt"].clone();
    assert!(resolved_at.is_i64());

    let second = sitewatch_cmd(&config)
        .args(["alerts", "resolve", "a1", "-o", "json"])
        .output()
        .unwrap();
    let second = stdout_json(&second);
    assert_eq!(second["changed"], false);
    assert_eq!(second["alert"]["resolvedAt"], resolved_at);
}

#[test]
fn test_ack_unknown_id_exits_4() {
    let (_dir, config) = file_source(ALERTS);
    sitewatch_cmd(&config)
        .args(["alerts", "ack", "zz"])
        .assert()
        .code(4);
}

#[test]
fn test_invalid_record_exits_7() {
    let (_dir, config) = file_source(
        r#"[{"id":"x","timestamp":1,"type":"power","severity":"low","title":"t",
            "description":"","source":"","status":"resolved","acknowledged":true}]"#,
    );
    let output = sitewatch_cmd(&config)
        .args(["alerts", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("index 0"));
}

#[test]
fn test_alerts_list_filters() {
    let (_dir, config) = file_source(ALERTS);
    sitewatch_cmd(&config)
        .args(["alerts", "list", "--type", "power", "-o", "plain"])
        .assert()
        .success()
        .stdout("a2\n");

    sitewatch_cmd(&config)
        .args(["alerts", "ack", "a1"])
        .assert()
        .success();

    sitewatch_cmd(&config)
        .args(["alerts", "list", "--unacked", "-o", "plain"])
        .assert()
        .success()
        .stdout("a2\n");

    sitewatch_cmd(&config)
        .args(["alerts", "list", "-s", "high", "-o", "plain"])
        .assert()
        .success()
        .stdout("a1\n");
}

#[test]
fn test_unknown_types_survive_ack() {
    let (dir, config) = file_source(
        r#"[
  {"id":"a","timestamp":1700000000000,"type":"flood","severity":"high",
   "title":"Water","description":"","source":"Leak sensor","status":"active","acknowledged":false},
  {"id":"b","timestamp":1700000000000,"type":"fire","severity":"high",
   "title":"Smoke","description":"","source":"Detector","status":"active","acknowledged":false}
]"#,
    );
    sitewatch_cmd(&config)
        .args(["alerts", "ack", "a"])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("alerts.json")).unwrap())
            .unwrap();
    assert_eq!(saved[0]["type"], "flood");
    assert_eq!(saved[1]["type"], "fire");

    let output = sitewatch_cmd(&config)
        .args(["alerts", "stats", "-o", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["categoryCount"], 2);

    sitewatch_cmd(&config)
        .args(["alerts", "list", "--type", "fire", "-o", "plain"])
        .assert()
        .success()
        .stdout("b\n");
}

#[test]
fn test_file_source_without_path_is_config_error() {
    let (_dir, config) = mock_config();
    std::fs::write(&config, "[source]\nkind = \"file\"\n").unwrap();
    sitewatch_cmd(&config)
        .args(["alerts", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("source.path"));
}

// ── Thresholds ──────────────────────────────────────────────────────

#[test]
fn test_thresholds_set_is_saved() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["thresholds", "set", "temperature", "--high", "27.5"])
        .assert()
        .success();

    let output = sitewatch_cmd(&config)
        .args(["thresholds", "show", "-o", "json"])
        .output()
        .unwrap();
    let rows = stdout_json(&output);
    assert_eq!(rows[0]["metric"], "temperature");
    assert_eq!(rows[0]["high"], 27.5);
    assert_eq!(rows[0]["low"], 18.0);
}

#[test]
fn test_env_overrides_are_not_saved() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .env("SITEWATCH_REFRESH_INTERVAL_SECS", "5")
        .args(["thresholds", "disable", "power"])
        .assert()
        .success();

    let text = std::fs::read_to_string(&config).unwrap();
    assert!(text.contains("refresh_interval_secs = 30"), "{text}");
    assert!(!text.contains("refresh_interval_secs = 5"), "{text}");
}

#[test]
fn test_thresholds_set_requires_a_bound() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["thresholds", "set", "humidity"])
        .assert()
        .code(2);
}

#[test]
fn test_thresholds_power_has_no_bounds() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["thresholds", "set", "power", "--high", "1"])
        .assert()
        .code(2);
}

#[test]
fn test_thresholds_disable() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["thresholds", "disable", "security", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("security=no"))
        .stderr(predicate::str::contains("security alerts disabled"));
}

// ── Notifications ───────────────────────────────────────────────────

#[test]
fn test_notifications_enable_sms() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["notifications", "enable", "sms", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sms=yes"))
        .stderr(predicate::str::contains("Sms Notifications Enabled"));

    sitewatch_cmd(&config)
        .args(["notifications", "recipients", "--channel", "sms", "-o", "plain"])
        .assert()
        .success()
        .stdout("john.doe@example.com\n");
}

#[test]
fn test_recipients_empty_for_disabled_channel() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["notifications", "recipients", "--channel", "sms", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_echoes_override() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let (_dir, config) = mock_config();
    sitewatch_cmd(&config).args(["config", "init"]).assert().success();
    assert!(config.exists());

    sitewatch_cmd(&config)
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    sitewatch_cmd(&config)
        .args(["config", "init", "--force", "--yes"])
        .assert()
        .success();
}

#[test]
fn test_config_show_json() {
    let (_dir, config) = mock_config();
    let output = sitewatch_cmd(&config)
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    let cfg = stdout_json(&output);
    assert_eq!(cfg["refresh_interval_secs"], 30);
    assert_eq!(cfg["source"]["kind"], "mock");
    assert_eq!(cfg["alerts"]["notifications"]["sms"], false);
}
