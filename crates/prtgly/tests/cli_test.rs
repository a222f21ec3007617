//! Integration tests for the `prtgly` CLI binary.
//!
//! Argument parsing, help output, completions, and error handling run
//! without a server; the query tests talk to a local mock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `prtgly` binary with env isolation.
///
/// Clears all `PRTGLY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn prtgly_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("prtgly");
    cmd.env("HOME", "/tmp/prtgly-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/prtgly-cli-test-nonexistent")
        .env_remove("PRTGLY_PROFILE")
        .env_remove("PRTGLY_SERVER")
        .env_remove("PRTGLY_USER")
        .env_remove("PRTGLY_PASSHASH")
        .env_remove("PRTGLY_API_TOKEN")
        .env_remove("PRTGLY_OUTPUT")
        .env_remove("PRTGLY_INSECURE")
        .env_remove("PRTGLY_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary against `server` off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut full: Vec<String> = vec![
        "--server".into(),
        server.uri(),
        "--api-token".into(),
        "t0ken".into(),
        "--color".into(),
        "never".into(),
    ];
    full.extend(args.iter().map(|a| (*a).to_owned()));
    tokio::task::spawn_blocking(move || prtgly_cmd().args(full).output().unwrap())
        .await
        .unwrap()
}

fn table_body(content: &str, rows: &serde_json::Value) -> serde_json::Value {
    let total = rows.as_array().map_or(0, Vec::len);
    let mut body = json!({ "prtg-version": "24.1.92.1554", "treesize": total });
    body[content] = rows.clone();
    body
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = prtgly_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    prtgly_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("PRTG")
            .and(predicate::str::contains("objects"))
            .and(predicate::str::contains("sensors"))
            .and(predicate::str::contains("devices")),
    );
}

#[test]
fn test_version_flag() {
    prtgly_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("prtgly"));
}

#[test]
fn test_objects_help_lists_type_and_resolve() {
    prtgly_cmd()
        .args(["objects", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--type")
                .and(predicate::str::contains("--resolve"))
                .and(predicate::str::contains("--limit")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    prtgly_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    prtgly_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = prtgly_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_without_server_reports_missing_config() {
    let output = prtgly_cmd().arg("devices").output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("No server configured"), "{text}");
}

#[test]
fn test_server_without_credentials_is_auth_error() {
    let output = prtgly_cmd()
        .args(["--server", "https://prtg.example.com", "sensors"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_unknown_profile() {
    prtgly_cmd()
        .args(["--profile", "nope", "devices"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

#[test]
fn test_invalid_output_format() {
    let output = prtgly_cmd()
        .args(["--output", "invalid", "devices"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("possible values"), "{text}");
}

#[test]
fn test_concurrency_requires_resolve() {
    prtgly_cmd()
        .args(["objects", "--concurrency", "2"])
        .assert()
        .code(2);
}

#[test]
fn test_config_show_no_config() {
    prtgly_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_profiles_empty() {
    prtgly_cmd()
        .args(["config", "profiles"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No profiles configured"));
}

#[test]
fn test_config_profiles_lists_default() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("prtgly");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "default_profile = \"lab\"\n\n\
         [profiles.lab]\nserver = \"https://prtg.lab.example\"\npasshash = \"123\"\n\n\
         [profiles.prod]\nserver = \"https://prtg.example.com\"\n",
    )
    .unwrap();

    prtgly_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("* lab")
                .and(predicate::str::contains("  prod"))
                .and(predicate::str::contains("123").not()),
        );
}

// ── Against a mock server ───────────────────────────────────────────

#[tokio::test]
async fn test_objects_by_type_plain_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .and(query_param("content", "objects"))
        .and(query_param("filter_type", "device"))
        .and(query_param("apitoken", "t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_body(
            "objects",
            &json!([
                { "objid": 40, "name": "dc-1", "type_raw": "device", "basetype": "device" },
                { "objid": 41, "name": "dc-2", "type_raw": "device", "basetype": "device" }
            ]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "plain", "objects", "--type", "device"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "40\n41\n");
}

#[tokio::test]
async fn test_objects_resolve_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("content", "objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_body(
            "objects",
            &json!([
                { "objid": 2055, "name": "Ping", "type_raw": "ping", "basetype": "sensor" }
            ]),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("content", "sensors"))
        .and(query_param("filter_objid", "2055"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_body(
            "sensors",
            &json!([
                { "objid": 2055, "name": "Ping", "type_raw": "ping", "basetype": "sensor",
                  "status_raw": 3, "device": "dc-1", "lastvalue": "4 msec" }
            ]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json", "objects", "--resolve"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body[0]["entity"], "sensor");
    assert_eq!(body[0]["last_value"], "4 msec");
}

#[tokio::test]
async fn test_sensors_table_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("content", "sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_body(
            "sensors",
            &json!([
                { "objid": 2055, "name": "Ping", "type_raw": "ping", "status_raw": 5,
                  "device": "dc-1", "message_raw": "Timeout" }
            ]),
        )))
        .mount(&server)
        .await;

    let output = run_against(&server, &["sensors"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ping") && stdout.contains("Timeout"), "{stdout}");
}

#[tokio::test]
async fn test_limit_stops_early() {
    let server = MockServer::start().await;
    let rows: Vec<serde_json::Value> = (1..=5)
        .map(|id| json!({ "objid": id, "name": format!("g{id}"), "type_raw": "group" }))
        .collect();
    Mock::given(method("GET"))
        .and(query_param("content", "groups"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(table_body("groups", &json!(rows))),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "plain", "groups", "--limit", "2"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n2\n");
}

#[tokio::test]
async fn test_unauthorized_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["devices"]).await;

    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Authentication failed"));
}
