//! Integration tests running the `grc` binary.

use std::process::{Command, Output};
use tempfile::TempDir;

fn grc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

/// Tests that `route` prints the matching handler as JSON
#[test]
fn test_route_json_output() {
    let output = grc(&["--format", "json", "route", "grc:///gserver/config/serverflags?open"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(report["handler"], "Config");
    assert_eq!(report["action"], "open");
    assert_eq!(report["params"]["name"], "serverflags");
}

/// Tests that an invalid identifier fails with a message on stderr
#[test]
fn test_route_invalid_resource() {
    let output = grc(&["route", "file:///etc/passwd"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid resource"));
}

/// Tests the `config init` then `config show` round trip on a temp file
#[test]
fn test_config_init_and_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();

    assert!(grc(&["config", "init", "--path", path]).status.success());
    assert!(!grc(&["config", "init", "--path", path]).status.success());

    let output = grc(&["config", "show", "--path", path]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("listing_timeout_secs = 5"));
}
