//! CLI binary end-to-end tests.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(workspace: &TempDir, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_pagehold");
    Command::new(bin)
        .env("XDG_CONFIG_HOME", workspace.path().join("xdg"))
        .env_remove("PAGEHOLD_LOG")
        .arg("--workspace")
        .arg(workspace.path())
        .arg("--quiet")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_resolve_prints_canonical_identity() {
    let workspace = TempDir::new().unwrap();
    let output = run(
        &workspace,
        &["resolve", "--query", "listings", "--args", r#"{"rooms":2,"city":"berlin"}"#],
    );
    assert!(
        output.status.success(),
        "stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(r#"listings:{"city":"berlin","rooms":2}"#));
    assert!(stdout.contains("digest: "));
}

#[test]
fn test_resolve_rejects_non_object_args() {
    let workspace = TempDir::new().unwrap();
    let output = run(&workspace, &["resolve", "--query", "listings", "--args", "[1,2]"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must serialize to a map"));
}

#[test]
fn test_replay_json_output() {
    let workspace = TempDir::new().unwrap();
    let script = workspace.path().join("ticks.json");
    fs::write(
        &script,
        r#"{"ticks": [
            {"query": "listings", "args": {"city": "berlin"}, "status": "CanLoadMore", "items": [1, 2, 3]},
            {"query": "listings", "args": {"city": "munich"}, "status": "LoadingFirstPage"},
            {"query": "listings", "args": {"city": "munich"}, "status": "Exhausted", "items": [4]}
        ]}"#,
    )
    .unwrap();

    let output = run(
        &workspace,
        &["replay", script.to_str().unwrap(), "--format", "json"],
    );
    assert!(
        output.status.success(),
        "stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ticks = parsed["ticks"].as_array().unwrap();
    assert_eq!(ticks.len(), 3);
    assert_eq!(ticks[1]["origin"], "fallback");
    assert_eq!(ticks[1]["item_count"], 3);
    assert_eq!(ticks[1]["loading_first_page"], true);
    assert_eq!(ticks[2]["item_count"], 1);
    assert_eq!(parsed["stats"]["snapshots"], 2);
}

#[test]
fn test_replay_text_table() {
    let workspace = TempDir::new().unwrap();
    let script = workspace.path().join("ticks.json");
    fs::write(
        &script,
        r#"{"ticks": [{"query": "listings", "status": "LoadingFirstPage"}]}"#,
    )
    .unwrap();

    let output = run(&workspace, &["replay", script.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("placeholder"));
    assert!(stdout.contains("0 queries, 0 recorded snapshots"));
}

#[test]
fn test_config_command_reads_workspace_file() {
    let workspace = TempDir::new().unwrap();
    let config_dir = workspace.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[pagination]\nload_more_count = 9\n",
    )
    .unwrap();

    let output = run(&workspace, &["config", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["pagination"]["load_more_count"], 9);
}
