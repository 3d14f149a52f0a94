//! Integration tests for ritmo-cli.
//!
//! Tests invoke the built `ritmo` binary end-to-end: creating a starter
//! file, inspecting it, and playing it with hard time/hop bounds.

use std::process::Command;

use tempfile::TempDir;

/// Helper to get the path to the `ritmo` binary built by cargo.
fn ritmo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ritmo"))
}

#[test]
fn cli_init_writes_a_loadable_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("starter.toml");

    let output = ritmo_bin()
        .arg("init")
        .arg(&file)
        .output()
        .expect("failed to run ritmo init");
    assert!(output.status.success(), "ritmo init failed");
    assert!(file.exists());

    let content = std::fs::read_to_string(&file).unwrap();
    assert!(content.contains("[[nodes]]"));
    assert!(content.contains("[[edges]]"));
}

#[test]
fn cli_init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("starter.toml");
    std::fs::write(&file, "name = \"precious\"\n").unwrap();

    let output = ritmo_bin().arg("init").arg(&file).output().unwrap();
    assert!(!output.status.success());
    let content = std::fs::read_to_string(&file).unwrap();
    assert!(content.contains("precious"), "file must be untouched");

    let output = ritmo_bin()
        .args(["init", "--force"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn cli_show_lists_nodes_edges_and_delays() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("starter.toml");
    assert!(ritmo_bin().arg("init").arg(&file).output().unwrap().status.success());

    let output = ritmo_bin().arg("show").arg(&file).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Composition: Starter"));
    assert!(stdout.contains("Traverse delay: 500 ms"));
    assert!(stdout.contains("Nodes (4):"));
    assert!(stdout.contains("Edges (4):"));
    assert!(stdout.contains("0->1"));
    assert!(stdout.contains("Default start nodes: 0"));
}

#[test]
fn cli_play_stops_at_the_hop_bound() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("starter.toml");
    assert!(ritmo_bin().arg("init").arg(&file).output().unwrap().status.success());

    // Two hops of the starter graph: the start node and its first child.
    let output = ritmo_bin()
        .args(["play", "--max-hops", "2", "--seed", "1"])
        .arg(&file)
        .output()
        .expect("failed to run ritmo play");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Playing 'Starter'"));
    assert!(stdout.contains("node 0: synth"));
    assert!(stdout.contains("2 hop(s) fired"));
}

#[test]
fn cli_play_rejects_unknown_start_node() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("starter.toml");
    assert!(ritmo_bin().arg("init").arg(&file).output().unwrap().status.success());

    let output = ritmo_bin()
        .args(["play", "--start", "42"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("start node 42 does not exist"));
}

#[test]
fn cli_play_time_limit_zero_fires_only_immediate_hops() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("starter.toml");
    assert!(ritmo_bin().arg("init").arg(&file).output().unwrap().status.success());

    let output = ritmo_bin()
        .args(["play", "--for-ms", "0", "--seed", "1"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 hop(s) fired"), "got: {stdout}");
}
