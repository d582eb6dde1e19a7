//! Integration tests for the `cheader` command

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper function to get the path to the cheader binary
fn cheader_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test executable name
    path.pop(); // Remove "deps"
    path.push("cheader");
    path
}

/// Run the binary inside `dir`, isolated from user configuration
fn run(
    dir: &TempDir,
    args: &[&str],
) -> Output {
    Command::new(cheader_bin())
        .args(args)
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("CHEADER_PATH")
        .output()
        .unwrap()
}

fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_comments_mode() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(
        &temp_dir,
        "sum.h",
        "#define N 4 // count\nint x = 6 /* six */ + 4 /* four */;\n",
    );

    let output = run(&temp_dir, &["--test", "comments", "sum.h"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "#define N 4  # count\nint x = 6 + 4;\n# six\n# four\n"
    );
}

#[test]
fn test_default_mode_drops_directives() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "flag.h", "#pragma once\n// on\nint flag;\n");

    let output = run(&temp_dir, &["flag.h"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "# on\nint flag;\n");
}

#[test]
fn test_import_with_include_dir() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "inc/gfx/color.h", "typedef int color; /* rgb */\n");

    let output = run(&temp_dir, &["-I", "inc", "--import", "gfx.color"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "typedef int color;  # rgb\n"
    );
}

#[test]
fn test_import_uses_project_config() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "inc/gfx/color.h", "// rgb\ntypedef int color;\n");
    create_test_file(
        &temp_dir,
        "cheader.toml",
        "[translate]\ndocstring = true\n\n[search]\npaths = [\"inc\"]\n",
    );

    let output = run(&temp_dir, &["--import", "gfx.color"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\"\"\"\nrgb\n\"\"\"\ntypedef int color;\n"
    );
}

#[test]
fn test_import_missing_module_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("inc")).unwrap();

    let output = run(&temp_dir, &["-I", "inc", "--import", "gfx.color"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gfx.color"));
}

#[test]
fn test_spans_prints_json() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "one.h", "int x; // only\n");

    let output = run(&temp_dir, &["--spans", "one.h"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["kind"], "single_line");
    assert_eq!(json[0]["body"], " only");
    assert_eq!(json[0]["code_before"], true);
}

#[test]
fn test_missing_input_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    for args in [&["missing.h"][..], &["--test", "comments", "missing.h"][..]] {
        let output = run(&temp_dir, args);
        assert!(!output.status.success(), "args: {:?}", args);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("missing.h"), "stderr: {}", stderr);
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn test_user_and_project_config_merge_per_key() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(
        &temp_dir,
        ".config/cheader/config.toml",
        "[translate]\ndocstring = true\n",
    );
    create_test_file(&temp_dir, "cheader.toml", "[translate]\ncoalesce = false\n");
    create_test_file(&temp_dir, "pair.h", "// a\n// b\nint x;\n");

    let output = run(&temp_dir, &["--test", "comments", "pair.h"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\"\"\"\na\n\"\"\"\n\"\"\"\nb\n\"\"\"\nint x;\n"
    );
}

#[test]
fn test_no_inputs_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&temp_dir, &[]);
    assert!(!output.status.success());
}
