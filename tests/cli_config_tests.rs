//! End-to-end tests for `folioview config` and `folioview variants`.

mod fixtures;
use fixtures::*;

use tempfile::TempDir;

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_show_default() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["config", "show"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Variant: classic"));
    assert!(stdout.contains("(none)"));
}

#[test]
fn test_config_set_then_show_json() {
    let config_dir = TempDir::new().unwrap();

    for (key, value) in [
        ("page.variant", "modern"),
        ("overrides.filter_hide_delay_ms", "450"),
        ("overrides.reveal_root_margin", "0px 0px -80px 0px"),
    ] {
        let output = isolated_command(&["config", "set", key, value], config_dir.path())
            .output()
            .unwrap();
        assert_eq!(
            output.status.code(),
            Some(0),
            "{key}: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let output = isolated_command(&["config", "show", "--json"], config_dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["exists"], true);
    assert_eq!(result["page"]["variant"], "modern");
    assert_eq!(result["overrides"]["filter_hide_delay_ms"], 450);
    assert_eq!(result["overrides"]["reveal_root_margin"], "0px 0px -80px 0px");
    assert!(config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["config", "set", "ui.theme", "dark"], config_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown config key"));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(
        &["config", "set", "overrides.reveal_threshold", "1.5"],
        config_dir.path(),
    )
    .output()
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_path() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["config", "path"], config_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        config_dir.path().join("config.toml").display().to_string()
    );
}

// ============================================================================
// Variants
// ============================================================================

#[test]
fn test_variants_list() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["variants", "--json"], config_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = result
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|variant| variant["name"].as_str())
        .collect();
    assert_eq!(names, ["classic", "modern", "creative", "bold", "video"]);
    assert!(result[0]["preset"].is_null());
}

#[test]
fn test_variants_show_preset() {
    let config_dir = TempDir::new().unwrap();
    let output = isolated_command(&["variants", "--show", "bold", "--json"], config_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result.as_array().map(Vec::len), Some(1));
    let preset = &result[0]["preset"];
    assert_eq!(preset["filter"]["show_stagger"], true);
    assert_eq!(preset["menu"]["lock_scroll"], true);
    assert_eq!(preset["item_click"]["mode"], "navigate");
}
