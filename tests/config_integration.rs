//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use sdf4d::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("S4D_SCENE__PATH", "scenes/from_env.ron");
    let config = AppConfig::load().unwrap();
    println!("Scene path: {}", config.scene.path);
    assert_eq!(config.scene.path, "scenes/from_env.ron");
    std::env::remove_var("S4D_SCENE__PATH");
}

#[test]
#[serial]
fn test_default_config_loading() {
    // Remove env var to test file-based config
    std::env::remove_var("S4D_SCENE__PATH");

    let cwd = std::env::current_dir().unwrap();
    println!("Current dir: {:?}", cwd);
    println!(
        "config/default.toml exists: {}",
        cwd.join("config/default.toml").exists()
    );

    let config = AppConfig::load().unwrap();
    assert_eq!(config.scene.path, "scenes/demo.ron");
    assert_eq!(config.field.far_distance, 1000.0);
    assert_eq!(config.probe.resolution, 48);
}

#[test]
#[serial]
fn test_nested_env_override() {
    std::env::set_var("S4D_FIELD__FAR_DISTANCE", "250.0");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.field.far_distance, 250.0);
    std::env::remove_var("S4D_FIELD__FAR_DISTANCE");
}
