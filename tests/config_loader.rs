//! Config file loading, validation and CLI overrides.

use clap::Parser;
use remote_ui::cli::Cli;
use remote_ui::config::{Config, ConfigError, ScreenChoice};
use std::fs;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

#[test]
fn missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.defaults.screen, ScreenChoice::All);
    assert_eq!(config.defaults.tick_rate_ms, 250);
}

#[test]
fn partial_file_fills_in_defaults() {
    let (_dir, path) = write_config(
        r#"[defaults]
screen = "input"

[network]
delay_ms = 500
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.defaults.screen, ScreenChoice::Input);
    assert_eq!(config.defaults.tick_rate_ms, 250);
    assert_eq!(config.network.delay_ms, 500);
    assert_eq!(config.network.base_latency_ms, 30);
    assert_eq!(config.region.error_history, 50);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let (_dir, path) = write_config("[defaults\nscreen = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn zero_tick_rate_fails_validation() {
    let (_dir, path) = write_config("[defaults]\ntick_rate_ms = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn serialized_config_loads_back_unchanged() {
    let mut config = Config::default();
    config.defaults.screen = ScreenChoice::Button;
    config.network.delay_ms = 120;
    let (_dir, path) = write_config(&config.to_toml().unwrap());
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn cli_overrides_file_values() {
    let (_dir, path) = write_config("[defaults]\nscreen = \"tabs\"\n");
    let path_arg = path.to_string_lossy().to_string();
    let cli = Cli::try_parse_from([
        "remote-ui",
        "--config",
        path_arg.as_str(),
        "--screen",
        "button",
        "--net-delay",
        "40",
    ])
    .unwrap();
    let config = cli.apply(Config::load_from(cli.config.as_deref().unwrap()).unwrap());
    assert_eq!(config.defaults.screen, ScreenChoice::Button);
    assert_eq!(config.network.delay_ms, 40);
}
