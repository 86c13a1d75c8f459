use clap::Parser;
use issues_server::cli::Cli;
use issues_server::{ResponseMode, ServerConfig};
use tempfile::TempDir;

#[test]
fn test_parse_valid_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("issues.toml");
    std::fs::write(&path, "bind = \"127.0.0.1:8080\"\nstrict_status = true\n").unwrap();

    let config = ServerConfig::load(&path).unwrap();

    assert_eq!(config.bind, "127.0.0.1:8080");
    assert!(config.strict_status);
    assert_eq!(config.response_mode(), ResponseMode::Strict);
}

#[test]
fn test_handle_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();

    // Config file doesn't exist - should fall back to defaults
    let config = ServerConfig::load(&temp_dir.path().join("issues.toml")).unwrap();

    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_malformed_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("issues.toml");
    std::fs::write(&path, "strict_status = \"sometimes\"").unwrap();

    let err = ServerConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));
}

#[test]
fn test_cli_flags_override_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("issues.toml");
    std::fs::write(&path, "bind = \"127.0.0.1:8080\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "issues-server",
        "--config",
        path.to_str().unwrap(),
        "--bind",
        "127.0.0.1:9999",
        "--strict-status",
    ])
    .unwrap();
    let config = cli.resolve_config().unwrap();

    assert_eq!(config.bind, "127.0.0.1:9999");
    assert_eq!(config.response_mode(), ResponseMode::Strict);
}
