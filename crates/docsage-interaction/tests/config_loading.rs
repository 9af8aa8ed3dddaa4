use docsage_core::config::AppConfig;
use docsage_interaction::config::{ConfigPaths, load_app_config, load_secret_config};
use tempfile::TempDir;

#[test]
fn test_missing_files_yield_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let paths = ConfigPaths::with_dir(temp_dir.path());

    let app = load_app_config(&paths.config_file).expect("Should fall back to defaults");
    let secret = load_secret_config(&paths.secret_file).expect("Should fall back to empty");

    assert_eq!(app, AppConfig::default());
    assert!(secret.gemini.is_none());
}

#[test]
fn test_load_config_and_secret() {
    let temp_dir = TempDir::new().unwrap();
    let paths = ConfigPaths::with_dir(temp_dir.path());
    std::fs::write(
        &paths.config_file,
        r#"
[session]
highlight_window_ms = 1500
summarize_on_open = false

[gemini]
model_name = "gemini-2.5-pro"
"#,
    )
    .unwrap();
    std::fs::write(
        &paths.secret_file,
        r#"{ "gemini": { "api_key": "abc123" } }"#,
    )
    .unwrap();

    let app = load_app_config(&paths.config_file).unwrap();
    let secret = load_secret_config(&paths.secret_file).unwrap();

    assert_eq!(app.session.highlight_window_ms, 1500);
    assert!(!app.session.summarize_on_open);
    assert_eq!(app.gemini.model_name.as_deref(), Some("gemini-2.5-pro"));
    assert_eq!(secret.gemini.unwrap().api_key, "abc123");
}

#[test]
fn test_malformed_files_are_config_errors() {
    let temp_dir = TempDir::new().unwrap();
    let paths = ConfigPaths::with_dir(temp_dir.path());
    std::fs::write(&paths.config_file, "[session\nbroken").unwrap();
    std::fs::write(&paths.secret_file, "{ not json").unwrap();

    let err = load_app_config(&paths.config_file).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));

    let err = load_secret_config(&paths.secret_file).unwrap_err();
    assert!(err.to_string().contains("secret file"));
}
