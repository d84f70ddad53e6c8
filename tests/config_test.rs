// tests/config_test.rs
use release_rotate::config::{load_config, Config};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.branches.get("main"), Some(&"unstable".to_string()));
    assert_eq!(
        config.branches.get("develop"),
        Some(&"nightly".to_string())
    );
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[branches]
"main" = "unstable"
"release" = "edge"

[behavior]
retry_attempts = 2
retry_backoff_ms = 100
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.branches.get("main"), Some(&"unstable".to_string()));
    assert_eq!(config.branches.get("release"), Some(&"edge".to_string()));
    assert_eq!(config.behavior.retry_attempts, 2);
    assert_eq!(config.behavior.retry_backoff_ms, 100);
}

#[test]
fn test_default_values() {
    let config = Config::default();
    // Test that defaults are properly set in the Default implementation
    assert_eq!(config.behavior.retry_attempts, 0);
    assert_eq!(config.behavior.retry_backoff_ms, 500);
    assert!(!config.behavior.skip_confirmation);
    assert!(config.hooks.pre_replace.is_none());
    assert!(config.hooks.post_publish.is_none());
    assert_eq!(
        config.template.body,
        "Latest unstable release\n- Git sha {sha}\n- Updated at {timestamp}"
    );
}

#[test]
fn test_partial_file_fills_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[branches]
"main" = "unstable"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    // Sections absent from the file fall back to defaults
    assert_eq!(config.behavior.retry_attempts, 0);
    assert!(config
        .template
        .body
        .starts_with("Latest unstable release"));
    // And the branch table is exactly what the file says
    assert_eq!(config.branches.len(), 1);
}

#[test]
fn test_template_override() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[template]
body = "Edge build {sha} from {timestamp}"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.template.body, "Edge build {sha} from {timestamp}");
}

#[test]
fn test_hooks_section() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[hooks]
pre_replace = "./scripts/guard.sh"
post_publish = "./scripts/notify.sh"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(
        config.hooks.pre_replace,
        Some("./scripts/guard.sh".to_string())
    );
    assert_eq!(
        config.hooks.post_publish,
        Some("./scripts/notify.sh".to_string())
    );
}

#[test]
fn test_invalid_toml_fails() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"not [valid toml").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
fn test_missing_explicit_file_fails() {
    assert!(load_config(Some("/nonexistent/releaserotate.toml")).is_err());
}
