use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::template::DEFAULT_BODY_TEMPLATE;

/// Represents the complete configuration for release-rotate.
///
/// Contains branch-to-tag mappings, the release body template, retry/behavior options, and hook scripts.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub branches: HashMap<String, String>,

    #[serde(default)]
    pub template: TemplateConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

/// Returns the default release body template.
fn default_body_template() -> String {
    DEFAULT_BODY_TEMPLATE.to_string()
}

/// Configuration for release body rendering.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TemplateConfig {
    #[serde(default = "default_body_template")]
    pub body: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            body: default_body_template(),
        }
    }
}

/// Returns the default backoff between retry attempts, in milliseconds.
fn default_retry_backoff_ms() -> u64 {
    500
}

/// Configuration for behavior customization.
///
/// Controls runtime behavior of release-rotate without affecting what gets published.
/// Retries apply only to transient host failures and never reorder the
/// delete-then-create sequence.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub retry_attempts: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    #[serde(default)]
    pub skip_confirmation: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            retry_attempts: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
            skip_confirmation: false,
        }
    }
}

/// Hook script paths for each lifecycle point.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HooksConfig {
    #[serde(default)]
    pub pre_replace: Option<String>,

    #[serde(default)]
    pub post_publish: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut branches = HashMap::new();
        branches.insert("main".to_string(), "unstable".to_string());
        branches.insert("develop".to_string(), "nightly".to_string());

        Config {
            branches,
            template: TemplateConfig::default(),
            behavior: BehaviorConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaserotate.toml` in current directory
/// 3. `~/.config/.releaserotate.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releaserotate.toml").exists() {
        fs::read_to_string("./releaserotate.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releaserotate.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
