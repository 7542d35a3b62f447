use crate::types::*;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::PathBuf;

pub const APP_NAME: &str = "backplane-tools";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const CONFIG_PATH_ENV: &str = "BACKPLANE_TOOLS_CONFIG";
pub const ROOT_DIR_ENV: &str = "BACKPLANE_TOOLS_ROOT_DIR";
pub const GITHUB_API_URL_ENV: &str = "BACKPLANE_TOOLS_GITHUB_API_URL";

pub const SETTING_KEYS: [&str; 2] = ["root_dir", "github_api_url"];

pub fn get_config_file_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let path = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join(APP_NAME)
        .join(CONFIG_FILE_NAME);
    tracing::debug!("Config file path: {}", path.display());
    Ok(path)
}

pub fn load_config() -> Result<BackplaneToolsConfig> {
    let config_path = get_config_file_path()?;

    let mut config: BackplaneToolsConfig = if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Could not read config file at {}", config_path.display()))?;
        serde_json::from_str(&content).with_context(|| "Could not parse config file as JSON")?
    } else {
        BackplaneToolsConfig::default()
    };

    apply_env_overrides(&mut config.settings, |key| std::env::var(key).ok());
    Ok(config)
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(root_dir) = var(ROOT_DIR_ENV) {
        settings.root_dir = root_dir;
    }

    if let Some(api_url) = var(GITHUB_API_URL_ENV) {
        settings.github_api_url = api_url;
    }
}

pub fn save_config(config: &BackplaneToolsConfig) -> Result<()> {
    let config_path = get_config_file_path()?;
    let config_dir = config_path
        .parent()
        .ok_or_else(|| anyhow!("Invalid config path"))?;

    fs::create_dir_all(config_dir)
        .with_context(|| format!("Could not create config directory {}", config_dir.display()))?;

    let content = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, content)
        .with_context(|| format!("Could not write config file at {}", config_path.display()))?;

    Ok(())
}

pub fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                format!("_{}", c.to_lowercase())
            } else {
                c.to_string()
            }
        })
        .collect::<String>()
        .to_lowercase()
}

pub fn get_setting(settings: &Settings, key: &str) -> Option<String> {
    match normalize_key(key).as_str() {
        "root_dir" => Some(settings.root_dir.clone()),
        "github_api_url" => Some(settings.github_api_url.clone()),
        _ => None,
    }
}

pub fn set_setting(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match normalize_key(key).as_str() {
        "root_dir" => settings.root_dir = value.to_string(),
        "github_api_url" => settings.github_api_url = value.trim_end_matches('/').to_string(),
        other => {
            return Err(anyhow!(
                "'{}' is not a valid configuration setting. Valid settings: {}",
                other,
                SETTING_KEYS.join(", ")
            ))
        }
    }
    Ok(())
}

pub fn unset_setting(settings: &mut Settings, key: &str) -> Result<()> {
    let defaults = Settings::default();
    match normalize_key(key).as_str() {
        "root_dir" => settings.root_dir = defaults.root_dir,
        "github_api_url" => settings.github_api_url = defaults.github_api_url,
        other => {
            return Err(anyhow!(
                "'{}' is not a valid configuration setting. Valid settings: {}",
                other,
                SETTING_KEYS.join(", ")
            ))
        }
    }
    Ok(())
}
