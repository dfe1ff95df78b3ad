use crate::github::client::DEFAULT_API_URL;
use crate::query::YearMonth;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Org,
    Username,
    YearMonth,
    EndYearMonth,
    ApiUrl,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Org => "org",
            ConfigKey::Username => "username",
            ConfigKey::YearMonth => "yearMonth",
            ConfigKey::EndYearMonth => "endYearMonth",
            ConfigKey::ApiUrl => "apiUrl",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::Org,
            ConfigKey::Username,
            ConfigKey::YearMonth,
            ConfigKey::EndYearMonth,
            ConfigKey::ApiUrl,
        ]
    }
}

/// Filename for the project-specific configuration within the .issue-chars directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".issue-chars";

/// Validated settings for one counting run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub org: String,
    pub username: String,
    pub year_month: YearMonth,
    pub end_year_month: Option<YearMonth>,
    pub api_url: String,
}

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns `Ok(HashMap<ConfigKey, Value>)` with every recognized key; unknown keys are skipped.
/// - Returns an empty HashMap if the input `content` is empty or contains only whitespace.
/// - Returns an `Err` if the JSON parsing fails or the top level is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    if let Value::Object(map) = &value {
        let config_map = ConfigKey::all()
            .iter()
            .filter_map(|key| map.get(key.as_str()).map(|val| (*key, val.clone())))
            .collect();
        return Ok(config_map);
    }

    Err(anyhow::anyhow!("Config must be a JSON object"))
}

/// Reads the config file at `path`. A missing file at the default location
/// is an empty config; a missing file that was asked for explicitly is an error.
pub fn load_config_file(path: &Path, explicit: bool) -> Result<HashMap<ConfigKey, Value>> {
    if !explicit && !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Merges `updates` into `base_config` and returns a new configuration map.
///
/// If a key exists in both, the value from `updates` wins.
pub fn update_config(
    base_config: &HashMap<ConfigKey, Value>,
    updates: &HashMap<ConfigKey, Value>,
) -> HashMap<ConfigKey, Value> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

fn string_value(config: &HashMap<ConfigKey, Value>, key: ConfigKey) -> Result<Option<String>> {
    match config.get(&key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(other) => Err(anyhow::anyhow!(
            "Config key `{}` must be a string, got {}",
            key.as_str(),
            other
        )),
    }
}

fn required(config: &HashMap<ConfigKey, Value>, key: ConfigKey) -> Result<String> {
    string_value(config, key)?
        .ok_or_else(|| anyhow::anyhow!("Missing required config key `{}`", key.as_str()))
}

/// Validates a merged configuration map into a [`RunConfig`].
pub fn resolve_config(config: &HashMap<ConfigKey, Value>) -> Result<RunConfig> {
    let org = required(config, ConfigKey::Org)?;
    let username = required(config, ConfigKey::Username)?;
    let year_month: YearMonth = required(config, ConfigKey::YearMonth)?.parse()?;
    let end_year_month = string_value(config, ConfigKey::EndYearMonth)?
        .map(|s| s.parse::<YearMonth>())
        .transpose()?;

    if let Some(end) = end_year_month {
        if end <= year_month {
            return Err(anyhow::anyhow!(
                "`endYearMonth` ({end}) must be after `yearMonth` ({year_month})"
            ));
        }
    }

    let api_url = string_value(config, ConfigKey::ApiUrl)?
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    Ok(RunConfig {
        org,
        username,
        year_month,
        end_year_month,
        api_url,
    })
}
