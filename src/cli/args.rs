use crate::config::{ConfigKey, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILENAME};
use clap::Parser;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// Count the characters a user wrote in issues and comments of an organization
///
/// Issues are searched with `org:<ORG> involves:<USER> updated:><SINCE>-01`,
/// plus `created:<<UNTIL>-01` when --until is given. The token is read from
/// GITHUB_ACCESS_TOKEN.
///
/// Flags override values from the config file (keys `org`, `username`,
/// `yearMonth`, `endYearMonth`, `apiUrl`).
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about)]
pub struct Args {
    /// Organization to search in
    #[arg(long, value_name = "ORG")]
    pub org: Option<String>,

    /// User whose writing is counted
    #[arg(short, long, value_name = "USER")]
    pub username: Option<String>,

    /// First month of the window (issues updated after its first day)
    #[arg(long, value_name = "YYYY-MM")]
    pub since: Option<String>,

    /// Month whose first day bounds issue creation (exclusive)
    #[arg(long, value_name = "YYYY-MM")]
    pub until: Option<String>,

    /// Path to the JSON config file [default: .issue-chars/config.json]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// GitHub API base URL, for GitHub Enterprise
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Config file to read and whether it was given explicitly.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (
                PathBuf::from(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME),
                false,
            ),
        }
    }

    /// Values given on the command line, keyed like the config file.
    pub fn overrides(&self) -> HashMap<ConfigKey, Value> {
        [
            (ConfigKey::Org, &self.org),
            (ConfigKey::Username, &self.username),
            (ConfigKey::YearMonth, &self.since),
            (ConfigKey::EndYearMonth, &self.until),
            (ConfigKey::ApiUrl, &self.api_url),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, Value::String(v.clone()))))
        .collect()
    }
}
