/// `load_config` module: loads the optional YAML settings file and resolves the Notion credential.
///
/// Settings (API endpoint, Notion version, where the credential store lives) come from YAML.
/// Secrets never do: the token and database id come from the environment
/// (`NOTION_TOKEN`, `NOTION_DATABASE_ID`, `.env` supported) or from the persisted store
/// written by `notion-clipper config set`.
///
/// # Errors
/// All errors use `anyhow::Error` for context-rich diagnostics and surface at the CLI boundary.
use anyhow::Result;
use notion_clipper_core::contract::{ConfigStore, NotionConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::publish::{DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION};

pub const TOKEN_ENV: &str = "NOTION_TOKEN";
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        ApiSection {
            base_url: default_base_url(),
            notion_version: default_notion_version(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            api: ApiSection::default(),
            store_path: default_store_path(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_notion_version() -> String {
    DEFAULT_NOTION_VERSION.to_string()
}

/// `$HOME/.notion-clipper/store.json`, or `.notion-clipper/store.json` in the working
/// directory when no home directory is set.
pub fn default_store_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".notion-clipper")
        .join("store.json")
}

/// Loads a static YAML settings file (no secrets). A `None` path yields the defaults.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<CliConfig> {
    let Some(path) = path else {
        info!("No settings file given, using defaults");
        return Ok(CliConfig::default());
    };
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file is valid and means "all defaults".
    if config_content.trim().is_empty() {
        return Ok(CliConfig::default());
    }

    match serde_yaml::from_str::<CliConfig>(&config_content) {
        Ok(conf) => {
            info!(
                config_path = ?path_ref,
                base_url = %conf.api.base_url,
                store_path = %conf.store_path.display(),
                "Parsed config YAML successfully"
            );
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Credential from the environment when both variables are set, else from `store`.
pub fn resolve_credentials(store: &dyn ConfigStore) -> Result<Option<NotionConfig>> {
    let token = std::env::var(TOKEN_ENV).ok().filter(|v| !v.trim().is_empty());
    let database_id = std::env::var(DATABASE_ID_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty());

    if let (Some(token), Some(database_id)) = (token, database_id) {
        let config = NotionConfig { token, database_id };
        config.trace_loaded("env");
        return Ok(Some(config));
    }

    store.get().map_err(|e| {
        error!(error = ?e, "Failed to read stored Notion config");
        anyhow::Error::new(e)
    })
}
