use common::identity::QR_MODULE_SIZE;
use common::import::ImportConfig;
use common::model::chemical::CHEMICAL_REQUIRED_FIELDS;
use common::model::identity::ItemType;
use common::model::waste::WASTE_REQUIRED_FIELDS;
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "dashboard.toml";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8080
open_browser = true

[labels]
module_size = 8

[imports]
preview_rows = 10
preview_errors = 5
max_upload_bytes = 10485760
chemicals = ["name", "category", "quantity"]
waste = ["name", "category", "quantity"]
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub imports: ImportsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            open_browser: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    pub module_size: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            module_size: QR_MODULE_SIZE,
        }
    }
}

/// Largest CSV upload the preview endpoint buffers (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Required columns per entity and preview limits for CSV imports.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ImportsConfig {
    pub preview_rows: usize,
    pub preview_errors: usize,
    pub max_upload_bytes: usize,
    pub chemicals: Vec<String>,
    pub waste: Vec<String>,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        let limits = ImportConfig::default();
        Self {
            preview_rows: limits.preview_rows,
            preview_errors: limits.preview_errors,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            chemicals: CHEMICAL_REQUIRED_FIELDS.map(String::from).to_vec(),
            waste: WASTE_REQUIRED_FIELDS.map(String::from).to_vec(),
        }
    }
}

impl ImportsConfig {
    pub fn required_fields(&self, item_type: ItemType) -> &[String] {
        match item_type {
            ItemType::Chemical => &self.chemicals,
            ItemType::Waste => &self.waste,
        }
    }

    pub fn limits(&self) -> ImportConfig {
        ImportConfig {
            preview_rows: self.preview_rows,
            preview_errors: self.preview_errors,
        }
    }
}

impl Config {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }

    /// Applies `DASHBOARD_HOST` and `DASHBOARD_PORT` when set.
    fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = std::env::var("DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("DASHBOARD_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::Env {
                name: "DASHBOARD_PORT",
                value: port,
            })?;
        }
        Ok(self)
    }
}

/// Load configuration from dashboard.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. The working directory
/// 3. Falls back to embedded default config
pub fn load_config() -> Result<Config, ConfigError> {
    let config = match find_config_file() {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            read_config(&path)?
        }
        None => {
            info!("Using default embedded configuration");
            toml::from_str(DEFAULT_CONFIG)?
        }
    };
    config.apply_env()
}

fn find_config_file() -> Option<PathBuf> {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)));
    let candidates = beside_exe.into_iter().chain(Some(PathBuf::from(CONFIG_FILE)));
    for candidate in candidates {
        if candidate.exists() {
            return Some(candidate);
        }
        warn!("{} not found at: {}", CONFIG_FILE, candidate.display());
    }
    None
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.labels.module_size, QR_MODULE_SIZE);
        assert_eq!(
            config.imports.required_fields(ItemType::Chemical),
            ["name", "category", "quantity"]
        );
        assert_eq!(config.imports.limits(), ImportConfig::default());
        assert_eq!(config.imports.max_upload_bytes, MAX_UPLOAD_BYTES);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.imports, ImportsConfig::default());
        assert_eq!(config.url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn required_fields_are_per_entity() {
        let config: Config =
            toml::from_str("[imports]\nwaste = [\"name\", \"status\"]\n").unwrap();
        assert_eq!(config.imports.required_fields(ItemType::Waste), ["name", "status"]);
        assert_eq!(config.imports.required_fields(ItemType::Chemical).len(), 3);
    }
}
