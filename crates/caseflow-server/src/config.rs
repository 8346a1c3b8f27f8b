use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Full database connection URL, e.g.
    /// `sqlite://./data/caseflow.db?mode=rwc`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// CORS allowed origins; empty allows all origins (development mode).
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub priority: PriorityConfig,
}

/// User-ordered lists driving the to-do view's decay weighting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityConfig {
    /// Alert types, most important first. Types not listed get the
    /// minimum alert-type weight.
    #[serde(default)]
    pub alert_type_order: Vec<String>,
    /// Opt-in case statuses, most important first. Statuses not listed
    /// contribute no case weight.
    #[serde(default)]
    pub case_status_order: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            data_dir: default_data_dir(),
            database_url: default_database_url(),
            cors_allowed_origins: Vec::new(),
            priority: PriorityConfig::default(),
        }
    }
}

fn default_http_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_database_url() -> String {
    "sqlite://./data/caseflow.db?mode=rwc".to_string()
}

/// Load configuration from a TOML file, or defaults when no path is given.
pub fn load(path: Option<&str>) -> Result<ServerConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {path}"))?;
            toml::from_str(&raw).with_context(|| format!("failed to parse config file {path}"))
        }
        None => Ok(ServerConfig::default()),
    }
}
