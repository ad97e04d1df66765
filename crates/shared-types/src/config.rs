use serde::{Deserialize, Serialize};

/// Feature flags controlling optional behaviour.
///
/// Every field defaults to `false` so that a missing or incomplete config
/// file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Export HTTP spans over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Seed sample to-dos on startup when the store is empty. Dev only.
    #[serde(default)]
    pub seed_demo_data: bool,
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Storage settings. The database URL is never read from the file; it comes
/// from `DATABASE_URL`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    /// `postgres` or `memory`.
    #[serde(default = "default_storage_mode")]
    pub mode: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            mode: default_storage_mode(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_storage_mode() -> String {
    "postgres".to_string()
}

fn default_max_connections() -> u32 {
    10
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub features: FeatureFlags,
}
