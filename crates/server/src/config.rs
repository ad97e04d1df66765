use shared_types::{AppConfig, FeatureFlags};
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Path to the config file, relative to the working directory. Overridden by
/// `CONFIG_PATH`.
const CONFIG_PATH: &str = "config.toml";

/// Which repository backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    #[default]
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "in_memory" | "inmemory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidStorageMode(value.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid storage mode `{0}` (expected `postgres` or `memory`)")]
    InvalidStorageMode(String),

    #[error("invalid value for {name}: `{value}`")]
    InvalidValue { name: &'static str, value: String },

    #[error("DATABASE_URL must be set when storage mode is postgres")]
    MissingDatabaseUrl,

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
}

/// Fully resolved runtime settings: config file values with environment
/// overrides applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub storage_mode: StorageMode,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub features: FeatureFlags,
}

impl Settings {
    /// Resolve settings from a parsed config file and an environment lookup.
    ///
    /// Environment wins over the file for `HOST`, `PORT`, `STORAGE_MODE` and
    /// `DATABASE_MAX_CONNECTIONS`.
    pub fn resolve<F>(config: AppConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = env("HOST").unwrap_or(config.server.host);

        let port = match env("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value: raw })?,
            None => config.server.port,
        };

        let storage_mode = env("STORAGE_MODE")
            .unwrap_or(config.storage.mode)
            .parse::<StorageMode>()?;

        let max_connections = match env("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "DATABASE_MAX_CONNECTIONS",
                value: raw,
            })?,
            None => config.storage.max_connections,
        };

        let database_url = env("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if storage_mode == StorageMode::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(Self {
            host,
            port,
            storage_mode,
            database_url,
            max_connections,
            features: config.features,
        })
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read the config file. A missing file yields defaults; an unreadable or
/// malformed one is an error.
pub fn read_config_file(path: &str) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path, "config file not found, using defaults");
            Ok(AppConfig::default())
        }
        Err(e) => Err(ConfigError::Read {
            path: path.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Load `.env`, the config file and environment overrides, and store the
/// result in the global `OnceLock`. Only the first successful call has effect.
pub fn load_settings() -> Result<&'static Settings, ConfigError> {
    if let Some(settings) = SETTINGS.get() {
        return Ok(settings);
    }

    // Load .env file if present (ignored in production where env vars are set directly).
    let _ = dotenvy::dotenv();

    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| CONFIG_PATH.to_string());
    let config = read_config_file(&path)?;
    let settings = Settings::resolve(config, |key| std::env::var(key).ok())?;

    tracing::info!(
        storage = ?settings.storage_mode,
        addr = %settings.bind_addr(),
        features = ?settings.features,
        "configuration loaded"
    );

    Ok(SETTINGS.get_or_init(|| settings))
}
