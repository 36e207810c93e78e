use std::{
    fs,
    path::PathBuf,
    sync::{LazyLock, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{ConfigError, Result},
    paths::{resolve_path, xdg_config_home, xdg_data_home},
};

pub const DEFAULT_STATIONS_FILE: &str = "clean_stations.csv";
pub const DEFAULT_MEASUREMENTS_FILE: &str = "clean_measure.csv";
pub const DEFAULT_SAMPLE_LIMIT: u32 = 5;

/// Application's configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Path to the SQLite database file.
    /// Default: $XDG_DATA_HOME/rowkit/database.db
    pub db_path: Option<String>,

    /// CSV file with weather stations.
    /// Default: clean_stations.csv
    pub stations_file: Option<String>,

    /// CSV file with weather measurements.
    /// Default: clean_measure.csv
    pub measurements_file: Option<String>,

    /// Number of stations shown by `weather sample`.
    /// Default: 5
    pub sample_limit: Option<u32>,

    /// Enforce foreign keys (e.g. tasks.project_id) on every connection.
    /// Default: false
    pub foreign_keys: Option<bool>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> =
    LazyLock::new(|| RwLock::new(default_config_path()));

/// `$ROWKIT_CONFIG`, or `$XDG_CONFIG_HOME/rowkit/config.toml`.
pub fn default_config_path() -> PathBuf {
    match std::env::var("ROWKIT_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("rowkit").join("config.toml"),
    }
}

/// Path of the configuration file currently in use.
pub fn config_path() -> PathBuf {
    CONFIG_PATH
        .read()
        .map(|path| path.to_path_buf())
        .unwrap_or_else(|poisoned| poisoned.into_inner().to_path_buf())
}

/// Points the global configuration at a different file.
pub fn set_config_path(path: PathBuf) {
    let mut guard = CONFIG_PATH
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = path;
}

/// Loads the configuration file into the global slot.
pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *global_config = Some(config);
    Ok(())
}

/// Returns the loaded configuration, or the defaults if [`init`] was not called.
pub fn get_config() -> Config {
    let guard = CONFIG
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone().unwrap_or_default()
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn default_config() -> Self {
        let db_path = xdg_data_home().join("rowkit").join("database.db");

        Self {
            db_path: Some(db_path.to_string_lossy().into_owned()),
            stations_file: Some(DEFAULT_STATIONS_FILE.to_string()),
            measurements_file: Some(DEFAULT_MEASUREMENTS_FILE.to_string()),
            sample_limit: Some(DEFAULT_SAMPLE_LIMIT),
            foreign_keys: Some(false),
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        let config_path = config_path();

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default_config(),
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    /// Fills unset fields with defaults and validates the rest.
    pub fn resolve(&mut self) -> Result<()> {
        let defaults = Self::default_config();

        if self.db_path.is_none() {
            self.db_path = defaults.db_path;
        }
        if self.stations_file.is_none() {
            self.stations_file = defaults.stations_file;
        }
        if self.measurements_file.is_none() {
            self.measurements_file = defaults.measurements_file;
        }
        self.foreign_keys.get_or_insert(false);

        match self.sample_limit {
            Some(0) => return Err(ConfigError::InvalidSampleLimit(0)),
            Some(_) => {}
            None => self.sample_limit = Some(DEFAULT_SAMPLE_LIMIT),
        }

        Ok(())
    }

    /// Database file, honoring the `ROWKIT_DB` override.
    pub fn get_db_path(&self) -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var("ROWKIT_DB") {
            return resolve_path(&env_path);
        }
        match &self.db_path {
            Some(db_path) => resolve_path(db_path),
            None => Ok(xdg_data_home().join("rowkit").join("database.db")),
        }
    }

    pub fn get_stations_file(&self) -> Result<PathBuf> {
        resolve_path(
            self.stations_file
                .as_deref()
                .unwrap_or(DEFAULT_STATIONS_FILE),
        )
    }

    pub fn get_measurements_file(&self) -> Result<PathBuf> {
        resolve_path(
            self.measurements_file
                .as_deref()
                .unwrap_or(DEFAULT_MEASUREMENTS_FILE),
        )
    }

    pub fn sample_limit(&self) -> u32 {
        self.sample_limit.unwrap_or(DEFAULT_SAMPLE_LIMIT)
    }

    pub fn foreign_keys(&self) -> bool {
        self.foreign_keys.unwrap_or(false)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = config_path();
        let serialized = toml::to_string_pretty(self)?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, serialized)?;
        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

pub fn generate_default_config() -> Result<()> {
    let config_path = config_path();

    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let content = format!(
        "# rowkit configuration\n\n{}",
        toml::to_string_pretty(&Config::default_config())?
    );

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_path, content)?;
    info!(
        "Default configuration file generated at: {}",
        config_path.display()
    );
    Ok(())
}
