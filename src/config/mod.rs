use std::str::FromStr;

use config::{Config, ConfigError};
use log::LevelFilter;
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct DbConfig {
    pub location: String,
}

/// config properties for the application log
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct LogConfig {
    /// one of `off`, `error`, `warn`, `info`, `debug`, `trace`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// if present, logs are written to this file as well as stdout
    pub file: Option<String>,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct IndexAllConfig {
    #[serde(default = "default_db_config")]
    pub database: DbConfig,
    #[serde(default = "default_log_config")]
    pub logging: LogConfig,
}

impl LogConfig {
    /// the configured level, or `info` if the configured value isn't a valid level
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.level).unwrap_or(LevelFilter::Info)
    }
}

/// Parses the config file located at ./IndexAll.toml, if it exists.
/// Sections and keys left out of the file fall back to their defaults.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> IndexAllConfig {
    parse_config_from("./IndexAll.toml")
}

fn parse_config_from(path: &str) -> IndexAllConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name(path))
        .build();
    let settings = match builder {
        Ok(settings) => settings,
        // a missing file is fine, we just use the defaults
        Err(ConfigError::Foreign(e)) if e.to_string().contains("not found") => {
            log::warn!("No config file found. Continuing startup...");
            return INDEX_ALL_CONFIG_DEFAULT.clone();
        }
        // basically everything else is unrecoverable, though
        Err(e) => {
            log::error!("Failed to parse config file. Exception is {e}");
            panic!("Failed to parse config file. Exception is {e}");
        }
    };
    match settings.try_deserialize() {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("Config file has invalid values. Exception is {e}");
            panic!("Config file has invalid values. Exception is {e}");
        }
    }
}

fn default_db_config() -> DbConfig {
    INDEX_ALL_CONFIG_DEFAULT.database.clone()
}

fn default_log_config() -> LogConfig {
    INDEX_ALL_CONFIG_DEFAULT.logging.clone()
}

fn default_log_level() -> String {
    INDEX_ALL_CONFIG_DEFAULT.logging.level.clone()
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static INDEX_ALL_CONFIG: Lazy<IndexAllConfig> = Lazy::new(parse_config);
static INDEX_ALL_CONFIG_DEFAULT: Lazy<IndexAllConfig> = Lazy::new(|| IndexAllConfig {
    database: DbConfig {
        location: "./index_all.sqlite".to_string(),
    },
    logging: LogConfig {
        level: "info".to_string(),
        file: None,
    },
});
