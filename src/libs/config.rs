//! Configuration for the taskboard core.
//!
//! The only tunable the core consumes is the default page size applied when
//! a listing request carries no explicit `limit`. Configuration is read
//! from a JSON file in the platform data directory when present, with an
//! environment variable override (`TASKBOARD_LIMIT`), and falls back to a
//! built-in default otherwise. Missing configuration is never an error.

use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::fs::File;

pub const CONFIG_FILE_NAME: &str = "taskboard.json";

/// Default page size when neither file nor environment provide one.
pub const DEFAULT_LIMIT: u32 = 10;

const LIMIT_ENV_VAR: &str = "TASKBOARD_LIMIT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page size applied when a listing request has no `limit`.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Config { default_limit: DEFAULT_LIMIT }
    }
}

impl Config {
    /// Load configuration: file if present, then environment override.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let mut config = if config_file_path.exists() {
            let config_str = fs::read_to_string(config_file_path)?;
            serde_json::from_str(&config_str)?
        } else {
            Config::default()
        };

        if let Ok(limit) = env::var(LIMIT_ENV_VAR) {
            if let Ok(limit) = limit.parse::<u32>() {
                config.default_limit = limit;
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }
}
