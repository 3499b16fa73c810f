//! Server configuration: built-in defaults overlaid by `CINEMA_*` environment
//! variables.

use cinema_core::default_log_level;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "CINEMA";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATABASE_PATH: &str = "cinema.sqlite3";

/// `database_path` value selecting a throwaway in-memory store.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// `CINEMA_BIND_ADDR`
    pub bind_addr: String,
    /// `CINEMA_DATABASE_PATH`
    pub database_path: String,
    /// `CINEMA_LOG_LEVEL`
    pub log_level: String,
    /// `CINEMA_LOG_DIR`; stderr when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Loads defaults and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("log_level", default_log_level())?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    pub fn uses_in_memory_database(&self) -> bool {
        self.database_path == IN_MEMORY_DATABASE
    }
}
