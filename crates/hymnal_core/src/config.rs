//! Explicit wiring configuration for the hymnal store.
//!
//! # Responsibility
//! - Collect the paths and log settings a host needs to open the store.
//! - Open the database and seed bundled books into a fresh store.
//!
//! # Invariants
//! - Seeding runs only when the schema was just created or recreated.
//! - A failed seed leaves the store unversioned, so the next open seeds again.
//! - Configuration is plain data; nothing is read from the environment.

use crate::db::{HymnalDatabase, DB_NAME};
use crate::logging::{default_log_level, init_logging};
use crate::repo::hymns_dao::RepoResult;
use crate::service::seed_service::seed_bundled_books;
use log::{error, warn};
use std::path::PathBuf;

const LOG_DIR_NAME: &str = "logs";

/// Host-supplied settings for one hymnal store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HymnalConfig {
    /// Directory holding the store file.
    pub data_dir: PathBuf,
    /// Store file name inside `data_dir`.
    pub db_name: String,
    /// Directory with bundled `sdah*.json` assets used for first-run seeding.
    pub assets_dir: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl HymnalConfig {
    /// Builds a configuration with defaults rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let log_dir = data_dir.join(LOG_DIR_NAME);
        Self {
            data_dir,
            db_name: DB_NAME.to_string(),
            assets_dir: None,
            log_level: default_log_level().to_string(),
            log_dir,
        }
    }

    pub fn with_assets_dir(mut self, assets_dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(assets_dir.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Full path of the store file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_name)
    }

    /// Starts file logging with this configuration.
    pub fn init_logging(&self) -> Result<(), String> {
        let log_dir = self
            .log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", self.log_dir.display()))?;
        init_logging(&self.log_level, log_dir)
    }

    /// Opens the store and seeds bundled books if it is fresh.
    pub fn open_database(&self) -> RepoResult<HymnalDatabase> {
        let database = HymnalDatabase::open(&self.data_dir, &self.db_name)?;
        if database.schema_state().is_fresh() {
            if let Some(assets_dir) = self.assets_dir.as_deref() {
                if let Err(err) = seed_bundled_books(&database.hymns_dao(), assets_dir) {
                    warn!("event=seed_catalog module=config status=error action=reset_schema_version");
                    if let Err(reset_err) = database.reset_schema_version() {
                        error!(
                            "event=schema_reset module=config status=error error={}",
                            reset_err
                        );
                    }
                    return Err(err);
                }
            }
        }
        Ok(database)
    }
}

#[cfg(test)]
mod tests {
    use super::HymnalConfig;
    use std::path::PathBuf;

    #[test]
    fn defaults_are_rooted_at_data_dir() {
        let config = HymnalConfig::new("/var/lib/hymnal");

        assert_eq!(config.db_path(), PathBuf::from("/var/lib/hymnal/hymnal-db"));
        assert_eq!(config.log_dir, PathBuf::from("/var/lib/hymnal/logs"));
        assert!(config.assets_dir.is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let config = HymnalConfig::new("/data")
            .with_assets_dir("/assets")
            .with_log_level("warn");

        assert_eq!(config.assets_dir, Some(PathBuf::from("/assets")));
        assert_eq!(config.log_level, "warn");
    }
}
