//! Locates and creates the status directory

use std::fs;

use status_fs::{CONFIG_FILE_NAME, ConfigStore, NormalizedPath, ValueMode};

use crate::{Error, Result};

/// Configuration key naming the status directory.
pub const STATUS_DIR_KEY: &str = "status-dir";

/// Resolves `status-dir` from the configuration file and creates it.
///
/// Relative values are resolved against the user's home directory rather
/// than the working directory, so status files land in the same place no
/// matter where a service was launched from.
#[derive(Debug, Clone)]
pub struct StatusDirectoryResolver {
    config_path: NormalizedPath,
    home_dir: Option<NormalizedPath>,
    value_mode: ValueMode,
    check_version: bool,
}

impl StatusDirectoryResolver {
    /// Resolver reading the given configuration file.
    pub fn new(config_path: NormalizedPath) -> Self {
        Self {
            config_path,
            home_dir: None,
            value_mode: ValueMode::Strings,
            check_version: false,
        }
    }

    /// Resolver reading `.env.json` under the project root.
    pub fn for_project_root(root: &NormalizedPath) -> Self {
        Self::new(root.join(CONFIG_FILE_NAME))
    }

    /// Resolve relative paths against `home` instead of the user's home.
    pub fn with_home_dir(mut self, home: NormalizedPath) -> Self {
        self.home_dir = Some(home);
        self
    }

    /// How configuration values are stored when loaded.
    pub fn value_mode(mut self, mode: ValueMode) -> Self {
        self.value_mode = mode;
        self
    }

    /// Require the configuration's `version` to match the schema version.
    pub fn check_version(mut self, enabled: bool) -> Self {
        self.check_version = enabled;
        self
    }

    pub fn config_path(&self) -> &NormalizedPath {
        &self.config_path
    }

    /// Load configuration, validate it and create the status directory.
    ///
    /// # Errors
    ///
    /// Every error is fatal for the invocation: malformed configuration,
    /// a missing `status-dir` key, a version mismatch when checking is
    /// enabled, an unknown home directory, or a directory that cannot be
    /// created.
    pub fn resolve(&self) -> Result<NormalizedPath> {
        let config = ConfigStore::load_with_mode(&self.config_path, self.value_mode)?;

        if self.check_version {
            config.check_version()?;
        }
        config.require_keys(&[STATUS_DIR_KEY])?;

        let home = self.home_dir()?;
        let status_dir = config.resolve_path(STATUS_DIR_KEY, Some(&home))?;

        let native = status_dir.to_native();
        fs::create_dir_all(&native).map_err(|e| status_fs::Error::io(&native, e))?;

        tracing::debug!(status_dir = %status_dir, "status directory ready");
        Ok(status_dir)
    }

    fn home_dir(&self) -> Result<NormalizedPath> {
        if let Some(home) = &self.home_dir {
            return Ok(home.clone());
        }
        dirs::home_dir()
            .map(NormalizedPath::new)
            .ok_or(Error::HomeDirUnavailable {
                key: STATUS_DIR_KEY,
            })
    }
}
