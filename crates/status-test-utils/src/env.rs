//! [`TestEnv`]: temporary project root plus temporary home directory.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project root holding `.env.json` and a separate home directory that
/// relative `status-dir` values resolve against.
///
/// # Example
///
/// ```rust,no_run
/// use status_test_utils::TestEnv;
///
/// let env = TestEnv::new();
/// env.write_config(r#"{"status-dir": "statuses"}"#);
/// assert!(env.config_path().exists());
/// ```
pub struct TestEnv {
    project: TempDir,
    home: TempDir,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    /// Create an environment whose config points at `status_dir`
    /// (relative to the home directory).
    pub fn with_status_dir(status_dir: &str) -> Self {
        let env = Self::new();
        env.write_config(&serde_json::json!({ "status-dir": status_dir }).to_string());
        env
    }

    /// Canonical project root, so comparisons survive symlinked temp dirs.
    pub fn root(&self) -> PathBuf {
        dunce::canonicalize(self.project.path()).unwrap()
    }

    /// Canonical home directory.
    pub fn home(&self) -> PathBuf {
        dunce::canonicalize(self.home.path()).unwrap()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join(".env.json")
    }

    /// Write raw `.env.json` content.
    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).unwrap();
    }

    /// `<home>/<relative>`
    pub fn home_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.home().join(relative)
    }

    /// Read and parse a JSON file.
    pub fn read_json(&self, path: impl AsRef<Path>) -> serde_json::Value {
        let content = fs::read_to_string(path.as_ref()).unwrap_or_else(|e| {
            panic!("TestEnv::read_json: cannot read {}: {e}", path.as_ref().display())
        });
        serde_json::from_str(&content).unwrap()
    }

    /// Service names listed in `<status_dir>/services.json`.
    pub fn manifest_services(&self, status_dir: impl AsRef<Path>) -> Vec<String> {
        let value = self.read_json(status_dir.as_ref().join("services.json"));
        serde_json::from_value(value).unwrap()
    }
}
