//! Flat JSON configuration store
//!
//! The configuration file is a single JSON object mapping string keys to
//! scalar values. It is loaded once at startup and read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::{Error, NormalizedPath, Result, io};

/// File name of the configuration document under the project root.
pub const CONFIG_FILE_NAME: &str = ".env.json";

/// Bump whenever a breaking change to the configuration keys is introduced.
pub const SCHEMA_VERSION: i64 = 1;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
}

impl ConfigValue {
    /// Borrow the value when it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Integer(_) => None,
        }
    }

    /// Integer view of the value. Strings holding a decimal integer qualify.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::String(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

/// How JSON values are stored when a document is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueMode {
    /// Every value is collapsed to a string.
    #[default]
    Strings,
    /// Strings and integers stay distinct; anything else becomes a string.
    Typed,
}

impl ValueMode {
    fn coerce(self, value: ConfigValue) -> ConfigValue {
        match (self, value) {
            (Self::Strings, ConfigValue::Integer(n)) => ConfigValue::String(n.to_string()),
            (_, value) => value,
        }
    }

    fn convert(self, value: Value) -> ConfigValue {
        match value {
            Value::String(s) => ConfigValue::String(s),
            Value::Number(ref n) if self == Self::Typed && n.is_i64() => {
                ConfigValue::Integer(n.as_i64().unwrap_or_default())
            }
            other => ConfigValue::String(other.to_string()),
        }
    }
}

/// String-keyed configuration store.
///
/// Keys are unique and the last write for a key wins.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    values: BTreeMap<String, ConfigValue>,
    mode: ValueMode,
}

impl ConfigStore {
    /// Create an empty store that collapses values to strings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given value mode.
    pub fn with_mode(mode: ValueMode) -> Self {
        Self {
            values: BTreeMap::new(),
            mode,
        }
    }

    /// Load configuration from a JSON file, collapsing values to strings.
    ///
    /// A missing file is not an error: a notice is logged and an empty store
    /// is returned.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Self::load_with_mode(path, ValueMode::Strings)
    }

    /// Load configuration from a JSON file with the given value mode.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigParse`] when the file is not valid JSON
    /// - [`Error::ConfigFormat`] when the root is not an object
    /// - [`Error::Io`] when the file exists but cannot be read
    pub fn load_with_mode(path: &NormalizedPath, mode: ValueMode) -> Result<Self> {
        let mut store = Self::with_mode(mode);

        let Some(content) = io::read_text_if_exists(path)? else {
            tracing::warn!(
                "Note: {} not found. Using defaults.",
                path.file_name().unwrap_or(path.as_str())
            );
            return Ok(store);
        };

        let document: Value = serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            message: e.to_string(),
        })?;

        let Value::Object(entries) = document else {
            return Err(Error::ConfigFormat {
                path: path.to_native(),
                found: json_kind(&document),
            });
        };

        for (key, value) in entries {
            let value = mode.convert(value);
            store.values.insert(key, value);
        }

        tracing::debug!(path = %path, keys = store.values.len(), "loaded configuration");
        Ok(store)
    }

    /// The value mode this store was constructed with.
    pub fn mode(&self) -> ValueMode {
        self.mode
    }

    /// Set a configuration value, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        let value = self.mode.coerce(value.into());
        self.values.insert(key.into(), value);
    }

    /// Get a configuration value.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Get a configuration value, falling back to `default` when absent.
    pub fn get_or(&self, key: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Ensure every key in `keys` is present.
    ///
    /// The error names all missing keys, not just the first.
    pub fn require_keys(&self, keys: &[&str]) -> Result<()> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|key| !self.values.contains_key(**key))
            .map(|key| key.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation { missing })
        }
    }

    /// Interpret the value of `key` as a filesystem path.
    ///
    /// Absolute values are resolved as-is. Relative values are joined onto
    /// `base`, or the current working directory when no base is given,
    /// before resolving. Nothing on disk is created or modified.
    pub fn resolve_path(&self, key: &str, base: Option<&NormalizedPath>) -> Result<NormalizedPath> {
        let value = self.values.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })?;
        let path = NormalizedPath::new(value.to_string());

        if path.is_absolute() {
            return Ok(path.resolve());
        }

        let base = match base {
            Some(base) => base.clone(),
            None => {
                let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
                NormalizedPath::new(cwd)
            }
        };

        Ok(base.join(path.as_str()).resolve())
    }

    /// Compare the `version` key (0 when absent) against [`SCHEMA_VERSION`].
    pub fn check_version(&self) -> Result<()> {
        let found = self.get_or("version", 0_i64);
        if found.as_i64() == Some(SCHEMA_VERSION) {
            Ok(())
        } else {
            Err(Error::VersionMismatch {
                expected: SCHEMA_VERSION,
                found: found.to_string(),
            })
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
