//! Registry of every service that has ever reported
//!
//! `services.json` is shared by many short-lived processes with no lock
//! between them. Updates are read-modify-write followed by an atomic
//! rename, so readers always see a complete JSON array. Two processes that
//! read the same prior state can still lose one of their additions; that
//! race is accepted and left unserialized.

use std::collections::BTreeSet;

use status_fs::{NormalizedPath, WriteOptions, io};

use crate::{Error, Outcome, Result, ServiceName};

/// File name of the manifest inside the status directory.
pub const MANIFEST_FILE_NAME: &str = "services.json";

/// `rw-r--r--`: other services may read the manifest but not rewrite it.
pub const MANIFEST_MODE: u32 = 0o644;

/// How the on-disk manifest looked when it was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestState {
    /// No manifest file yet.
    Missing,
    /// A well-formed manifest was read.
    Loaded,
    /// The file was unreadable or not a JSON array of strings; treated as empty.
    Recovered,
}

/// Deduplicated, sorted set of service names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    services: BTreeSet<String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the manifest at `path`.
    ///
    /// Never fails: a corrupt or unreadable manifest becomes an empty set so
    /// later registrations can still be written.
    pub fn load(path: &NormalizedPath) -> (Self, ManifestState) {
        let content = match io::read_text_if_exists(path) {
            Ok(Some(content)) => content,
            Ok(None) => return (Self::new(), ManifestState::Missing),
            Err(e) => {
                tracing::debug!("ignoring unreadable manifest: {e}");
                return (Self::new(), ManifestState::Recovered);
            }
        };

        match Self::parse(&content) {
            Ok(manifest) => (manifest, ManifestState::Loaded),
            Err(e) => {
                tracing::debug!(path = %path, "ignoring corrupt manifest: {e}");
                (Self::new(), ManifestState::Recovered)
            }
        }
    }

    /// Parse a JSON array of strings.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let services: Vec<String> = serde_json::from_str(content)?;
        Ok(Self {
            services: services.into_iter().collect(),
        })
    }

    pub fn contains(&self, service: &str) -> bool {
        self.services.contains(service)
    }

    /// Add a service. Returns `false` when it was already present.
    pub fn insert(&mut self, service: &str) -> bool {
        if self.services.contains(service) {
            return false;
        }
        self.services.insert(service.to_string())
    }

    /// Service names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Render as a sorted, 2-space indented JSON array.
    pub fn to_pretty_json(&self) -> Result<String> {
        let sorted: Vec<&str> = self.iter().collect();
        serde_json::to_string_pretty(&sorted).map_err(|source| Error::Serialize {
            what: "services manifest",
            source,
        })
    }
}

/// Registers services in `<status_dir>/services.json`.
#[derive(Debug, Clone)]
pub struct ManifestUpdater {
    status_dir: NormalizedPath,
}

impl ManifestUpdater {
    pub fn new(status_dir: NormalizedPath) -> Self {
        Self { status_dir }
    }

    pub fn manifest_path(&self) -> NormalizedPath {
        self.status_dir.join(MANIFEST_FILE_NAME)
    }

    /// Ensure `service` is listed in the manifest.
    ///
    /// A service that is already listed leaves the file untouched. Otherwise
    /// the new set is written to a temp sibling, renamed over the manifest
    /// and made world-readable. Failures are logged and returned as
    /// [`Outcome::Degraded`].
    pub fn register(&self, service: &ServiceName) -> Outcome {
        let path = self.manifest_path();
        let (mut manifest, state) = Manifest::load(&path);

        if !manifest.insert(service.as_str()) {
            tracing::debug!(service = %service, "service already registered");
            return Outcome::Unchanged;
        }

        match Self::write(&path, &manifest) {
            Ok(()) => {
                tracing::debug!(
                    service = %service,
                    services = manifest.len(),
                    previous = ?state,
                    "registered service"
                );
                Outcome::Written(path)
            }
            Err(e) => {
                tracing::warn!("Error updating services manifest: {e}");
                Outcome::Degraded(e)
            }
        }
    }

    fn write(path: &NormalizedPath, manifest: &Manifest) -> Result<()> {
        let rendered = manifest.to_pretty_json()?;
        io::write_atomic(path, rendered.as_bytes(), WriteOptions::with_mode(MANIFEST_MODE))?;
        Ok(())
    }
}
