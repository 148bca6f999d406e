//! Normalized path handling for cross-platform compatibility

use std::path::{Component, Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Configuration values and status directory locations flow through this
/// type so that joins and comparisons behave the same on every platform.
/// Conversion to a platform-native path only happens at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the base, matching `Path::join`.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if Path::new(&segment_normalized).is_absolute() || segment_normalized.starts_with('/') {
            return Self {
                inner: segment_normalized,
            };
        }
        if segment_normalized.is_empty() {
            return self.clone();
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Whether the path is absolute on this platform.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || self.to_native().is_absolute()
    }

    /// Lexically clean the path: drop `.` and empty segments and fold `..`
    /// into its parent. Never touches the filesystem.
    pub fn clean(&self) -> Self {
        let absolute = self.inner.starts_with('/');
        let mut parts: Vec<&str> = Vec::new();

        for segment in self.inner.split('/') {
            match segment {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if is_drive(last) => {}
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    _ if absolute => {}
                    _ => parts.push(".."),
                },
                other => parts.push(other),
            }
        }

        let inner = if absolute {
            format!("/{}", parts.join("/"))
        } else if parts.is_empty() {
            ".".to_string()
        } else if parts.len() == 1 && is_drive(parts[0]) {
            format!("{}/", parts[0])
        } else {
            parts.join("/")
        };
        Self { inner }
    }

    /// Resolve the path the way a shell would see it: symlinks in the
    /// existing prefix are followed, then the remainder is cleaned.
    ///
    /// The path does not have to exist. The deepest existing ancestor is
    /// canonicalized and the missing tail is appended lexically.
    pub fn resolve(&self) -> Self {
        let native = self.to_native();
        let components: Vec<Component<'_>> = native.components().collect();

        for split in (1..=components.len()).rev() {
            let head: PathBuf = components[..split].iter().collect();
            if let Ok(canonical) = dunce::canonicalize(&head) {
                let mut resolved = canonical;
                resolved.extend(&components[split..]);
                return Self::new(resolved).clean();
            }
        }

        self.clean()
    }
}

fn is_drive(segment: &str) -> bool {
    segment.len() == 2 && segment.ends_with(':')
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
