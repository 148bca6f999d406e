//! Validated service identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::manifest::MANIFEST_FILE_NAME;
use crate::{Error, Result};

/// A service identifier that is safe to use as a file stem inside the
/// status directory.
///
/// Deserialization runs the same validation, so a status document naming
/// `../elsewhere` is rejected rather than trusted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceName(String);

impl ServiceName {
    /// Validate and wrap a service name.
    ///
    /// Rejects empty names, path separators, `.`/`..`, NUL bytes and the
    /// manifest's own stem.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if name == "." || name == ".." {
            Some("must not be a relative directory reference")
        } else if name.contains('\0') {
            Some("must not contain NUL bytes")
        } else if format!("{name}.json") == MANIFEST_FILE_NAME {
            Some("is reserved for the services manifest")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::InvalidServiceName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this service's status document.
    pub fn status_file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl TryFrom<String> for ServiceName {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<ServiceName> for String {
    fn from(service: ServiceName) -> Self {
        service.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
