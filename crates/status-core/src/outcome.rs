//! Result of a best-effort write step

use status_fs::NormalizedPath;

use crate::Error;

/// Outcome of a step that must never abort the invocation.
#[derive(Debug)]
pub enum Outcome {
    /// The artifact was written at this path.
    Written(NormalizedPath),
    /// Nothing needed to change, so nothing was touched.
    Unchanged,
    /// The step failed; the error was logged and the invocation continues.
    Degraded(Error),
}

impl Outcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// The error behind a degraded outcome.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Degraded(e) => Some(e),
            _ => None,
        }
    }
}
