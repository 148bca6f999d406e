//! Service status reporting
//!
//! Independent services record their last-run outcome into a shared status
//! directory and register their name in a manifest of known services:
//!
//! 1. [`StatusDirectoryResolver`] loads `.env.json` and creates the directory
//! 2. [`StatusReporter`] writes `<service>.json`
//! 3. [`ManifestUpdater`] adds the service to `services.json`
//!
//! Configuration problems are fatal and surface as [`Error`]. Write problems
//! after that point are reported as [`Outcome::Degraded`] so that a
//! reporting hiccup never fails the pipeline being reported on.

pub mod error;
pub mod manifest;
pub mod outcome;
pub mod record;
pub mod reporter;
pub mod resolver;
pub mod service;

pub use error::{Error, Result};
pub use manifest::{MANIFEST_FILE_NAME, MANIFEST_MODE, Manifest, ManifestState, ManifestUpdater};
pub use outcome::Outcome;
pub use record::{Status, StatusRecord};
pub use reporter::StatusReporter;
pub use resolver::{STATUS_DIR_KEY, StatusDirectoryResolver};
pub use service::ServiceName;

use status_fs::NormalizedPath;

/// What happened to each artifact during one invocation.
#[derive(Debug)]
pub struct ReportSummary {
    pub status: Outcome,
    pub manifest: Outcome,
}

impl ReportSummary {
    /// Whether any step fell back to a degraded outcome.
    pub fn is_degraded(&self) -> bool {
        self.status.is_degraded() || self.manifest.is_degraded()
    }
}

/// Write the status document, then register the service in the manifest.
///
/// The manifest update runs even when the status write failed: the
/// service still exists.
pub fn report_and_register(
    status_dir: &NormalizedPath,
    service: &ServiceName,
    exit_code: i64,
) -> ReportSummary {
    let status = StatusReporter::new(status_dir.clone()).report(service, exit_code);
    let manifest = ManifestUpdater::new(status_dir.clone()).register(service);
    ReportSummary { status, manifest }
}

/// Resolve the status directory, then report and register.
///
/// Fails only on configuration errors, before anything is written.
pub fn run(
    resolver: &StatusDirectoryResolver,
    service: &ServiceName,
    exit_code: i64,
) -> Result<ReportSummary> {
    let status_dir = resolver.resolve()?;
    Ok(report_and_register(&status_dir, service, exit_code))
}
