//! Writes one service's status document

use status_fs::{NormalizedPath, WriteOptions, io};

use crate::{Outcome, Result, ServiceName, StatusRecord};

/// Writes `<service>.json` into the status directory.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    status_dir: NormalizedPath,
}

impl StatusReporter {
    pub fn new(status_dir: NormalizedPath) -> Self {
        Self { status_dir }
    }

    /// Path of the status document for `service`.
    pub fn status_path(&self, service: &ServiceName) -> NormalizedPath {
        self.status_dir.join(&service.status_file_name())
    }

    /// Record the outcome of a run that just finished.
    ///
    /// Any prior document for the service is replaced. A write failure is
    /// logged and returned as [`Outcome::Degraded`], never as an error.
    pub fn report(&self, service: &ServiceName, exit_code: i64) -> Outcome {
        self.report_record(&StatusRecord::new(service, exit_code))
    }

    /// Write an already-built record to the file named after its service.
    pub fn report_record(&self, record: &StatusRecord) -> Outcome {
        let path = self.status_path(record.service());

        match self.write(&path, record) {
            Ok(()) => {
                tracing::debug!(
                    service = %record.service(),
                    status = ?record.status(),
                    exit_code = record.exit_code(),
                    path = %path,
                    "wrote status document"
                );
                Outcome::Written(path)
            }
            Err(e) => {
                tracing::warn!("Error writing status file: {e}");
                Outcome::Degraded(e)
            }
        }
    }

    fn write(&self, path: &NormalizedPath, record: &StatusRecord) -> Result<()> {
        let rendered = record.to_pretty_json()?;
        io::write_atomic(path, rendered.as_bytes(), WriteOptions::default())?;
        Ok(())
    }
}
