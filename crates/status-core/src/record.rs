//! The per-service status document

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::{Error, Result, ServiceName};

/// Result of a service run, derived from its exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl Status {
    /// Exit code 0 is success; everything else, including negative codes,
    /// is an error.
    pub fn from_exit_code(exit_code: i64) -> Self {
        if exit_code == 0 {
            Self::Success
        } else {
            Self::Error
        }
    }
}

/// Latest observation for one service.
///
/// Field order is the on-disk key order. Fields are only reachable through
/// accessors so a record always carries a validated service name and a
/// status consistent with its exit code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    service: ServiceName,
    #[serde(serialize_with = "serialize_millis")]
    timestamp: DateTime<Utc>,
    status: Status,
    exit_code: i64,
}

impl StatusRecord {
    /// Record a run that finished just now.
    pub fn new(service: &ServiceName, exit_code: i64) -> Self {
        Self::at(service, exit_code, Utc::now())
    }

    /// Record a run that finished at `when`. Sub-millisecond precision is
    /// dropped.
    pub fn at(service: &ServiceName, exit_code: i64, when: DateTime<Utc>) -> Self {
        Self {
            service: service.clone(),
            timestamp: truncate_to_millis(when),
            status: Status::from_exit_code(exit_code),
            exit_code,
        }
    }

    pub fn service(&self) -> &ServiceName {
        &self.service
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn exit_code(&self) -> i64 {
        self.exit_code
    }

    /// Render as 4-space indented JSON followed by a newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|source| Error::Serialize {
                what: "status record",
                source,
            })?;

        let mut rendered = String::from_utf8_lossy(&buf).into_owned();
        rendered.push('\n');
        Ok(rendered)
    }
}

fn truncate_to_millis(when: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(when.timestamp_millis()).unwrap_or(when)
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ`
fn serialize_millis<S: Serializer>(
    when: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&when.to_rfc3339_opts(SecondsFormat::Millis, true))
}
