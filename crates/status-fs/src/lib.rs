//! Filesystem layer for service-status
//!
//! Provides the flat JSON configuration store, path resolution and the
//! atomic write primitive the status directory relies on.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{CONFIG_FILE_NAME, ConfigStore, ConfigValue, SCHEMA_VERSION, ValueMode};
pub use error::{Error, Result};
pub use io::WriteOptions;
pub use path::NormalizedPath;
