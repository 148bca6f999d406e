//! Shared test utilities for the service-status workspace.
//!
//! Dev-dependency only. Provides [`TestEnv`], a throwaway project root and
//! home directory pair so tests never touch the real `~`.

pub mod env;

pub use env::TestEnv;
