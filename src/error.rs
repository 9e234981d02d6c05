//! Error types for the connection handle
//!
//! This module defines all error types used throughout the crate.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for handle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the connection handle
#[derive(Debug, Error)]
pub enum Error {
    /// A second acquisition requested a different path than the one already bound
    #[error("configuration conflict: handle bound to '{}', requested '{}'", .bound.display(), .requested.display())]
    ConfigurationConflict {
        /// Path the process singleton is bound to
        bound: PathBuf,
        /// Path requested by the failing call
        requested: PathBuf,
    },

    /// A statement was executed without a live connection
    #[error("not connected: call connect() before executing statements")]
    NotConnected,

    /// Backing store error (open, prepare, bind, step)
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error (directory creation, config file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration value or unparseable config file
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// True for the conflicting-path acquisition failure.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::ConfigurationConflict { .. })
    }

    /// True for the execute-without-connect failure.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Error::NotConnected)
    }
}
