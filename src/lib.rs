//! Solodb - Singleton-guarded lazy connection handle for embedded SQLite
//!
//! Solodb owns at most one live connection to a named SQLite store per
//! process and enforces that every caller observes exactly one instance
//! with a single agreed-upon path. The connection is opened lazily on
//! `connect()`, statements serialize through the handle, and a reset hook
//! lets tests rebind the singleton to a fresh path.
//!
//! # Quick Start
//!
//! ```ignore
//! use solodb::{params, Handle};
//!
//! // Process-wide singleton, bound to the path on first acquire
//! let db = Handle::acquire("app.db")?;
//! db.connect()?;
//!
//! db.execute("CREATE TABLE t (x INTEGER)", [])?;
//! db.execute("INSERT INTO t VALUES (?1)", params![1])?;
//!
//! let cursor = db.execute("SELECT x FROM t", [])?;
//! assert_eq!(cursor.len(), 1);
//! ```
//!
//! # Architecture
//!
//! [`Handle`] is an ordinary injectable object — construct one with
//! [`Handle::new`] at your composition root and pass it around. The
//! [`registry`] module layers the process-wide singleton guard on top:
//! [`Handle::acquire`] returns the shared instance, a second acquisition
//! with a different path fails with
//! [`Error::ConfigurationConflict`], and [`reset`] (test support)
//! discards the singleton so the next acquire can rebind.

mod config;
mod cursor;
mod error;
mod handle;
pub mod registry;

pub use config::{DurabilityMode, HandleConfig, CONFIG_FILE_NAME};
pub use cursor::{ResultCursor, Row};
pub use error::{Error, Result};
pub use handle::Handle;
pub use registry::{reset, Acquired};

// Parameter binding and value types come straight from the backing engine
pub use rusqlite::params;
pub use rusqlite::types::Value;
