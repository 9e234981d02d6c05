//! Connection handle: lazy connect, serialized execute, idempotent close
//!
//! The handle owns at most one live connection to the store at its bound
//! path. The path is fixed at construction; the connection is opened on the
//! first explicit `connect()` and released on `close()`.
//!
//! ## Two construction paths
//!
//! 1. **Injectable** (recommended): `Handle::new(path)` at the application's
//!    composition root, then pass the handle (or an `Arc` of it) to callers.
//!    Nothing global is consulted; single-connection discipline is the
//!    composition root's job.
//!
//! 2. **Guarded**: `Handle::acquire(path)` routes through the process-wide
//!    registry, which enforces that every caller in the process observes one
//!    instance bound to one agreed-upon path.

use parking_lot::Mutex;
use rusqlite::{Connection, Params};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::config::HandleConfig;
use crate::cursor::{ResultCursor, Row};
use crate::error::{Error, Result};
use crate::registry;

/// Handle mediating access to a single embedded SQLite connection.
///
/// State machine: `Initialized(path) ⇄ Connected ⇄ Disconnected(path)`.
/// `connect`, `execute`, and `close` all serialize on one internal mutex,
/// so a handle is safe to share across threads; statements never interleave.
///
/// # Example
///
/// ```ignore
/// use solodb::Handle;
///
/// let handle = Handle::acquire("app.db")?;
/// handle.connect()?;
/// handle.execute("CREATE TABLE t (x INTEGER)", [])?;
/// handle.execute("INSERT INTO t VALUES (?1)", [1])?;
/// let cursor = handle.execute("SELECT x FROM t", [])?;
/// assert_eq!(cursor.len(), 1);
/// ```
pub struct Handle {
    /// Bound store path, immutable for the handle's lifetime
    path: PathBuf,

    /// Configuration applied when the connection is opened
    config: HandleConfig,

    /// Live connection resource; None until `connect()`
    /// Using parking_lot::Mutex to avoid lock poisoning on panic
    conn: Mutex<Option<Connection>>,
}

impl Handle {
    /// Create an unconnected handle bound to `path`, with default config.
    ///
    /// This does not touch the filesystem and does not consult the
    /// process-wide registry. Call [`connect`](Self::connect) before
    /// executing statements.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, HandleConfig::default())
    }

    /// Create an unconnected handle bound to `path` with an explicit config.
    pub fn with_config<P: AsRef<Path>>(path: P, config: HandleConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
            conn: Mutex::new(None),
        }
    }

    /// Acquire the process-wide singleton handle for `path`.
    ///
    /// If no singleton exists, one is created and bound to `path`. If one
    /// exists with the same path, it is returned unchanged. Acquiring the
    /// same path from multiple threads always yields the same
    /// `Arc<Handle>`:
    ///
    /// ```ignore
    /// let h1 = Handle::acquire("app.db")?;
    /// let h2 = Handle::acquire("app.db")?;  // Same Arc as h1
    /// assert!(Arc::ptr_eq(&h1, &h2));
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::ConfigurationConflict`] if the singleton is already bound
    /// to a different path. The existing binding is never overwritten.
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Arc<Handle>> {
        registry::acquire(path, HandleConfig::default()).map(registry::Acquired::into_handle)
    }

    /// Acquire the process-wide singleton with an explicit config.
    ///
    /// The config only takes effect when this call creates the singleton;
    /// if an instance already exists for the path, its config wins and the
    /// supplied one is ignored.
    pub fn acquire_with_config<P: AsRef<Path>>(
        path: P,
        config: HandleConfig,
    ) -> Result<Arc<Handle>> {
        registry::acquire(path, config).map(registry::Acquired::into_handle)
    }

    /// Open the connection if it is not already open. Idempotent.
    ///
    /// On first open this creates the parent directory if missing, opens
    /// the store at the bound path, and applies the configured pragmas
    /// (WAL journal mode, synchronous level, busy timeout). Calling
    /// `connect` on a live connection is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Directory creation and store-open failures propagate;
    /// [`Error::InvalidConfig`] if the config's durability string is
    /// invalid.
    pub fn connect(&self) -> Result<()> {
        let mut guard = self.conn.lock();
        if guard.is_some() {
            debug!(
                target: "solodb::handle",
                path = %self.path.display(),
                "connect() with live connection is a no-op"
            );
            return Ok(());
        }

        // Validate before touching the filesystem
        let mode = self.config.durability_mode()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_millis(self.config.busy_timeout_ms))?;
        // journal_mode returns the resulting mode as a row; synchronous does not
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_row| Ok(()))?;
        conn.pragma_update(None, "synchronous", mode.synchronous_pragma())?;

        info!(
            target: "solodb::handle",
            path = %self.path.display(),
            durability = %self.config.durability,
            busy_timeout_ms = self.config.busy_timeout_ms,
            "Connection opened"
        );

        *guard = Some(conn);
        Ok(())
    }

    /// Execute one statement with bound parameters.
    ///
    /// Statements run in autocommit mode: the unit of work is committed,
    /// and durable per the configured synchronous level, before this
    /// returns. Row-returning statements yield a cursor positioned over
    /// the materialized result rows; other statements yield a cursor whose
    /// [`changes`](ResultCursor::changes) reports the affected-row count.
    ///
    /// # Errors
    ///
    /// [`Error::NotConnected`] if `connect()` was never called or the
    /// connection was closed and not reopened. Statement failures
    /// propagate as [`Error::Sqlite`]; nothing is retried internally.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<ResultCursor> {
        let guard = self.conn.lock();
        let conn = guard.as_ref().ok_or(Error::NotConnected)?;

        let mut stmt = conn.prepare(sql)?;
        let column_count = stmt.column_count();

        if column_count > 0 {
            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(|name| name.to_string())
                .collect();

            let mut out = Vec::new();
            let mut rows = stmt.query(params)?;
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(column_count);
                for idx in 0..column_count {
                    values.push(row.get(idx)?);
                }
                out.push(Row::new(values));
            }

            trace!(
                target: "solodb::handle",
                sql = %sql,
                rows = out.len(),
                "Query returned rows"
            );
            Ok(ResultCursor::from_rows(columns, out))
        } else {
            let changes = stmt.execute(params)?;
            trace!(
                target: "solodb::handle",
                sql = %sql,
                changes,
                "Statement executed"
            );
            Ok(ResultCursor::from_write(changes))
        }
    }

    /// Release the connection if one is live. Idempotent.
    ///
    /// After `close()`, `execute` fails with [`Error::NotConnected`] until
    /// `connect()` is called again. The bound path is unaffected.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.conn.lock();
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_conn, e)| Error::Sqlite(e))?;
            info!(
                target: "solodb::handle",
                path = %self.path.display(),
                "Connection closed"
            );
        }
        Ok(())
    }

    /// True while a live connection exists.
    pub fn is_connected(&self) -> bool {
        self.conn.lock().is_some()
    }

    /// The store path this handle is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The config the connection is (or will be) opened with.
    pub fn config(&self) -> &HandleConfig {
        &self.config
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("path", &self.path)
            .field("connected", &self.is_connected())
            .finish()
    }
}
