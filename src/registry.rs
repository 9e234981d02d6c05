//! Process-wide singleton slot for the connection handle
//!
//! Ensures all callers in the process observe one `Handle` instance bound
//! to one agreed-upon path. Uses once_cell + parking_lot so the guard works
//! without lock poisoning and without an explicit init step.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::HandleConfig;
use crate::error::{Error, Result};
use crate::handle::Handle;

// =============================================================================
// Singleton Slot
// =============================================================================
//
// A populated slot means the process singleton is initialized; its Handle
// carries the bound path. The slot holds a strong Arc: the singleton's
// identity survives until reset(), not merely until the last caller drops
// its clone. The slot mutex is held across the whole check-and-create in
// acquire(), so concurrent first acquisitions cannot race.

/// Current process singleton (None until the first `acquire`)
static CURRENT: Lazy<Mutex<Option<Arc<Handle>>>> = Lazy::new(|| Mutex::new(None));

/// Outcome of a successful acquisition.
///
/// Distinguishes the first binding from a repeat acquisition of the same
/// path, which is a no-op success. A repeat acquisition with a *different*
/// path is not represented here — that is [`Error::ConfigurationConflict`].
#[derive(Debug, Clone)]
pub enum Acquired {
    /// The slot was empty; a handle was created and bound to the path.
    Created(Arc<Handle>),
    /// The slot already held a handle bound to the same path.
    Existing(Arc<Handle>),
}

impl Acquired {
    /// The acquired handle, discarding the created/existing distinction.
    pub fn into_handle(self) -> Arc<Handle> {
        match self {
            Acquired::Created(handle) | Acquired::Existing(handle) => handle,
        }
    }

    /// Borrow the acquired handle.
    pub fn handle(&self) -> &Arc<Handle> {
        match self {
            Acquired::Created(handle) | Acquired::Existing(handle) => handle,
        }
    }

    /// True if this acquisition created the singleton.
    pub fn is_created(&self) -> bool {
        matches!(self, Acquired::Created(_))
    }
}

/// Acquire the process singleton for `path`, creating it if absent.
///
/// `config` only applies when this call creates the singleton. On a repeat
/// acquisition of the bound path the existing instance wins and a differing
/// supplied config is ignored.
///
/// # Errors
///
/// [`Error::ConfigurationConflict`] if the slot is bound to a different
/// path. The existing binding is never silently ignored or overwritten.
pub fn acquire<P: AsRef<Path>>(path: P, config: HandleConfig) -> Result<Acquired> {
    let requested = path.as_ref().to_path_buf();

    let mut slot = CURRENT.lock();
    match slot.as_ref() {
        Some(existing) if existing.path() == requested => {
            if existing.config() != &config {
                debug!(
                    target: "solodb::registry",
                    path = %requested.display(),
                    "Supplied config ignored; existing instance wins"
                );
            }
            debug!(
                target: "solodb::registry",
                path = %requested.display(),
                "Returning existing handle"
            );
            Ok(Acquired::Existing(Arc::clone(existing)))
        }
        Some(existing) => Err(Error::ConfigurationConflict {
            bound: existing.path().to_path_buf(),
            requested,
        }),
        None => {
            let handle = Arc::new(Handle::with_config(&requested, config));
            *slot = Some(Arc::clone(&handle));
            info!(
                target: "solodb::registry",
                path = %requested.display(),
                "Bound process singleton"
            );
            Ok(Acquired::Created(handle))
        }
    }
}

/// Discard the process singleton, whatever its state. Test support.
///
/// Any live connection in the slot is closed on the way out; `close()`
/// need not have been called first. Handles already handed out remain
/// valid objects but are no longer the process singleton — the next
/// `acquire` establishes a brand-new one, potentially with a different
/// path.
pub fn reset() {
    let mut slot = CURRENT.lock();
    if let Some(handle) = slot.take() {
        if handle.is_connected() {
            warn!(
                target: "solodb::registry",
                path = %handle.path().display(),
                "reset() discarding a live connection"
            );
            // Best effort; the slot is cleared regardless
            let _ = handle.close();
        } else {
            info!(
                target: "solodb::registry",
                path = %handle.path().display(),
                "reset() cleared singleton"
            );
        }
    }
}
