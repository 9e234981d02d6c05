//! Handle configuration
//!
//! Mirrors the config-file model of the store itself: a small TOML document
//! with a string durability knob that is validated eagerly. The handle never
//! writes a config file on its own — the bound path names a database file,
//! not a data directory — so loading and persisting are caller decisions.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Conventional config file name for applications that keep one on disk.
pub const CONFIG_FILE_NAME: &str = "solodb.toml";

/// How aggressively committed writes are synced to stable storage.
///
/// Both modes run the store in WAL journal mode; they differ in the
/// `synchronous` pragma applied at connect time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurabilityMode {
    /// `synchronous=NORMAL` — fsync at WAL checkpoint boundaries.
    /// A power failure may lose the last commits, never corrupt the store.
    Standard,
    /// `synchronous=FULL` — fsync on every commit, zero data loss.
    Always,
}

impl DurabilityMode {
    /// Value for `PRAGMA synchronous` at connect time.
    pub(crate) fn synchronous_pragma(&self) -> &'static str {
        match self {
            DurabilityMode::Standard => "NORMAL",
            DurabilityMode::Always => "FULL",
        }
    }
}

/// Configuration applied to the connection when it is opened.
///
/// # Example
///
/// ```toml
/// # Durability mode: "standard" (default) or "always"
/// durability = "standard"
///
/// # How long a statement waits on a locked store before failing (ms)
/// busy_timeout_ms = 5000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleConfig {
    /// Durability mode: `"standard"` or `"always"`.
    #[serde(default = "default_durability_str")]
    pub durability: String,
    /// Milliseconds a statement waits on a locked store before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_durability_str() -> String {
    "standard".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            durability: default_durability_str(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl HandleConfig {
    /// Parse the durability string into a `DurabilityMode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"standard"` or `"always"`.
    pub fn durability_mode(&self) -> Result<DurabilityMode> {
        match self.durability.as_str() {
            "standard" => Ok(DurabilityMode::Standard),
            "always" => Ok(DurabilityMode::Always),
            other => Err(Error::InvalidConfig(format!(
                "Invalid durability mode '{}'. Expected \"standard\" or \"always\".",
                other
            ))),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Solodb connection configuration
#
# Durability mode: "standard" (default) or "always"
#   "standard" = fsync at WAL checkpoints, may lose the last commits on power failure
#   "always"   = fsync every commit, zero data loss
durability = "standard"

# How long a statement waits on a locked store before failing (milliseconds).
busy_timeout_ms = 5000
"#
    }

    /// Read and parse config from a file path.
    ///
    /// The durability value is validated eagerly, so a handle built from a
    /// loaded config cannot fail on that value later at connect time.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HandleConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.durability_mode()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
