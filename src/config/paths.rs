//! Path management for Forkly
//!
//! Provides XDG-compliant path resolution for settings, the signed-in
//! session, in-progress onboarding and the audit journal.
//!
//! ## Path Resolution Order
//!
//! 1. `FORKLY_DATA_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/forkly` (if set)
//! 3. The platform config directory reported by `directories`

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ForklyError;

/// Manages all paths used by Forkly
#[derive(Debug, Clone)]
pub struct ForklyPaths {
    /// Base directory for all Forkly data
    base_dir: PathBuf,
}

impl ForklyPaths {
    /// Create a new ForklyPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, ForklyError> {
        let base_dir = if let Ok(custom) = std::env::var("FORKLY_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ForklyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the signed-in session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the in-progress onboarding lead
    pub fn lead_file(&self) -> PathBuf {
        self.base_dir.join("lead.json")
    }

    /// Get the path to the audit journal
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ForklyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ForklyError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, ForklyError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("forkly"));
    }

    ProjectDirs::from("app", "Forkly", "forkly")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ForklyError::Config("Could not determine a config directory".into()))
}
