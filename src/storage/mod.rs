//! Local storage for Forkly
//!
//! The backend holds the durable copy of everything. Locally the client only
//! keeps the signed-in session and the lead of an unfinished onboarding, each
//! as a small JSON document written atomically.

pub mod file_io;
pub mod lead;
pub mod session;

pub use file_io::{read_json_optional, read_json_required, write_json_atomic, write_json_private};
pub use lead::LeadStore;
pub use session::SessionStore;

use crate::config::paths::ForklyPaths;
use crate::error::{ForklyError, ForklyResult};
use crate::models::AccountSession;

/// Main storage coordinator
pub struct Storage {
    paths: ForklyPaths,
    pub session: SessionStore,
    pub lead: LeadStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ForklyPaths) -> Result<Self, ForklyError> {
        paths.ensure_directories()?;

        Ok(Self {
            session: SessionStore::new(paths.session_file()),
            lead: LeadStore::new(paths.lead_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ForklyPaths {
        &self.paths
    }

    /// Load the session or fail with `NotSignedIn`
    pub fn require_session(&self) -> ForklyResult<AccountSession> {
        match self.session.load()? {
            Some(session) if session.is_authenticated() => Ok(session),
            _ => Err(ForklyError::NotSignedIn),
        }
    }
}
