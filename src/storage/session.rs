//! Signed-in session persistence
//!
//! The session holds a bearer token, so it is written owner-only.

use std::path::PathBuf;

use crate::error::ForklyResult;
use crate::models::AccountSession;

use super::file_io::{read_json_optional, remove_if_exists, write_json_private};

/// Store for the signed-in account
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the session, if one was saved
    pub fn load(&self) -> ForklyResult<Option<AccountSession>> {
        read_json_optional(&self.path)
    }

    /// Save the session
    pub fn save(&self, session: &AccountSession) -> ForklyResult<()> {
        write_json_private(&self.path, session)
    }

    /// Forget the session; returns whether one existed
    pub fn clear(&self) -> ForklyResult<bool> {
        remove_if_exists(&self.path)
    }
}
