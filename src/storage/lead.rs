//! In-progress onboarding persistence

use std::path::PathBuf;

use crate::error::ForklyResult;
use crate::models::Lead;

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};

/// Store for the onboarding lead
pub struct LeadStore {
    path: PathBuf,
}

impl LeadStore {
    /// Create a new lead store
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the lead, if onboarding was interrupted
    pub fn load(&self) -> ForklyResult<Option<Lead>> {
        read_json_optional(&self.path)
    }

    /// Save the lead
    pub fn save(&self, lead: &Lead) -> ForklyResult<()> {
        write_json_atomic(&self.path, lead)
    }

    /// Drop the lead once onboarding is over
    pub fn clear(&self) -> ForklyResult<bool> {
        remove_if_exists(&self.path)
    }
}
