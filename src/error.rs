//! Custom error types for Forkly
//!
//! This module defines the error hierarchy for the client using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Forkly operations
#[derive(Error, Debug)]
pub enum ForklyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The chosen username already belongs to another profile
    #[error("Username is already taken: {0}")]
    DuplicateUsername(String),

    /// The backend refused to create the account
    #[error("Account creation failed: {0}")]
    AccountCreation(String),

    /// The backend refused to persist profile or preference data
    #[error("Could not save preferences: {0}")]
    Persistence(String),

    /// The backend could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with an unexpected status or payload
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Operation not permitted on a system-managed list
    #[error("'{0}' is a system list and cannot be changed")]
    SystemList(String),

    /// An operation needs a signed-in account
    #[error("Not signed in. Run 'forkly onboard' to create an account")]
    NotSignedIn,

    /// The places lookup proxy reported a failure
    #[error("Places lookup failed: {0}")]
    Places(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ForklyError {
    /// Create a "not found" error for saved lists
    pub fn list_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "List",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for restaurants
    pub fn restaurant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Restaurant",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the backend could not be reached at all
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Message suitable for inline display next to a form
    pub fn user_message(&self) -> String {
        match self {
            Self::DuplicateUsername(username) => {
                format!("The username '{}' is already taken. Try another one.", username)
            }
            Self::AccountCreation(msg) => msg.clone(),
            Self::Persistence(msg) => format!("We couldn't save your preferences: {}", msg),
            Self::Network(_) => {
                "We couldn't reach the server. Check your connection and try again.".to_string()
            }
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ForklyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ForklyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for ForklyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Json(err.to_string());
        }
        Self::Network(err.to_string())
    }
}

/// Result type alias for Forkly operations
pub type ForklyResult<T> = Result<T, ForklyError>;
