//! Signed-in account session
//!
//! Created when the signup step succeeds and persisted so later commands
//! (saved lists, preference retries) can act on behalf of the user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::username::Username;

/// Identity and credentials of the signed-in account
#[derive(Clone, Serialize, Deserialize)]
pub struct AccountSession {
    pub account_id: AccountId,
    pub email: String,
    pub username: Username,
    /// Bearer token for row-level-security protected calls
    ///
    /// `None` when the backend requires email confirmation before issuing
    /// a session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AccountSession {
    /// Create a new session record
    pub fn new(
        account_id: AccountId,
        email: impl Into<String>,
        username: Username,
        access_token: Option<String>,
    ) -> Self {
        Self {
            account_id,
            email: email.into(),
            username,
            access_token,
            created_at: Utc::now(),
        }
    }

    /// Whether authenticated calls can be made
    pub fn is_authenticated(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

impl fmt::Debug for AccountSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSession")
            .field("account_id", &self.account_id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl fmt::Display for AccountSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} <{}>", self.username, self.email)
    }
}
