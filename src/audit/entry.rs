//! Audit entry data structures
//!
//! One entry per successful remote write: what happened, to which entity,
//! on behalf of which account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of remote writes that are journaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Backend entities the client writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Account,
    Preferences,
    SavedList,
    ListItem,
    Visit,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Account => write!(f, "Account"),
            EntityType::Preferences => write!(f, "Preferences"),
            EntityType::SavedList => write!(f, "SavedList"),
            EntityType::ListItem => write!(f, "ListItem"),
            EntityType::Visit => write!(f, "Visit"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the write was acknowledged (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// ID of the affected entity
    pub entity_id: String,

    /// Human-readable description of the entity (e.g., list name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Account the write was made for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// JSON of what was sent, when useful for later inspection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create an entry stamped with the current time
    pub fn new(operation: Operation, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            account_id: None,
            details: None,
        }
    }

    /// Attach a display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    /// Attach the acting account
    pub fn by(mut self, account_id: impl ToString) -> Self {
        self.account_id = Some(account_id.to_string());
        self
    }

    /// Attach a serialized payload
    pub fn with_details<T: Serialize>(mut self, details: &T) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        output
    }
}
