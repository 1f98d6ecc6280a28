//! Saved restaurant lists
//!
//! A saved list is a user-owned named collection of restaurants. System
//! lists are provisioned by the backend with reserved semantics and cannot
//! be renamed or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, ListId};
use super::restaurant::Restaurant;

/// Reserved kinds of system lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemListType {
    /// Places the user wants to try
    WantToGo,
    /// Places the user loves
    Favorites,
}

impl fmt::Display for SystemListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WantToGo => write!(f, "Want to go"),
            Self::Favorites => write!(f, "Favorites"),
        }
    }
}

/// A named collection of restaurants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedList {
    pub id: ListId,
    pub owner_id: AccountId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub system_type: Option<SystemListType>,
    #[serde(default)]
    pub restaurant_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedList {
    /// Whether the list has reserved semantics
    pub fn is_system(&self) -> bool {
        self.system_type.is_some()
    }
}

impl fmt::Display for SavedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A restaurant inside a saved list, as one flat backend row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRestaurant {
    pub list_id: ListId,
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub visited: bool,
    #[serde(default)]
    pub visited_at: Option<DateTime<Utc>>,
}

/// Validation errors for list names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNameError {
    Empty,
    TooLong(usize),
}

/// Longest list name accepted
pub const MAX_LIST_NAME_LEN: usize = 60;

/// Trim and validate a list name
pub fn validate_list_name(name: &str) -> Result<String, ListNameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ListNameError::Empty);
    }
    let len = name.chars().count();
    if len > MAX_LIST_NAME_LEN {
        return Err(ListNameError::TooLong(len));
    }
    Ok(name.to_string())
}

impl fmt::Display for ListNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "List name cannot be empty"),
            Self::TooLong(len) => {
                write!(f, "List name too long ({} chars, max {})", len, MAX_LIST_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for ListNameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_list_name() {
        assert_eq!(validate_list_name("  Date night "), Ok("Date night".to_string()));
        assert_eq!(validate_list_name("   "), Err(ListNameError::Empty));
        assert_eq!(
            validate_list_name(&"a".repeat(61)),
            Err(ListNameError::TooLong(61))
        );
        assert!(validate_list_name(&"a".repeat(60)).is_ok());
    }

    #[test]
    fn test_system_type_serde() {
        let json = serde_json::to_string(&SystemListType::WantToGo).unwrap();
        assert_eq!(json, "\"want_to_go\"");
    }

    #[test]
    fn test_saved_restaurant_row_is_flat() {
        let json = r#"{
            "list_id": "550e8400-e29b-41d4-a716-446655440000",
            "id": "750e8400-e29b-41d4-a716-446655440000",
            "name": "Padaria Real",
            "added_at": "2025-03-01T09:30:00Z",
            "visited": true,
            "visited_at": "2025-03-02T20:00:00Z"
        }"#;
        let row: SavedRestaurant = serde_json::from_str(json).unwrap();
        assert_eq!(row.restaurant.name, "Padaria Real");
        assert!(row.visited);
        assert!(row.visited_at.is_some());
    }

    #[test]
    fn test_list_deserializes_backend_row() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "owner_id": "650e8400-e29b-41d4-a716-446655440000",
            "name": "Want to go",
            "system_type": "want_to_go",
            "restaurant_count": 4,
            "created_at": "2025-01-01T12:00:00Z",
            "updated_at": "2025-01-02T12:00:00Z"
        }"#;
        let list: SavedList = serde_json::from_str(json).unwrap();
        assert!(list.is_system());
        assert_eq!(list.restaurant_count, 4);
        assert_eq!(list.description, None);
    }
}
