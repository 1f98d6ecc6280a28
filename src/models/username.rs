//! Username handle
//!
//! Handles are kept to lowercase ASCII letters, digits, `.` and `_`. Every
//! way of building a [`Username`] goes through [`Username::normalize`], so a
//! stored handle is always in normal form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A normalized username handle
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Normalize raw input into a handle
    ///
    /// Uppercase ASCII letters are lowered; every other character outside
    /// `a-z 0-9 . _` is dropped.
    pub fn normalize(raw: &str) -> Self {
        let handle = raw
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .filter(|c| is_allowed(*c))
            .collect();
        Self(handle)
    }

    /// Get the handle as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the handle matches `^[a-z0-9._]+$`
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(is_allowed)
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_'
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Username {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::normalize(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips() {
        assert_eq!(Username::normalize("Ana Souza!").as_str(), "anasouza");
        assert_eq!(Username::normalize("ana.souza_99").as_str(), "ana.souza_99");
        assert_eq!(Username::normalize("José-Luis").as_str(), "josluis");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Ana99", "  the.Foodie__ ", "ÇAFÉ-lover", "", "@@@", "a.b_c.9"] {
            let once = Username::normalize(raw);
            let twice = Username::normalize(once.as_str());
            assert_eq!(once, twice, "normalizing {:?} twice changed it", raw);
        }
    }

    #[test]
    fn test_well_formed() {
        assert!(Username::normalize("ana99").is_well_formed());
        assert!(!Username::normalize("!!!").is_well_formed());
        assert!(!Username::default().is_well_formed());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let username: Username = serde_json::from_str("\"Ana 99\"").unwrap();
        assert_eq!(username.as_str(), "ana99");
    }
}
