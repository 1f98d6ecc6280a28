//! Typed identifiers for accounts, saved lists, restaurants and onboarding leads
//!
//! The backend hands out plain UUIDs for all of these. Terminal output shows
//! a short tagged form such as `rst-550e8400`; commands accept either that
//! tag in front of a full UUID or the bare UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier printed as `<tag><first 8 hex digits>`
macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident => $tag:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const TAG: &'static str = $tag;

            /// A fresh random identifier, for rows created locally
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// First eight hex digits, enough to tell rows apart in a table
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", Self::TAG, self.short())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let raw = raw.trim();
                let uuid = raw.strip_prefix(Self::TAG).unwrap_or(raw);
                Uuid::parse_str(uuid).map(Self)
            }
        }
    };
}

uuid_id!(
    /// A Forkly user; the same id as the auth user and the profile row
    AccountId => "usr-"
);
uuid_id!(
    /// A saved list, custom or system
    ListId => "lst-"
);
uuid_id!(RestaurantId => "rst-");
uuid_id!(
    /// Local handle for one onboarding attempt
    LeadId => "lead-"
);
