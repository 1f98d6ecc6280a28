//! Display formatting for terminal output
//!
//! Formats models as plain text with hand-aligned columns.

pub mod lists;
pub mod onboarding;
pub mod restaurants;

pub use lists::{format_list_details, format_list_table};
pub use onboarding::{format_history, format_session, format_summary};
pub use restaurants::{format_nearby, format_place_details, format_place_list};
