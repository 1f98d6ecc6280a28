//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod lists;
pub mod nearby;
pub mod onboard;
pub mod places;
pub mod prompt;
pub mod session;

pub use lists::{handle_lists_command, ListCommands};
pub use nearby::{handle_nearby_command, NearbyArgs};
pub use onboard::{handle_onboard_command, OnboardArgs};
pub use places::{handle_places_command, PlacesCommands};
pub use session::{
    handle_config_command, handle_history_command, handle_logout_command, handle_session_command,
};
