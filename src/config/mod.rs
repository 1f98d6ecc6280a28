//! Configuration module for Forkly
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Onboarding rules and backend connection details

pub mod paths;
pub mod settings;

pub use paths::ForklyPaths;
pub use settings::{BackendSettings, NearbySettings, OnboardingRules, Settings};
