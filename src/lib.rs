//! Forkly - terminal client core for a restaurant discovery and review app
//!
//! This library implements the client side of Forkly: the multi-step
//! onboarding wizard that creates an account and records dining
//! preferences, plus saved lists, nearby search and place lookups against
//! the hosted backend.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (onboarding answers, sessions, lists, restaurants)
//! - `backend`: Backend collaborator traits and their HTTP implementation
//! - `onboarding`: Step navigation, validation, submission and the wizard
//! - `services`: Saved lists, nearby search and places lookup
//! - `storage`: Session and onboarding lead files
//! - `audit`: Journal of remote writes
//! - `display`, `cli`: Terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use forkly::backend::RestBackend;
//! use forkly::config::{ForklyPaths, Settings};
//! use forkly::onboarding::OnboardingWizard;
//!
//! let paths = ForklyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let backend = RestBackend::new(&settings.backend)?;
//! let mut wizard = OnboardingWizard::new(backend, settings.onboarding);
//! ```

pub mod audit;
pub mod backend;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod onboarding;
pub mod services;
pub mod storage;

pub use error::{ForklyError, ForklyResult};
