//! The onboarding wizard
//!
//! - `navigator`: position within the fixed step sequence.
//! - `validator`: per-step completion rules.
//! - `submission`: the two remote checkpoints (account, preferences).
//! - `availability`: debounced username checks that ignore stale answers.
//! - `wizard`: the state machine front ends drive.

pub mod availability;
pub mod navigator;
pub mod submission;
pub mod validator;
pub mod wizard;

pub use availability::{Availability, AvailabilityTracker, CheckTicket, UsernameChecker};
pub use navigator::StepNavigator;
pub use submission::SubmissionAdapter;
pub use validator::{can_continue, missing_requirements};
pub use wizard::{ContinueOutcome, OnboardingWizard};
