//! Username availability checks
//!
//! Every keystroke may start a check, so checks race. Each one is issued a
//! [`CheckTicket`] carrying a generation number, and only the ticket of the
//! latest generation may write a result. A slow answer to an old username
//! can therefore never overwrite the answer for the current one.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::backend::OnboardingBackend;
use crate::error::ForklyResult;
use crate::models::Username;

/// What is known about the username being typed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Availability {
    /// No check has been started
    #[default]
    Unknown,
    /// The username is not well formed; nothing was sent
    Invalid,
    /// A check is pending
    Checking,
    Available,
    Taken,
    /// The check could not complete
    Failed(String),
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, ""),
            Self::Invalid => write!(f, "use only lowercase letters, digits, '.' and '_'"),
            Self::Checking => write!(f, "checking..."),
            Self::Available => write!(f, "available"),
            Self::Taken => write!(f, "already taken"),
            Self::Failed(message) => write!(f, "{}", message),
        }
    }
}

/// Permission to apply the result of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTicket {
    generation: u64,
    username: Username,
}

impl CheckTicket {
    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// Tracks the latest check and its result
#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    generation: u64,
    status: Availability,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a check, superseding any earlier one
    ///
    /// Returns `None` when the username is not well formed; the status is
    /// then `Invalid` and no remote call should be made.
    pub fn begin_check(&mut self, username: Username) -> Option<CheckTicket> {
        self.generation += 1;
        if !username.is_well_formed() {
            self.status = Availability::Invalid;
            return None;
        }
        self.status = Availability::Checking;
        Some(CheckTicket {
            generation: self.generation,
            username,
        })
    }

    /// Whether the ticket belongs to the latest check
    pub fn is_current(&self, ticket: &CheckTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a result; stale tickets are ignored
    ///
    /// Returns whether the result was applied.
    pub fn apply_check(&mut self, ticket: &CheckTicket, outcome: ForklyResult<bool>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                username = %ticket.username,
                generation = ticket.generation,
                latest = self.generation,
                "dropping stale availability result"
            );
            return false;
        }

        self.status = match outcome {
            Ok(true) => Availability::Taken,
            Ok(false) => Availability::Available,
            Err(err) => Availability::Failed(err.user_message()),
        };
        true
    }

    pub fn status(&self) -> &Availability {
        &self.status
    }
}

/// Debounced availability checks against the backend
pub struct UsernameChecker<B> {
    backend: Arc<B>,
    tracker: Arc<Mutex<AvailabilityTracker>>,
    debounce: Duration,
}

impl<B: OnboardingBackend + 'static> UsernameChecker<B> {
    pub fn new(backend: Arc<B>, debounce: Duration) -> Self {
        Self {
            backend,
            tracker: Arc::new(Mutex::new(AvailabilityTracker::new())),
            debounce,
        }
    }

    /// Schedule a check for `username`
    ///
    /// The remote call is made after the debounce interval, and only if no
    /// newer check was requested meanwhile. The task resolves to whether
    /// its result was applied.
    pub async fn request(&self, username: Username) -> Option<JoinHandle<bool>> {
        let ticket = self.tracker.lock().await.begin_check(username)?;

        let backend = Arc::clone(&self.backend);
        let tracker = Arc::clone(&self.tracker);
        let debounce = self.debounce;

        Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if !tracker.lock().await.is_current(&ticket) {
                return false;
            }
            let outcome = backend.username_exists(ticket.username()).await;
            tracker.lock().await.apply_check(&ticket, outcome)
        }))
    }

    /// Request a check and wait for it
    pub async fn check_now(&self, username: Username) -> Availability {
        if let Some(handle) = self.request(username).await {
            // A join error means the task panicked; the status then stays
            // at whatever the tracker holds.
            let _ = handle.await;
        }
        self.status().await
    }

    pub async fn status(&self) -> Availability {
        self.tracker.lock().await.status().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{Failure, FakeBackend};
    use crate::error::ForklyError;

    #[test]
    fn test_stale_result_is_ignored() {
        let mut tracker = AvailabilityTracker::new();
        let old = tracker.begin_check("ana".into()).unwrap();
        let new = tracker.begin_check("ana99".into()).unwrap();

        assert!(tracker.apply_check(&new, Ok(false)));
        assert_eq!(tracker.status(), &Availability::Available);

        assert!(!tracker.apply_check(&old, Ok(true)));
        assert_eq!(tracker.status(), &Availability::Available);
    }

    #[test]
    fn test_stale_result_arriving_first_is_ignored() {
        let mut tracker = AvailabilityTracker::new();
        let old = tracker.begin_check("ana".into()).unwrap();
        let new = tracker.begin_check("ana99".into()).unwrap();

        assert!(!tracker.apply_check(&old, Ok(true)));
        assert_eq!(tracker.status(), &Availability::Checking);
        assert!(tracker.apply_check(&new, Ok(true)));
        assert_eq!(tracker.status(), &Availability::Taken);
    }

    #[test]
    fn test_invalid_username_supersedes_pending_check() {
        let mut tracker = AvailabilityTracker::new();
        let pending = tracker.begin_check("ana".into()).unwrap();
        assert!(tracker.begin_check(Username::normalize("!!")).is_none());
        assert_eq!(tracker.status(), &Availability::Invalid);

        assert!(!tracker.apply_check(&pending, Ok(false)));
        assert_eq!(tracker.status(), &Availability::Invalid);
    }

    #[test]
    fn test_failure_is_reported() {
        let mut tracker = AvailabilityTracker::new();
        let ticket = tracker.begin_check("ana".into()).unwrap();
        tracker.apply_check(&ticket, Err(ForklyError::Network("timeout".into())));
        assert!(matches!(tracker.status(), Availability::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_only_sends_latest() {
        let backend = Arc::new(FakeBackend::new());
        backend.take_username("ana99");
        let checker = UsernameChecker::new(Arc::clone(&backend), Duration::from_millis(400));

        let first = checker.request("a".into()).await.unwrap();
        let second = checker.request("ana".into()).await.unwrap();
        let third = checker.request("ana99".into()).await.unwrap();

        assert!(!first.await.unwrap());
        assert!(!second.await.unwrap());
        assert!(third.await.unwrap());

        assert_eq!(backend.calls(), vec!["username_exists:ana99"]);
        assert_eq!(checker.status().await, Availability::Taken);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_now() {
        let backend = Arc::new(FakeBackend::new());
        let checker = UsernameChecker::new(Arc::clone(&backend), Duration::from_millis(400));
        assert_eq!(checker.check_now("ana99".into()).await, Availability::Available);

        backend.fail("username_exists", Failure::Network);
        assert!(matches!(
            checker.check_now("bia".into()).await,
            Availability::Failed(_)
        ));
    }
}
