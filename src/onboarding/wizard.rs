//! Onboarding wizard orchestration
//!
//! Owns the answers, the current step and the signed-in session, and turns
//! "continue" and "back" into navigation and remote checkpoints. Failures
//! never escape as errors: they land in [`OnboardingWizard::error`] and the
//! wizard stays on the step.

use tracing::{debug, warn};

use crate::audit::AuditLogger;
use crate::backend::OnboardingBackend;
use crate::config::OnboardingRules;
use crate::error::ForklyError;
use crate::models::{AccountSession, ContinueAction, Lead, OnboardingData, OnboardingStep};
use crate::storage::Storage;

use super::navigator::StepNavigator;
use super::submission::SubmissionAdapter;
use super::validator;

/// Result of pressing "continue"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueOutcome {
    /// The step is incomplete; nothing happened
    Blocked,
    /// A submission is already running
    Busy,
    /// Moved to the given step
    Advanced(OnboardingStep),
    /// The submission failed; see `error()`
    Failed,
    /// The account was created but the backend wants the email confirmed
    /// before it issues a session; the lead is kept at signup
    ConfirmationPending,
    /// Onboarding is complete
    Finished,
}

/// The onboarding state machine
pub struct OnboardingWizard<B> {
    navigator: StepNavigator,
    data: OnboardingData,
    rules: OnboardingRules,
    adapter: SubmissionAdapter<B>,
    session: Option<AccountSession>,
    lead: Lead,
    storage: Option<Storage>,
    error: Option<String>,
    submitting: bool,
}

impl<B: OnboardingBackend> OnboardingWizard<B> {
    /// Start a fresh onboarding at the signup step
    pub fn new(backend: B, rules: OnboardingRules) -> Self {
        Self {
            navigator: StepNavigator::new(),
            data: OnboardingData::default(),
            rules,
            adapter: SubmissionAdapter::new(backend),
            session: None,
            lead: Lead::new(),
            storage: None,
            error: None,
            submitting: false,
        }
    }

    /// Continue an interrupted onboarding
    ///
    /// Steps after signup need the account created earlier, so without a
    /// matching signed-in session the wizard goes back to signup, keeping
    /// the answers. A session still waiting for email confirmation is kept
    /// but also parks the wizard at signup. A lead that already reached
    /// confirmation starts over.
    pub fn resume(
        backend: B,
        rules: OnboardingRules,
        lead: Lead,
        session: Option<AccountSession>,
    ) -> Self {
        let mut wizard = Self::new(backend, rules);

        if lead.current_step == OnboardingStep::Confirmation {
            return wizard;
        }

        let session = session.filter(|s| lead.account_id == Some(s.account_id));
        let step = match &session {
            Some(s) if s.is_authenticated() => lead.current_step,
            Some(_) => OnboardingStep::Signup,
            None if lead.is_past_signup() => OnboardingStep::Signup,
            None => lead.current_step,
        };

        debug!(lead = %lead.id, step = step.key(), "resuming onboarding");
        wizard.navigator.go_to(step);
        wizard.data = lead.snapshot.clone();
        wizard.lead = lead;
        wizard.session = session;
        wizard
    }

    /// Persist the lead and session through this storage
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Journal successful submissions
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.adapter = self.adapter.with_audit(audit);
        self
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.navigator.current()
    }

    pub fn step_index(&self) -> usize {
        self.navigator.index()
    }

    pub fn step_count(&self) -> usize {
        self.navigator.len()
    }

    pub fn progress(&self) -> f64 {
        self.navigator.progress()
    }

    pub fn data(&self) -> &OnboardingData {
        &self.data
    }

    pub fn rules(&self) -> &OnboardingRules {
        &self.rules
    }

    pub fn session(&self) -> Option<&AccountSession> {
        self.session.as_ref()
    }

    pub fn lead(&self) -> &Lead {
        &self.lead
    }

    /// User-facing message from the last failed submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_finished(&self) -> bool {
        self.current_step() == OnboardingStep::Confirmation
    }

    /// Whether the account exists but has no usable session yet
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_authenticated())
    }

    /// Signup answers are settled once the account exists
    fn account_created(&self) -> bool {
        self.current_step() == OnboardingStep::Signup && self.session.is_some()
    }

    /// Whether the continue control is enabled
    pub fn can_continue(&self) -> bool {
        if self.submitting {
            return false;
        }
        self.account_created()
            || validator::can_continue(self.current_step(), &self.data, &self.rules)
    }

    pub fn missing_requirements(&self) -> Vec<String> {
        if self.account_created() {
            return Vec::new();
        }
        validator::missing_requirements(self.current_step(), &self.data, &self.rules)
    }

    /// Whether the back control is enabled
    ///
    /// Disabled on the first step, and on confirmation since the answers
    /// are gone by then.
    pub fn can_go_back(&self) -> bool {
        !self.navigator.is_first() && !self.is_finished() && !self.submitting
    }

    /// Mutate the answers; clears any displayed error
    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut OnboardingData),
    {
        f(&mut self.data);
        self.error = None;
    }

    /// Go to the previous step without discarding anything
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() || !self.navigator.previous() {
            return false;
        }
        self.error = None;
        self.save_lead();
        true
    }

    /// Press "continue" on the current step
    pub async fn continue_step(&mut self) -> ContinueOutcome {
        if self.submitting {
            return ContinueOutcome::Busy;
        }
        if !self.can_continue() {
            return ContinueOutcome::Blocked;
        }

        match self.current_step().continue_action() {
            ContinueAction::Advance => self.advance(),
            ContinueAction::CreateAccount => self.create_account().await,
            ContinueAction::SavePreferences => self.save_preferences().await,
            ContinueAction::Finish => ContinueOutcome::Finished,
        }
    }

    fn advance(&mut self) -> ContinueOutcome {
        self.navigator.next();
        self.error = None;

        if self.is_finished() {
            self.complete();
        } else {
            self.save_lead();
        }
        ContinueOutcome::Advanced(self.current_step())
    }

    async fn create_account(&mut self) -> ContinueOutcome {
        // The account exists already when the user came back to signup
        if self.is_awaiting_confirmation() {
            return ContinueOutcome::ConfirmationPending;
        }
        if self.session.is_some() {
            return self.advance();
        }

        self.submitting = true;
        let result = self.adapter.submit_account_creation(&mut self.data).await;
        self.submitting = false;

        match result {
            Ok(session) => {
                if let Some(storage) = &self.storage {
                    if let Err(err) = storage.session.save(&session) {
                        warn!(error = %err, "failed to store session");
                    }
                }
                self.lead.account_id = Some(session.account_id);
                let authenticated = session.is_authenticated();
                self.session = Some(session);
                if !authenticated {
                    debug!(lead = %self.lead.id, "account created, email confirmation pending");
                    self.save_lead();
                    return ContinueOutcome::ConfirmationPending;
                }
                self.advance()
            }
            Err(err) => self.fail(err),
        }
    }

    async fn save_preferences(&mut self) -> ContinueOutcome {
        let Some(session) = self.session.clone().filter(|s| s.is_authenticated()) else {
            return self.fail(ForklyError::NotSignedIn);
        };

        self.submitting = true;
        let result = self.adapter.submit_preferences(&session, &self.data).await;
        self.submitting = false;

        match result {
            Ok(()) => self.advance(),
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: ForklyError) -> ContinueOutcome {
        warn!(step = self.current_step().key(), error = %err, "onboarding submission failed");
        self.error = Some(err.user_message());
        ContinueOutcome::Failed
    }

    /// Drop the answers and the lead once confirmation is reached
    fn complete(&mut self) {
        self.data = OnboardingData::default();
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.lead.clear() {
                warn!(error = %err, "failed to remove onboarding lead");
            }
        }
    }

    fn save_lead(&mut self) {
        let step = self.current_step();
        let account_id = self.session.as_ref().map(|s| s.account_id);
        self.lead.record(step, account_id, &self.data);

        if let Some(storage) = &self.storage {
            if let Err(err) = storage.lead.save(&self.lead) {
                warn!(error = %err, "failed to save onboarding lead");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{signed_in, Failure, FakeBackend};
    use crate::config::ForklyPaths;
    use crate::models::{
        DecisionStyle, DietaryRestriction, Frequency, Occasion, Password, PlaceType,
    };
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn wizard(backend: &Arc<FakeBackend>) -> OnboardingWizard<Arc<FakeBackend>> {
        OnboardingWizard::new(Arc::clone(backend), OnboardingRules::default())
    }

    fn fill_signup(wizard: &mut OnboardingWizard<Arc<FakeBackend>>) {
        wizard.edit(|d| {
            d.signup.first_name = "Ana".into();
            d.signup.set_username("ana99");
            d.signup.email = "a@b.com".into();
            d.signup.password = Password::new("12345678");
        });
    }

    /// Answer the current step so it can continue
    fn fill_current(wizard: &mut OnboardingWizard<Arc<FakeBackend>>) {
        match wizard.current_step() {
            OnboardingStep::Signup => fill_signup(wizard),
            OnboardingStep::Profile => wizard.edit(|d| {
                d.profile.birth_date = NaiveDate::from_ymd_opt(1994, 2, 3);
                d.profile.city = "São Paulo".into();
                d.profile.neighborhood = "Pinheiros".into();
            }),
            OnboardingStep::Occasions => wizard.edit(|d| {
                d.taste
                    .occasions
                    .extend([Occasion::Brunch, Occasion::DateNight, Occasion::QuickBite]);
            }),
            OnboardingStep::Style => wizard.edit(|d| {
                d.style.frequency = Some(Frequency::Weekly);
                d.style.place_types.insert(PlaceType::Bar);
                d.style.decision_style.insert(DecisionStyle::Friends);
            }),
            OnboardingStep::Restrictions => {
                wizard.edit(|d| d.restrictions.toggle(DietaryRestriction::Vegetarian))
            }
            OnboardingStep::Cuisines | OnboardingStep::Summary | OnboardingStep::Confirmation => {}
        }
    }

    async fn run_to(wizard: &mut OnboardingWizard<Arc<FakeBackend>>, target: OnboardingStep) {
        while wizard.current_step() != target {
            fill_current(wizard);
            let outcome = wizard.continue_step().await;
            assert!(
                matches!(outcome, ContinueOutcome::Advanced(_)),
                "stuck at {:?}: {:?}",
                wizard.current_step(),
                wizard.error()
            );
        }
    }

    #[tokio::test]
    async fn test_incomplete_step_is_blocked() {
        let backend = Arc::new(FakeBackend::new());
        let mut wizard = wizard(&backend);

        assert!(!wizard.can_continue());
        assert_eq!(wizard.continue_step().await, ContinueOutcome::Blocked);
        assert_eq!(wizard.current_step(), OnboardingStep::Signup);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_full_run_reaches_confirmation() {
        let backend = Arc::new(FakeBackend::new());
        let mut wizard = wizard(&backend);

        run_to(&mut wizard, OnboardingStep::Confirmation).await;

        assert!(wizard.is_finished());
        assert!(wizard.session().is_some());
        assert_eq!(backend.call_count("create_account"), 1);
        assert_eq!(backend.call_count("save_preferences"), 1);

        let bundle = &backend.saved_bundles()[0].1;
        assert_eq!(bundle.city, "São Paulo");
        assert_eq!(bundle.dietary_restrictions, vec!["vegetarian"]);

        // Answers are dropped at confirmation
        assert!(wizard.data().profile.city.is_empty());
        assert_eq!(wizard.continue_step().await, ContinueOutcome::Finished);
    }

    #[tokio::test]
    async fn test_duplicate_username_stays_on_signup() {
        let backend = Arc::new(FakeBackend::new());
        backend.take_username("ana99");
        let mut wizard = wizard(&backend);
        fill_signup(&mut wizard);

        assert_eq!(wizard.continue_step().await, ContinueOutcome::Failed);
        assert_eq!(wizard.current_step(), OnboardingStep::Signup);
        assert!(wizard.error().unwrap().contains("already taken"));
        assert!(wizard.session().is_none());

        wizard.edit(|d| d.signup.set_username("ana_100"));
        assert!(wizard.error().is_none());
        assert_eq!(
            wizard.continue_step().await,
            ContinueOutcome::Advanced(OnboardingStep::Profile)
        );
    }

    #[tokio::test]
    async fn test_preference_failure_then_retry() {
        let backend = Arc::new(FakeBackend::new());
        let mut wizard = wizard(&backend);
        run_to(&mut wizard, OnboardingStep::Summary).await;

        backend.fail("save_preferences", Failure::Backend(500, "database unavailable"));
        assert_eq!(wizard.continue_step().await, ContinueOutcome::Failed);
        assert_eq!(wizard.current_step(), OnboardingStep::Summary);
        assert!(wizard.error().unwrap().contains("database unavailable"));

        backend.recover("save_preferences");
        assert_eq!(
            wizard.continue_step().await,
            ContinueOutcome::Advanced(OnboardingStep::Confirmation)
        );
        assert!(wizard.error().is_none());
    }

    #[tokio::test]
    async fn test_back_keeps_answers_and_makes_no_calls() {
        let backend = Arc::new(FakeBackend::new());
        let mut wizard = wizard(&backend);
        run_to(&mut wizard, OnboardingStep::Occasions).await;
        let calls_before = backend.calls().len();

        assert!(wizard.back());
        assert_eq!(wizard.current_step(), OnboardingStep::Cuisines);
        assert!(wizard.back());
        assert_eq!(wizard.current_step(), OnboardingStep::Profile);
        assert_eq!(wizard.data().profile.neighborhood, "Pinheiros");
        assert_eq!(backend.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_back_to_signup_continues_without_password() {
        let backend = Arc::new(FakeBackend::new());
        let mut wizard = wizard(&backend);
        run_to(&mut wizard, OnboardingStep::Profile).await;

        assert!(wizard.back());
        assert_eq!(wizard.current_step(), OnboardingStep::Signup);
        assert!(wizard.data().signup.password.is_empty());
        assert!(wizard.can_continue());
        assert!(wizard.missing_requirements().is_empty());
        assert_eq!(
            wizard.continue_step().await,
            ContinueOutcome::Advanced(OnboardingStep::Profile)
        );
        assert_eq!(backend.call_count("create_account"), 1);
    }

    #[tokio::test]
    async fn test_unconfirmed_account_parks_at_signup() {
        let backend = Arc::new(FakeBackend::new());
        backend.require_email_confirmation();
        let mut wizard = wizard(&backend);
        fill_signup(&mut wizard);

        assert_eq!(
            wizard.continue_step().await,
            ContinueOutcome::ConfirmationPending
        );
        assert_eq!(wizard.current_step(), OnboardingStep::Signup);
        assert!(wizard.is_awaiting_confirmation());
        assert!(wizard.error().is_none());
        assert!(wizard.lead().account_id.is_some());

        // Pressing continue again neither recreates the account nor moves on
        assert_eq!(
            wizard.continue_step().await,
            ContinueOutcome::ConfirmationPending
        );
        assert_eq!(backend.call_count("create_account"), 1);
        assert_eq!(backend.call_count("save_preferences"), 0);
    }

    #[tokio::test]
    async fn test_unconfirmed_account_is_stored_for_resume() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ForklyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let backend = Arc::new(FakeBackend::new());
        backend.require_email_confirmation();
        let mut wizard = wizard(&backend).with_storage(Storage::new(paths.clone()).unwrap());
        fill_signup(&mut wizard);
        wizard.continue_step().await;

        let storage = Storage::new(paths).unwrap();
        let lead = storage.lead.load().unwrap().unwrap();
        let session = storage.session.load().unwrap();
        assert!(storage.require_session().is_err());

        let mut resumed = OnboardingWizard::resume(
            Arc::clone(&backend),
            OnboardingRules::default(),
            lead,
            session,
        );
        assert_eq!(resumed.current_step(), OnboardingStep::Signup);
        assert!(resumed.is_awaiting_confirmation());
        assert_eq!(
            resumed.continue_step().await,
            ContinueOutcome::ConfirmationPending
        );
        assert_eq!(backend.call_count("create_account"), 1);
    }

    #[tokio::test]
    async fn test_back_disabled_at_edges() {
        let backend = Arc::new(FakeBackend::new());
        let mut wizard = wizard(&backend);
        assert!(!wizard.back());

        run_to(&mut wizard, OnboardingStep::Confirmation).await;
        assert!(!wizard.can_go_back());
        assert!(!wizard.back());
        assert_eq!(wizard.current_step(), OnboardingStep::Confirmation);
    }

    #[tokio::test]
    async fn test_password_cleared_after_account_creation() {
        let backend = Arc::new(FakeBackend::new());
        let mut wizard = wizard(&backend);
        run_to(&mut wizard, OnboardingStep::Profile).await;
        assert!(wizard.data().signup.password.is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_message() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail("username_exists", Failure::Network);
        let mut wizard = wizard(&backend);
        fill_signup(&mut wizard);

        assert_eq!(wizard.continue_step().await, ContinueOutcome::Failed);
        assert!(wizard.error().unwrap().contains("couldn't reach the server"));
    }

    #[tokio::test]
    async fn test_lead_and_session_are_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ForklyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let backend = Arc::new(FakeBackend::new());
        let mut wizard = wizard(&backend).with_storage(Storage::new(paths.clone()).unwrap());

        run_to(&mut wizard, OnboardingStep::Occasions).await;

        let storage = Storage::new(paths).unwrap();
        let lead = storage.lead.load().unwrap().unwrap();
        assert_eq!(lead.current_step, OnboardingStep::Occasions);
        assert_eq!(lead.snapshot.profile.city, "São Paulo");
        assert!(storage.require_session().is_ok());

        run_to(&mut wizard, OnboardingStep::Confirmation).await;
        assert!(storage.lead.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resume_with_session_continues_at_lead_step() {
        let backend = Arc::new(FakeBackend::new());
        let session = signed_in("ana99");
        let mut lead = Lead::new();
        let mut data = OnboardingData::default();
        data.profile.city = "Recife".into();
        lead.record(OnboardingStep::Style, Some(session.account_id), &data);

        let wizard = OnboardingWizard::resume(
            Arc::clone(&backend),
            OnboardingRules::default(),
            lead,
            Some(session),
        );

        assert_eq!(wizard.current_step(), OnboardingStep::Style);
        assert_eq!(wizard.data().profile.city, "Recife");
        assert!(wizard.session().is_some());
    }

    #[tokio::test]
    async fn test_resume_at_signup_with_account_continues() {
        let backend = Arc::new(FakeBackend::new());
        let session = signed_in("ana99");
        let mut lead = Lead::new();
        let mut data = OnboardingData::default();
        data.signup.first_name = "Ana".into();
        data.signup.set_username("ana99");
        data.signup.email = "ana99@example.com".into();
        lead.record(OnboardingStep::Signup, Some(session.account_id), &data);

        let mut wizard = OnboardingWizard::resume(
            Arc::clone(&backend),
            OnboardingRules::default(),
            lead,
            Some(session),
        );

        assert_eq!(wizard.current_step(), OnboardingStep::Signup);
        assert_eq!(
            wizard.continue_step().await,
            ContinueOutcome::Advanced(OnboardingStep::Profile)
        );
        assert_eq!(backend.call_count("create_account"), 0);
    }

    #[tokio::test]
    async fn test_resume_without_session_restarts_at_signup() {
        let backend = Arc::new(FakeBackend::new());
        let mut lead = Lead::new();
        let mut data = OnboardingData::default();
        data.signup.first_name = "Ana".into();
        lead.record(
            OnboardingStep::Style,
            Some(crate::models::AccountId::new()),
            &data,
        );

        let wizard =
            OnboardingWizard::resume(Arc::clone(&backend), OnboardingRules::default(), lead, None);

        assert_eq!(wizard.current_step(), OnboardingStep::Signup);
        assert_eq!(wizard.data().signup.first_name, "Ana");
    }

    #[tokio::test]
    async fn test_resume_ignores_session_of_other_account() {
        let backend = Arc::new(FakeBackend::new());
        let mut lead = Lead::new();
        lead.record(
            OnboardingStep::Summary,
            Some(crate::models::AccountId::new()),
            &OnboardingData::default(),
        );

        let wizard = OnboardingWizard::resume(
            Arc::clone(&backend),
            OnboardingRules::default(),
            lead,
            Some(signed_in("someone_else")),
        );
        assert_eq!(wizard.current_step(), OnboardingStep::Signup);
        assert!(wizard.session().is_none());
    }
}
