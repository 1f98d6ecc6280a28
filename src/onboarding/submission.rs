//! Remote checkpoints of the onboarding flow
//!
//! Two writes happen during onboarding: the account after the signup step
//! and the profile plus preference bundle after the summary step. Backend
//! errors are reclassified here into the onboarding error kinds; an
//! unreachable backend stays `Network` so the front end can say so.

use tracing::{debug, info};

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::backend::{NewAccount, OnboardingBackend};
use crate::error::{ForklyError, ForklyResult};
use crate::models::{AccountSession, OnboardingData, PreferenceBundle};

/// Submits onboarding checkpoints to the backend
pub struct SubmissionAdapter<B> {
    backend: B,
    audit: Option<AuditLogger>,
}

impl<B: OnboardingBackend> SubmissionAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            audit: None,
        }
    }

    /// Journal successful submissions
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create the account from the signup answers
    ///
    /// Checks username uniqueness first. On success the password is wiped
    /// from `data`.
    pub async fn submit_account_creation(
        &self,
        data: &mut OnboardingData,
    ) -> ForklyResult<AccountSession> {
        let signup = &data.signup;
        debug!(username = %signup.username, "submitting account creation");

        let taken = self
            .backend
            .username_exists(&signup.username)
            .await
            .map_err(as_account_creation)?;
        if taken {
            return Err(ForklyError::DuplicateUsername(
                signup.username.as_str().to_string(),
            ));
        }

        let session = self
            .backend
            .create_account(NewAccount {
                email: signup.email.trim(),
                password: &signup.password,
                username: &signup.username,
                full_name: signup.first_name.trim(),
            })
            .await
            .map_err(as_account_creation)?;

        data.signup.password.clear();
        info!(account = %session.account_id, username = %session.username, "account created");

        if let Some(audit) = &self.audit {
            audit.record(
                AuditEntry::new(
                    Operation::Create,
                    EntityType::Account,
                    session.account_id.to_string(),
                )
                .named(session.username.as_str())
                .by(session.account_id),
            );
        }

        Ok(session)
    }

    /// Persist profile fields and preferences for the account
    ///
    /// An upsert keyed by account: submitting again overwrites.
    pub async fn submit_preferences(
        &self,
        session: &AccountSession,
        data: &OnboardingData,
    ) -> ForklyResult<()> {
        let bundle = PreferenceBundle::from_data(data);
        debug!(account = %session.account_id, "submitting preferences");

        self.backend
            .save_preferences(session, &bundle)
            .await
            .map_err(as_persistence)?;

        info!(account = %session.account_id, "preferences saved");
        if let Some(audit) = &self.audit {
            audit.record(
                AuditEntry::new(
                    Operation::Update,
                    EntityType::Preferences,
                    session.account_id.to_string(),
                )
                .named(session.username.as_str())
                .by(session.account_id)
                .with_details(&bundle),
            );
        }

        Ok(())
    }
}

fn as_account_creation(err: ForklyError) -> ForklyError {
    match err {
        ForklyError::Network(_) | ForklyError::DuplicateUsername(_) => err,
        ForklyError::Backend { message, .. } => ForklyError::AccountCreation(message),
        other => ForklyError::AccountCreation(other.to_string()),
    }
}

fn as_persistence(err: ForklyError) -> ForklyError {
    match err {
        ForklyError::Network(_) => err,
        ForklyError::Backend { message, .. } => ForklyError::Persistence(message),
        other => ForklyError::Persistence(other.to_string()),
    }
}
