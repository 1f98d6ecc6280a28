//! Onboarding lead
//!
//! A lead tracks an onboarding session before and while it runs, so an
//! interrupted wizard can pick up where it stopped. The snapshot is the
//! answer aggregate minus the password, which is never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, LeadId};
use super::onboarding::{OnboardingData, OnboardingStep};

/// An in-progress onboarding session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub current_step: OnboardingStep,
    /// Set once the signup step has created the account
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub snapshot: OnboardingData,
}

impl Lead {
    /// Start a new lead at the first step
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: LeadId::new(),
            started_at: now,
            updated_at: now,
            current_step: OnboardingStep::Signup,
            account_id: None,
            snapshot: OnboardingData::default(),
        }
    }

    /// Record progress
    pub fn record(
        &mut self,
        step: OnboardingStep,
        account_id: Option<AccountId>,
        data: &OnboardingData,
    ) {
        self.current_step = step;
        self.account_id = account_id.or(self.account_id);
        self.snapshot = data.clone();
        self.updated_at = Utc::now();
    }

    /// Whether the account was already created in this session
    pub fn is_past_signup(&self) -> bool {
        self.account_id.is_some() && self.current_step != OnboardingStep::Signup
    }
}

impl Default for Lead {
    fn default() -> Self {
        Self::new()
    }
}
