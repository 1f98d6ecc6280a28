//! Onboarding steps and the answers collected along the way
//!
//! Answers live in one closed aggregate, [`OnboardingData`], made of a
//! structure per step. Nothing outside these fields can be stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::password::Password;
use super::preferences::{
    keys, DecisionStyle, DietarySelection, Frequency, Gender, Occasion, PlaceType,
};
use super::username::Username;

/// One screen of the onboarding sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Signup,
    Profile,
    Cuisines,
    Occasions,
    Style,
    Restrictions,
    Summary,
    Confirmation,
}

/// What pressing "continue" does on a given step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueAction {
    /// Move to the next step locally
    Advance,
    /// Create the account, then advance on success
    CreateAccount,
    /// Persist profile and preferences, then advance on success
    SavePreferences,
    /// Onboarding is over
    Finish,
}

impl OnboardingStep {
    /// The canonical step sequence
    pub const SEQUENCE: [Self; 8] = [
        Self::Signup,
        Self::Profile,
        Self::Cuisines,
        Self::Occasions,
        Self::Style,
        Self::Restrictions,
        Self::Summary,
        Self::Confirmation,
    ];

    /// Stable key used in the lead record
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Profile => "profile",
            Self::Cuisines => "cuisines",
            Self::Occasions => "occasions",
            Self::Style => "style",
            Self::Restrictions => "restrictions",
            Self::Summary => "summary",
            Self::Confirmation => "confirmation",
        }
    }

    /// Screen title
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Signup => "Create your account",
            Self::Profile => "About you",
            Self::Cuisines => "Cuisines you'd rather skip",
            Self::Occasions => "When do you eat out?",
            Self::Style => "Your dining style",
            Self::Restrictions => "Dietary restrictions",
            Self::Summary => "Review your answers",
            Self::Confirmation => "You're all set",
        }
    }

    /// The continue handler for this step
    pub const fn continue_action(&self) -> ContinueAction {
        match self {
            Self::Signup => ContinueAction::CreateAccount,
            Self::Summary => ContinueAction::SavePreferences,
            Self::Confirmation => ContinueAction::Finish,
            Self::Profile
            | Self::Cuisines
            | Self::Occasions
            | Self::Style
            | Self::Restrictions => ContinueAction::Advance,
        }
    }

    /// Parse a step from its key
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::SEQUENCE.iter().copied().find(|step| step.key() == wanted)
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and in range
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Answers from the signup step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupDetails {
    pub first_name: String,
    pub username: Username,
    pub email: String,
    /// Never serialized; wiped once the account exists
    #[serde(skip)]
    pub password: Password,
}

impl SignupDetails {
    /// Replace the username, normalizing the raw input
    pub fn set_username(&mut self, raw: &str) {
        self.username = Username::normalize(raw);
    }
}

/// Answers from the profile step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub city: String,
    pub neighborhood: String,
    pub coordinates: Option<Coordinates>,
    pub location_permission: bool,
}

/// Answers from the cuisines and occasions steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TastePreferences {
    /// Cuisine identifiers the user doesn't want suggested
    pub disliked_cuisines: BTreeSet<String>,
    pub occasions: BTreeSet<Occasion>,
}

/// Answers from the style step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleChoices {
    pub frequency: Option<Frequency>,
    pub place_types: BTreeSet<PlaceType>,
    pub decision_style: BTreeSet<DecisionStyle>,
}

/// Notification and beta-program consent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consents {
    pub notifications_enabled: bool,
    pub beta_tester: bool,
}

impl Default for Consents {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            beta_tester: false,
        }
    }
}

/// Every answer collected by the onboarding wizard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingData {
    #[serde(default)]
    pub signup: SignupDetails,
    #[serde(default)]
    pub profile: ProfileDetails,
    #[serde(default)]
    pub taste: TastePreferences,
    #[serde(default)]
    pub style: StyleChoices,
    #[serde(default)]
    pub restrictions: DietarySelection,
    #[serde(default)]
    pub consents: Consents,
}

/// Profile fields and preferences as persisted after the summary step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceBundle {
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub city: String,
    pub neighborhood: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_permission: bool,
    pub disliked_cuisines: Vec<String>,
    pub occasions: Vec<String>,
    pub frequency: Option<String>,
    pub place_types: Vec<String>,
    pub decision_style: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub notifications_enabled: bool,
    pub beta_tester: bool,
}

impl PreferenceBundle {
    /// Build the bundle from the collected answers
    pub fn from_data(data: &OnboardingData) -> Self {
        let profile = &data.profile;
        Self {
            birth_date: profile.birth_date,
            gender: profile.gender.map(|g| g.key().to_string()),
            city: profile.city.trim().to_string(),
            neighborhood: profile.neighborhood.trim().to_string(),
            latitude: profile.coordinates.map(|c| c.latitude),
            longitude: profile.coordinates.map(|c| c.longitude),
            location_permission: profile.location_permission,
            disliked_cuisines: data.taste.disliked_cuisines.iter().cloned().collect(),
            occasions: keys(&data.taste.occasions, Occasion::key),
            frequency: data.style.frequency.map(|f| f.key().to_string()),
            place_types: keys(&data.style.place_types, PlaceType::key),
            decision_style: keys(&data.style.decision_style, DecisionStyle::key),
            dietary_restrictions: data.restrictions.to_keys(),
            notifications_enabled: data.consents.notifications_enabled,
            beta_tester: data.consents.beta_tester,
        }
    }
}
