//! Per-step completion rules
//!
//! Validation never produces an error value. A step is either complete or
//! not, and [`missing_requirements`] lists what is still needed in words a
//! front end can show next to the disabled continue control.

use crate::config::OnboardingRules;
use crate::models::{OnboardingData, OnboardingStep, SelectionBounds};

const MIN_FIRST_NAME_LEN: usize = 3;
const MIN_PLACE_NAME_LEN: usize = 2;

struct Requirement {
    met: bool,
    description: String,
}

fn require(met: bool, description: impl Into<String>) -> Requirement {
    Requirement {
        met,
        description: description.into(),
    }
}

fn within(bounds: SelectionBounds, count: usize, what: &str) -> Requirement {
    require(
        bounds.contains(count),
        format!("Pick {} {} (currently {})", bounds, what, count),
    )
}

fn char_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// Loose shape check; the backend does the real verification
fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    email.contains('@') && email.contains('.')
}

fn requirements(
    step: OnboardingStep,
    data: &OnboardingData,
    rules: &OnboardingRules,
) -> Vec<Requirement> {
    match step {
        OnboardingStep::Signup => {
            let signup = &data.signup;
            vec![
                require(
                    char_len(&signup.first_name) >= MIN_FIRST_NAME_LEN,
                    format!("First name needs at least {} characters", MIN_FIRST_NAME_LEN),
                ),
                require(
                    signup.username.is_well_formed(),
                    "Username may only use lowercase letters, digits, '.' and '_'",
                ),
                require(looks_like_email(&signup.email), "Enter a valid email address"),
                require(
                    signup.password.len() >= rules.password_min_length,
                    format!(
                        "Password needs at least {} characters",
                        rules.password_min_length
                    ),
                ),
            ]
        }
        OnboardingStep::Profile => {
            let profile = &data.profile;
            vec![
                require(profile.birth_date.is_some(), "Enter your birth date"),
                require(
                    char_len(&profile.city) >= MIN_PLACE_NAME_LEN,
                    "Enter your city",
                ),
                require(
                    char_len(&profile.neighborhood) >= MIN_PLACE_NAME_LEN,
                    "Enter your neighborhood",
                ),
            ]
        }
        OnboardingStep::Occasions => vec![within(
            rules.occasions,
            data.taste.occasions.len(),
            "occasions",
        )],
        OnboardingStep::Style => {
            let style = &data.style;
            vec![
                require(style.frequency.is_some(), "Choose how often you eat out"),
                within(rules.place_types, style.place_types.len(), "place types"),
                within(
                    rules.decision_style,
                    style.decision_style.len(),
                    "decision factors",
                ),
            ]
        }
        OnboardingStep::Restrictions => vec![require(
            data.restrictions.is_answered(),
            "Choose your dietary restrictions, or 'No restrictions'",
        )],
        OnboardingStep::Cuisines | OnboardingStep::Summary | OnboardingStep::Confirmation => {
            Vec::new()
        }
    }
}

/// Whether the step's answers allow moving forward
pub fn can_continue(step: OnboardingStep, data: &OnboardingData, rules: &OnboardingRules) -> bool {
    requirements(step, data, rules).iter().all(|r| r.met)
}

/// Human-readable list of what the step still needs
pub fn missing_requirements(
    step: OnboardingStep,
    data: &OnboardingData,
    rules: &OnboardingRules,
) -> Vec<String> {
    requirements(step, data, rules)
        .into_iter()
        .filter(|r| !r.met)
        .map(|r| r.description)
        .collect()
}
