//! Onboarding, session and journal display formatting

use std::collections::BTreeSet;

use crate::audit::AuditEntry;
use crate::models::{AccountSession, OnboardingData};

fn labels<T, F>(items: &BTreeSet<T>, label: F) -> String
where
    F: Fn(&T) -> &'static str,
{
    if items.is_empty() {
        return "-".to_string();
    }
    items.iter().map(label).collect::<Vec<_>>().join(", ")
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// Format the answers for the summary step
pub fn format_summary(data: &OnboardingData) -> String {
    let profile = &data.profile;
    let style = &data.style;

    let mut output = String::new();
    output.push_str("Account\n");
    output.push_str(&format!("  Name:          {}\n", or_dash(&data.signup.first_name)));
    output.push_str(&format!("  Username:      @{}\n", data.signup.username));
    output.push_str(&format!("  Email:         {}\n", or_dash(&data.signup.email)));
    output.push('\n');

    output.push_str("Profile\n");
    output.push_str(&format!(
        "  Birth date:    {}\n",
        profile
            .birth_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!(
        "  Gender:        {}\n",
        profile.gender.map(|g| g.label()).unwrap_or("-")
    ));
    output.push_str(&format!(
        "  Location:      {}, {}\n",
        or_dash(&profile.neighborhood),
        or_dash(&profile.city)
    ));
    if let Some(coords) = profile.coordinates {
        output.push_str(&format!(
            "  Coordinates:   {:.4}, {:.4}\n",
            coords.latitude, coords.longitude
        ));
    }
    output.push('\n');

    output.push_str("Preferences\n");
    let cuisines = if data.taste.disliked_cuisines.is_empty() {
        "-".to_string()
    } else {
        data.taste
            .disliked_cuisines
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };
    output.push_str(&format!("  Skip:          {}\n", cuisines));
    output.push_str(&format!(
        "  Occasions:     {}\n",
        labels(&data.taste.occasions, |o| o.label())
    ));
    output.push_str(&format!(
        "  Eats out:      {}\n",
        style.frequency.map(|f| f.label()).unwrap_or("-")
    ));
    output.push_str(&format!(
        "  Places:        {}\n",
        labels(&style.place_types, |p| p.label())
    ));
    output.push_str(&format!(
        "  Decides by:    {}\n",
        labels(&style.decision_style, |d| d.label())
    ));
    output.push_str(&format!("  Dietary:       {}\n", data.restrictions));
    output.push_str(&format!(
        "  Notifications: {}\n",
        if data.consents.notifications_enabled {
            "on"
        } else {
            "off"
        }
    ));
    output.push_str(&format!(
        "  Beta program:  {}\n",
        if data.consents.beta_tester { "yes" } else { "no" }
    ));

    output
}

/// Format the signed-in session
pub fn format_session(session: &AccountSession) -> String {
    let mut output = String::new();
    output.push_str(&format!("Signed in as @{}\n", session.username));
    output.push_str(&format!("  Email:      {}\n", session.email));
    output.push_str(&format!("  Account ID: {}\n", session.account_id.as_uuid()));
    output.push_str(&format!(
        "  Since:      {}\n",
        session.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if !session.is_authenticated() {
        output.push_str("  Status:     waiting for email confirmation\n");
    }
    output
}

/// Format journal entries, one per line
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No activity recorded yet.\n".to_string();
    }
    entries
        .iter()
        .map(|e| format!("{}\n", e.format_human_readable()))
        .collect()
}
