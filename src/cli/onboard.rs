//! Interactive onboarding command
//!
//! Drives [`OnboardingWizard`] from the terminal: one prompt block per
//! step, `back` or `:back` at any prompt to return to the previous step.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Args;

use crate::audit::AuditLogger;
use crate::backend::OnboardingBackend;
use crate::config::{ForklyPaths, Settings};
use crate::display::format_summary;
use crate::error::ForklyResult;
use crate::models::{
    Coordinates, DecisionStyle, DietaryRestriction, DietarySelection, Frequency, Gender, Occasion,
    OnboardingStep, Password, PlaceType, Username,
};
use crate::onboarding::{Availability, ContinueOutcome, OnboardingWizard, UsernameChecker};
use crate::storage::Storage;

use super::prompt::{
    parse_choice_numbers, print_menu, prompt, prompt_secret, prompt_with_default, prompt_yes_no,
    single_choice, toggle_menu, Input,
};

/// Cuisine identifiers offered on the cuisines step
const CUISINES: &[&str] = &[
    "brazilian",
    "italian",
    "japanese",
    "chinese",
    "mexican",
    "indian",
    "thai",
    "arabic",
    "french",
    "peruvian",
    "korean",
    "vegan",
    "seafood",
    "steakhouse",
    "burgers",
    "pizza",
];

/// Arguments of `forkly onboard`
#[derive(Args, Debug, Default)]
pub struct OnboardArgs {
    /// Discard any unfinished onboarding and start over
    #[arg(long)]
    pub restart: bool,
}

enum Nav {
    Continue,
    Back,
}

type Wizard<B> = OnboardingWizard<Arc<B>>;

/// Run the interactive onboarding
pub async fn handle_onboard_command<B: OnboardingBackend + 'static>(
    backend: Arc<B>,
    paths: &ForklyPaths,
    settings: &Settings,
    args: OnboardArgs,
) -> ForklyResult<()> {
    let storage = Storage::new(paths.clone())?;
    let audit = AuditLogger::new(paths.audit_log());
    let rules = settings.onboarding;

    let lead = if args.restart {
        storage.lead.clear()?;
        None
    } else {
        storage.lead.load()?
    };

    if lead.is_none() && settings.onboarding_completed && !args.restart {
        println!("Onboarding is already complete.");
        println!("Run 'forkly onboard --restart' to go through it again.");
        return Ok(());
    }

    let checker = UsernameChecker::new(
        Arc::clone(&backend),
        Duration::from_millis(rules.username_check_debounce_ms),
    );

    let mut wizard = match lead {
        Some(lead) => {
            let session = storage.session.load()?;
            let wizard = OnboardingWizard::resume(Arc::clone(&backend), rules, lead, session);
            println!("Picking up where you left off.");
            wizard
        }
        None => OnboardingWizard::new(Arc::clone(&backend), rules),
    }
    .with_storage(storage)
    .with_audit(audit);

    println!();
    println!("Welcome to Forkly!");
    println!("Type 'back' at any prompt to return to the previous step.");

    loop {
        let step = wizard.current_step();
        println!();
        println!(
            "Step {}/{}: {}",
            wizard.step_index() + 1,
            wizard.step_count(),
            step.title()
        );
        println!("{}", "=".repeat(40));
        if let Some(error) = wizard.error() {
            println!("! {}", error);
        }

        let nav = match step {
            OnboardingStep::Signup => signup_step(&mut wizard, &checker).await?,
            OnboardingStep::Profile => profile_step(&mut wizard)?,
            OnboardingStep::Cuisines => cuisines_step(&mut wizard)?,
            OnboardingStep::Occasions => occasions_step(&mut wizard)?,
            OnboardingStep::Style => style_step(&mut wizard)?,
            OnboardingStep::Restrictions => restrictions_step(&mut wizard)?,
            OnboardingStep::Summary => summary_step(&mut wizard)?,
            OnboardingStep::Confirmation => Nav::Continue,
        };

        if let Nav::Back = nav {
            if !wizard.back() {
                println!("There is no previous step.");
            }
            continue;
        }

        if wizard.is_finished() {
            break;
        }

        match wizard.continue_step().await {
            ContinueOutcome::Blocked => {
                println!();
                println!("Before continuing:");
                for requirement in wizard.missing_requirements() {
                    println!("  - {}", requirement);
                }
            }
            ContinueOutcome::Advanced(OnboardingStep::Confirmation) | ContinueOutcome::Finished => {
                break;
            }
            ContinueOutcome::ConfirmationPending => {
                if let Some(session) = wizard.session() {
                    println!();
                    println!("Account @{} was created.", session.username);
                    println!("Check {} to confirm your account.", session.email);
                }
                println!("Your onboarding answers are kept on this device in the meantime.");
                return Ok(());
            }
            ContinueOutcome::Advanced(_)
            | ContinueOutcome::Failed
            | ContinueOutcome::Busy => {}
        }
    }

    // Reload so command-line backend overrides are not persisted
    let mut stored = Settings::load_or_create(paths)?;
    stored.onboarding_completed = true;
    stored.save(paths)?;

    println!();
    println!("You're all set!");
    if let Some(session) = wizard.session() {
        println!("Signed in as @{}.", session.username);
    }
    println!();
    println!("Next steps:");
    println!("  - Run 'forkly nearby --lat <lat> --lng <lng>' to find restaurants");
    println!("  - Run 'forkly lists list' to see your saved lists");

    Ok(())
}

macro_rules! value_or_back {
    ($input:expr) => {
        match $input {
            Input::Back => return Ok(Nav::Back),
            Input::Value(value) => value,
        }
    };
}

async fn signup_step<B: OnboardingBackend + 'static>(
    wizard: &mut Wizard<B>,
    checker: &UsernameChecker<B>,
) -> ForklyResult<Nav> {
    if let Some(session) = wizard.session() {
        if session.is_authenticated() {
            println!("Account @{} is already created.", session.username);
        } else {
            println!("Account @{} is waiting for email confirmation.", session.username);
        }
        return Ok(Nav::Continue);
    }

    let signup = wizard.data().signup.clone();

    let first_name = value_or_back!(prompt_with_default("First name", &signup.first_name)?);
    wizard.edit(|d| d.signup.first_name = first_name);

    loop {
        let current = wizard.data().signup.username.to_string();
        let raw = value_or_back!(prompt_with_default("Username", &current)?);
        let username = Username::normalize(&raw);
        if username.as_str() != raw.trim() {
            println!("  Using @{}", username);
        }

        let status = checker.check_now(username.clone()).await;
        wizard.edit(|d| d.signup.username = username.clone());
        match status {
            Availability::Taken | Availability::Invalid => {
                println!("  @{}: {}", username, status);
            }
            Availability::Failed(_) => {
                println!("  Could not check availability right now; it will be checked on continue.");
                break;
            }
            _ => {
                println!("  @{} is available", username);
                break;
            }
        }
    }

    let email = value_or_back!(prompt_with_default("Email", &signup.email)?);
    wizard.edit(|d| d.signup.email = email);

    let label = if signup.password.is_empty() {
        "Password: ".to_string()
    } else {
        "Password (Enter to keep): ".to_string()
    };
    let password = value_or_back!(prompt_secret(&label)?);
    if !password.is_empty() {
        wizard.edit(|d| d.signup.password = Password::new(password));
    }

    Ok(Nav::Continue)
}

fn profile_step<B: OnboardingBackend>(wizard: &mut Wizard<B>) -> ForklyResult<Nav> {
    let profile = wizard.data().profile.clone();

    let current = profile
        .birth_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    loop {
        let raw = value_or_back!(prompt_with_default("Birth date (YYYY-MM-DD)", &current)?);
        if raw.is_empty() {
            break;
        }
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => {
                wizard.edit(|d| d.profile.birth_date = Some(date));
                break;
            }
            Err(_) => println!("  Use the format YYYY-MM-DD"),
        }
    }

    println!("Gender (optional):");
    let gender = match single_choice(Gender::ALL, |g| g.label(), profile.gender)? {
        None => return Ok(Nav::Back),
        Some(gender) => gender,
    };
    wizard.edit(|d| d.profile.gender = gender);

    let city = value_or_back!(prompt_with_default("City", &profile.city)?);
    wizard.edit(|d| d.profile.city = city);

    let neighborhood = value_or_back!(prompt_with_default("Neighborhood", &profile.neighborhood)?);
    wizard.edit(|d| d.profile.neighborhood = neighborhood);

    let current = profile
        .coordinates
        .map(|c| format!("{}, {}", c.latitude, c.longitude))
        .unwrap_or_default();
    loop {
        let raw = value_or_back!(prompt_with_default(
            "Location as 'lat, lng' (optional)",
            &current
        )?);
        if raw.is_empty() {
            break;
        }
        match parse_coordinates(&raw) {
            Some(coords) => {
                wizard.edit(|d| {
                    d.profile.coordinates = Some(coords);
                    d.profile.location_permission = true;
                });
                break;
            }
            None => println!("  Enter latitude and longitude, e.g. -23.56, -46.65"),
        }
    }

    Ok(Nav::Continue)
}

fn cuisines_step<B: OnboardingBackend>(wizard: &mut Wizard<B>) -> ForklyResult<Nav> {
    let current = wizard.data().taste.disliked_cuisines.clone();
    println!("Any cuisines you'd rather not see? (optional)");
    for (i, cuisine) in CUISINES.iter().enumerate() {
        let mark = if current.contains(*cuisine) { "x" } else { " " };
        println!("  [{}] {}. {}", mark, i + 1, cuisine);
    }

    loop {
        let raw = value_or_back!(prompt("Toggle numbers (Enter when done): ")?);
        if raw.is_empty() {
            return Ok(Nav::Continue);
        }
        match parse_choice_numbers(&raw, CUISINES.len()) {
            Ok(indices) => wizard.edit(|d| {
                for i in indices {
                    let cuisine = CUISINES[i].to_string();
                    if !d.taste.disliked_cuisines.remove(&cuisine) {
                        d.taste.disliked_cuisines.insert(cuisine);
                    }
                }
            }),
            Err(msg) => println!("  {}", msg),
        }
    }
}

fn occasions_step<B: OnboardingBackend>(wizard: &mut Wizard<B>) -> ForklyResult<Nav> {
    println!("Pick {} occasions:", wizard.rules().occasions);
    let current = wizard.data().taste.occasions.clone();
    match toggle_menu(Occasion::ALL, |o| o.label(), current)? {
        None => Ok(Nav::Back),
        Some(occasions) => {
            wizard.edit(|d| d.taste.occasions = occasions);
            Ok(Nav::Continue)
        }
    }
}

fn style_step<B: OnboardingBackend>(wizard: &mut Wizard<B>) -> ForklyResult<Nav> {
    let style = wizard.data().style.clone();
    let rules = *wizard.rules();

    println!("How often do you eat out?");
    let frequency = match single_choice(Frequency::ALL, |f| f.label(), style.frequency)? {
        None => return Ok(Nav::Back),
        Some(frequency) => frequency,
    };
    wizard.edit(|d| d.style.frequency = frequency);

    println!();
    println!("Where do you like to go? Pick {}:", rules.place_types);
    let place_types = match toggle_menu(PlaceType::ALL, |p| p.label(), style.place_types)? {
        None => return Ok(Nav::Back),
        Some(place_types) => place_types,
    };
    wizard.edit(|d| d.style.place_types = place_types);

    println!();
    println!("How do you decide where to eat? Pick {}:", rules.decision_style);
    let decision = match toggle_menu(DecisionStyle::ALL, |d| d.label(), style.decision_style)? {
        None => return Ok(Nav::Back),
        Some(decision) => decision,
    };
    wizard.edit(|d| d.style.decision_style = decision);

    Ok(Nav::Continue)
}

fn restrictions_step<B: OnboardingBackend>(wizard: &mut Wizard<B>) -> ForklyResult<Nav> {
    loop {
        let selection = wizard.data().restrictions.clone();
        let none_mark = if selection.is_none_selected() { "x" } else { " " };
        println!("  [{}] 0. No restrictions", none_mark);
        print_menu(DietaryRestriction::ALL, |r| r.label(), |r| selection.contains(*r));

        let raw = value_or_back!(prompt("Toggle numbers (Enter when done): ")?);
        if raw.is_empty() {
            return Ok(Nav::Continue);
        }
        if let Err(msg) = apply_restriction_toggles(&raw, wizard) {
            println!("  {}", msg);
        }
    }
}

fn apply_restriction_toggles<B: OnboardingBackend>(
    raw: &str,
    wizard: &mut Wizard<B>,
) -> Result<(), String> {
    let mut picks = Vec::new();
    for part in raw.split(|c: char| c == ',' || c.is_whitespace()) {
        if part.is_empty() {
            continue;
        }
        if part == "0" {
            picks.push(None);
        } else {
            let index = parse_choice_numbers(part, DietaryRestriction::ALL.len())?;
            picks.extend(index.into_iter().map(|i| Some(DietaryRestriction::ALL[i])));
        }
    }
    wizard.edit(|d| apply_picks(&mut d.restrictions, &picks));
    Ok(())
}

fn apply_picks(selection: &mut DietarySelection, picks: &[Option<DietaryRestriction>]) {
    for pick in picks {
        match pick {
            None => selection.toggle_none(),
            Some(restriction) => selection.toggle(*restriction),
        }
    }
}

fn summary_step<B: OnboardingBackend>(wizard: &mut Wizard<B>) -> ForklyResult<Nav> {
    let consents = wizard.data().consents;

    let Some(notifications) = prompt_yes_no(
        "Send me notifications about new places",
        consents.notifications_enabled,
    )?
    else {
        return Ok(Nav::Back);
    };
    let Some(beta) = prompt_yes_no("Join the beta program", consents.beta_tester)? else {
        return Ok(Nav::Back);
    };
    wizard.edit(|d| {
        d.consents.notifications_enabled = notifications;
        d.consents.beta_tester = beta;
    });

    println!();
    print!("{}", format_summary(wizard.data()));
    println!();

    match prompt_yes_no("Save and finish", true)? {
        Some(true) => Ok(Nav::Continue),
        Some(false) | None => Ok(Nav::Back),
    }
}

/// Parse "lat, lng" or "lat lng"
fn parse_coordinates(raw: &str) -> Option<Coordinates> {
    let mut parts = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let latitude = parts.next()?.parse::<f64>().ok()?;
    let longitude = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let coords = Coordinates::new(latitude, longitude);
    coords.is_valid().then_some(coords)
}
