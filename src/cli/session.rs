//! Session, journal and configuration commands
//!
//! None of these talk to the backend.

use crate::audit::AuditLogger;
use crate::config::{ForklyPaths, Settings};
use crate::display::{format_history, format_session};
use crate::error::ForklyResult;
use crate::storage::Storage;

/// Show the signed-in account
pub fn handle_session_command(storage: &Storage) -> ForklyResult<()> {
    match storage.session.load()? {
        Some(session) => print!("{}", format_session(&session)),
        None => println!("Not signed in. Run 'forkly onboard' to create an account."),
    }
    Ok(())
}

/// Forget the signed-in account
pub fn handle_logout_command(storage: &Storage) -> ForklyResult<()> {
    if storage.session.clear()? {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

/// Print the most recent journal entries
pub fn handle_history_command(audit: &AuditLogger, limit: usize) -> ForklyResult<()> {
    let entries = audit.read_recent(limit)?;
    print!("{}", format_history(&entries));
    Ok(())
}

/// Show paths and settings
pub fn handle_config_command(paths: &ForklyPaths, settings: &Settings) -> ForklyResult<()> {
    let rules = &settings.onboarding;
    let backend = &settings.backend;

    println!("Forkly Configuration");
    println!("====================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Backend:");
    if backend.url.is_empty() {
        println!("  URL:        (not set; use --backend-url or FORKLY_BACKEND_URL)");
    } else {
        println!("  URL:        {}", backend.url);
    }
    println!(
        "  Anon key:   {}",
        if backend.anon_key.is_empty() { "(not set)" } else { "(set)" }
    );
    println!("  Timeout:    {}s", backend.timeout_secs);
    println!();
    println!("Onboarding:");
    println!("  Completed:        {}", settings.onboarding_completed);
    println!("  Password length:  at least {}", rules.password_min_length);
    println!("  Occasions:        {}", rules.occasions);
    println!("  Place types:      {}", rules.place_types);
    println!("  Decision style:   {}", rules.decision_style);
    println!();
    println!("Nearby:");
    println!("  Default radius:   {} km", settings.nearby.default_radius_km);
    println!("  Max radius:       {} km", settings.nearby.max_radius_km);
    println!("  Default limit:    {}", settings.nearby.default_limit);
    Ok(())
}
