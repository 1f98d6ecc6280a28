use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use forkly::audit::AuditLogger;
use forkly::backend::RestBackend;
use forkly::cli::{
    handle_config_command, handle_history_command, handle_lists_command, handle_logout_command,
    handle_nearby_command, handle_onboard_command, handle_places_command, handle_session_command,
    ListCommands, NearbyArgs, OnboardArgs, PlacesCommands,
};
use forkly::config::{ForklyPaths, Settings};
use forkly::storage::Storage;

#[derive(Parser)]
#[command(
    name = "forkly",
    version,
    about = "Discover, save and review restaurants from the terminal",
    long_about = "Forkly helps you find restaurants that match your taste. \
                  Create an account with 'forkly onboard', then search nearby \
                  places and keep them in lists."
)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "FORKLY_BACKEND_URL")]
    backend_url: Option<String>,

    /// Backend anonymous API key
    #[arg(long, global = true, env = "FORKLY_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your account and set up your preferences
    Onboard(OnboardArgs),

    /// Saved list commands
    #[command(subcommand)]
    Lists(ListCommands),

    /// Find restaurants around a point
    Nearby(NearbyArgs),

    /// Search places and show their details
    #[command(subcommand)]
    Places(PlacesCommands),

    /// Show the signed-in account
    Session,

    /// Sign out
    Logout,

    /// Show recent changes made to your account
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    forkly::logging::init_tracing()?;
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ForklyPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    settings.apply_backend_overrides(cli.backend_url, cli.anon_key);
    debug!(base_dir = %paths.base_dir().display(), "loaded settings");

    let storage = Storage::new(paths.clone())?;
    let audit = AuditLogger::new(paths.audit_log());

    match cli.command {
        Some(Commands::Onboard(args)) => {
            let backend = Arc::new(RestBackend::new(&settings.backend)?);
            handle_onboard_command(backend, &paths, &settings, args).await?;
        }
        Some(Commands::Lists(cmd)) => {
            let backend = RestBackend::new(&settings.backend)?;
            handle_lists_command(&backend, &storage, &audit, cmd).await?;
        }
        Some(Commands::Nearby(args)) => {
            let backend = RestBackend::new(&settings.backend)?;
            handle_nearby_command(&backend, &settings.nearby, args).await?;
        }
        Some(Commands::Places(cmd)) => {
            let backend = RestBackend::new(&settings.backend)?;
            handle_places_command(&backend, cmd).await?;
        }
        Some(Commands::Session) => handle_session_command(&storage)?,
        Some(Commands::Logout) => handle_logout_command(&storage)?,
        Some(Commands::History { limit }) => handle_history_command(&audit, limit)?,
        Some(Commands::Config) => handle_config_command(&paths, &settings)?,
        None => {
            println!("Forkly - restaurant discovery from the terminal");
            println!();
            println!("Run 'forkly --help' for usage information.");
            println!("Run 'forkly onboard' to create your account.");
        }
    }

    Ok(())
}
