//! Nearby restaurants CLI command

use clap::Args;

use crate::backend::RestaurantsBackend;
use crate::config::NearbySettings;
use crate::display::format_nearby;
use crate::error::ForklyResult;
use crate::models::Coordinates;
use crate::services::NearbyService;

/// Arguments of `forkly nearby`
#[derive(Args, Debug)]
pub struct NearbyArgs {
    /// Latitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    /// Longitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
    /// Search radius in kilometers
    #[arg(short, long)]
    pub radius: Option<f64>,
    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Handle the nearby command
pub async fn handle_nearby_command<B: RestaurantsBackend + ?Sized>(
    backend: &B,
    settings: &NearbySettings,
    args: NearbyArgs,
) -> ForklyResult<()> {
    let service = NearbyService::new(backend, settings);
    let origin = Coordinates::new(args.lat, args.lng);

    let results = service.search(origin, args.radius, args.limit).await?;
    print!("{}", format_nearby(&results));
    Ok(())
}
