//! Places lookup CLI commands

use clap::Subcommand;

use crate::backend::PlacesBackend;
use crate::display::{format_place_details, format_place_list};
use crate::error::{ForklyError, ForklyResult};
use crate::models::PlacesLocation;
use crate::services::PlacesService;

/// Places subcommands
#[derive(Subcommand)]
pub enum PlacesCommands {
    /// Search places by text
    Search {
        /// Search text
        query: String,
        /// Latitude to bias results toward
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude to bias results toward
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Show details of a place
    Details {
        /// Place ID from a search
        place_id: String,
    },
    /// Search and show details of the best match
    Lookup {
        /// Search text
        query: String,
        /// Latitude to bias results toward
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude to bias results toward
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
    },
}

fn location(lat: Option<f64>, lng: Option<f64>) -> ForklyResult<Option<PlacesLocation>> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(PlacesLocation { lat, lng })),
        (None, None) => Ok(None),
        _ => Err(ForklyError::Validation(
            "Pass both --lat and --lng, or neither".into(),
        )),
    }
}

/// Handle a places command
pub async fn handle_places_command<B: PlacesBackend + ?Sized>(
    backend: &B,
    cmd: PlacesCommands,
) -> ForklyResult<()> {
    let service = PlacesService::new(backend);

    match cmd {
        PlacesCommands::Search { query, lat, lng } => {
            let places = service.search(&query, location(lat, lng)?).await?;
            print!("{}", format_place_list(&places));
        }
        PlacesCommands::Details { place_id } => {
            let place = service.details(&place_id).await?;
            print!("{}", format_place_details(&place));
        }
        PlacesCommands::Lookup { query, lat, lng } => {
            let place = service
                .search_and_details(&query, location(lat, lng)?)
                .await?;
            print!("{}", format_place_details(&place));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_needs_both_coordinates() {
        assert!(location(None, None).unwrap().is_none());
        assert!(location(Some(1.0), Some(2.0)).unwrap().is_some());
        assert!(location(Some(1.0), None).unwrap_err().is_validation());
    }
}
