//! Nearby restaurant search

use tracing::debug;

use crate::backend::RestaurantsBackend;
use crate::config::NearbySettings;
use crate::error::{ForklyError, ForklyResult};
use crate::models::{Coordinates, NearbyQuery, NearbyRestaurant};

/// Service for radius searches around a point
pub struct NearbyService<'a, B: ?Sized> {
    backend: &'a B,
    settings: &'a NearbySettings,
}

impl<'a, B: RestaurantsBackend + ?Sized> NearbyService<'a, B> {
    pub fn new(backend: &'a B, settings: &'a NearbySettings) -> Self {
        Self { backend, settings }
    }

    /// Build a query, applying defaults and limits
    ///
    /// A missing or non-positive radius falls back to the default; one
    /// above the maximum is capped.
    pub fn query(
        &self,
        origin: Coordinates,
        radius_km: Option<f64>,
        limit: Option<usize>,
    ) -> ForklyResult<NearbyQuery> {
        if !origin.is_valid() {
            return Err(ForklyError::Validation(format!(
                "Invalid coordinates ({}, {}): latitude must be within -90..90 and longitude within -180..180",
                origin.latitude, origin.longitude
            )));
        }

        let radius_km = match radius_km {
            Some(r) if r.is_finite() && r > 0.0 => r.min(self.settings.max_radius_km),
            _ => self.settings.default_radius_km,
        };
        let limit = match limit {
            Some(n) if n > 0 => n,
            _ => self.settings.default_limit,
        };

        Ok(NearbyQuery {
            origin,
            radius_km,
            limit,
        })
    }

    /// Restaurants around `origin`, closest first
    pub async fn search(
        &self,
        origin: Coordinates,
        radius_km: Option<f64>,
        limit: Option<usize>,
    ) -> ForklyResult<Vec<NearbyRestaurant>> {
        let query = self.query(origin, radius_km, limit)?;
        let mut rows = self.backend.nearby_restaurants(&query).await?;

        rows.retain(|row| row.distance_km <= query.radius_km);
        rows.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.restaurant.name.cmp(&b.restaurant.name))
        });
        rows.truncate(query.limit);

        debug!(results = rows.len(), radius_km = query.radius_km, "nearby search done");
        Ok(rows)
    }
}

/// Render a distance for display: whole meters under 1 km, else km
pub fn format_distance(km: f64) -> String {
    let meters = (km * 1000.0).round();
    if meters < 1000.0 {
        format!("{} m", meters as i64)
    } else {
        format!("{:.1} km", km)
    }
}
