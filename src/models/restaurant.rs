//! Restaurant records returned by the backend

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::RestaurantId;
use super::onboarding::Coordinates;

/// A restaurant as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// 1 (cheap) to 4 (expensive)
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub google_place_id: Option<String>,
}

impl Restaurant {
    /// Location, when both coordinates are known
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }

    /// Price level rendered as dollar signs
    pub fn price_label(&self) -> String {
        match self.price_level {
            Some(level) if level > 0 => "$".repeat(level.min(4) as usize),
            _ => String::new(),
        }
    }

    /// Rating rendered with one decimal, or a dash when unrated
    pub fn rating_label(&self) -> String {
        match self.avg_rating {
            Some(rating) if self.review_count > 0 => format!("{:.1}", rating),
            _ => "-".to_string(),
        }
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.neighborhood {
            Some(neighborhood) => write!(f, "{} ({})", self.name, neighborhood),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A restaurant row from the radius search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub distance_km: f64,
}

/// Parameters of a radius search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub origin: Coordinates,
    pub radius_km: f64,
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> Restaurant {
        Restaurant {
            id: RestaurantId::new(),
            name: name.to_string(),
            cuisine: Some("japanese".into()),
            address: None,
            neighborhood: Some("Liberdade".into()),
            city: Some("São Paulo".into()),
            latitude: Some(-23.557),
            longitude: Some(-46.635),
            price_level: Some(2),
            avg_rating: Some(4.26),
            review_count: 12,
            google_place_id: None,
        }
    }

    #[test]
    fn test_labels() {
        let mut restaurant = sample("Sushi Bar");
        assert_eq!(restaurant.price_label(), "$$");
        assert_eq!(restaurant.rating_label(), "4.3");

        restaurant.review_count = 0;
        assert_eq!(restaurant.rating_label(), "-");
        restaurant.price_level = None;
        assert_eq!(restaurant.price_label(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(sample("Sushi Bar").to_string(), "Sushi Bar (Liberdade)");
    }

    #[test]
    fn test_nearby_row_deserializes_flat() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Cantina",
            "avg_rating": 4.0,
            "review_count": 3,
            "distance_km": 0.42
        }"#;
        let row: NearbyRestaurant = serde_json::from_str(json).unwrap();
        assert_eq!(row.restaurant.name, "Cantina");
        assert_eq!(row.distance_km, 0.42);
        assert!(row.restaurant.coordinates().is_none());
    }
}
