//! Restaurant and place display formatting

use crate::models::{NearbyRestaurant, PlaceDetails};
use crate::services::nearby::format_distance;

/// Format radius search results, closest first
pub fn format_nearby(results: &[NearbyRestaurant]) -> String {
    if results.is_empty() {
        return "No restaurants found nearby. Try a larger --radius.\n".to_string();
    }

    let name_width = results
        .iter()
        .map(|r| r.restaurant.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let cuisine_width = results
        .iter()
        .filter_map(|r| r.restaurant.cuisine.as_deref())
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>8}  {:<name_width$}  {:>6}  {:<5}  {:<cuisine_width$}  {}\n",
        "Distance",
        "Name",
        "Rating",
        "Price",
        "Cuisine",
        "ID",
        name_width = name_width,
        cuisine_width = cuisine_width,
    ));
    output.push_str(&format!(
        "{:->8}  {:-<name_width$}  {:->6}  {:-<5}  {:-<cuisine_width$}  {:-<36}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        cuisine_width = cuisine_width,
    ));

    for row in results {
        let restaurant = &row.restaurant;
        output.push_str(&format!(
            "{:>8}  {:<name_width$}  {:>6}  {:<5}  {:<cuisine_width$}  {}\n",
            format_distance(row.distance_km),
            restaurant.name,
            restaurant.rating_label(),
            restaurant.price_label(),
            restaurant.cuisine.as_deref().unwrap_or(""),
            restaurant.id.as_uuid(),
            name_width = name_width,
            cuisine_width = cuisine_width,
        ));
    }

    output
}

/// Format place search results
pub fn format_place_list(places: &[PlaceDetails]) -> String {
    if places.is_empty() {
        return "No places matched.\n".to_string();
    }

    let mut output = String::new();
    for place in places {
        let rating = match place.rating {
            Some(r) => format!("{:.1}", r),
            None => "-".to_string(),
        };
        output.push_str(&format!("{}  [{}]  {}\n", rating, place.place_id, place.name));
        if let Some(address) = &place.formatted_address {
            output.push_str(&format!("     {}\n", address));
        }
    }
    output
}

/// Format a single place
pub fn format_place_details(place: &PlaceDetails) -> String {
    let mut output = String::new();
    output.push_str(&format!("Place: {}\n", place.name));
    output.push_str(&format!("  Place ID:  {}\n", place.place_id));
    if let Some(address) = &place.formatted_address {
        output.push_str(&format!("  Address:   {}\n", address));
    }
    if let Some(location) = place.location {
        output.push_str(&format!(
            "  Location:  {:.5}, {:.5}\n",
            location.lat, location.lng
        ));
    }
    if let Some(rating) = place.rating {
        output.push_str(&format!(
            "  Rating:    {:.1} ({} ratings)\n",
            rating,
            place.user_ratings_total.unwrap_or(0)
        ));
    }
    if let Some(level) = place.price_level {
        output.push_str(&format!("  Price:     {}\n", "$".repeat(level.clamp(1, 4) as usize)));
    }
    if let Some(phone) = &place.formatted_phone_number {
        output.push_str(&format!("  Phone:     {}\n", phone));
    }
    if let Some(website) = &place.website {
        output.push_str(&format!("  Website:   {}\n", website));
    }
    if !place.types.is_empty() {
        output.push_str(&format!("  Types:     {}\n", place.types.join(", ")));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlacesLocation, Restaurant, RestaurantId};

    #[test]
    fn test_nearby_table() {
        let row = NearbyRestaurant {
            restaurant: Restaurant {
                id: RestaurantId::new(),
                name: "Cantina".into(),
                cuisine: Some("italian".into()),
                address: None,
                neighborhood: None,
                city: None,
                latitude: None,
                longitude: None,
                price_level: Some(3),
                avg_rating: Some(4.0),
                review_count: 2,
                google_place_id: None,
            },
            distance_km: 0.42,
        };

        let id = row.restaurant.id;
        let output = format_nearby(&[row]);
        let line = output.lines().nth(2).unwrap();
        assert!(line.starts_with("   420 m"));
        assert!(line.contains("Cantina"));
        assert!(line.contains("$$$"));
        assert!(line.contains("italian"));
        assert!(line.ends_with(&id.as_uuid().to_string()));
    }

    #[test]
    fn test_place_details_skips_missing_fields() {
        let place = PlaceDetails {
            place_id: "p1".into(),
            name: "Bar do Zé".into(),
            location: Some(PlacesLocation {
                lat: -23.5,
                lng: -46.6,
            }),
            ..Default::default()
        };
        let output = format_place_details(&place);
        assert!(output.contains("Place: Bar do Zé"));
        assert!(output.contains("-23.50000, -46.60000"));
        assert!(!output.contains("Phone"));
    }
}
