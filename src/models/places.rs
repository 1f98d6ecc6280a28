//! Places lookup proxy payloads
//!
//! The proxy is a serverless function in front of a third-party places
//! service. It takes `{action, query, location, place_id}` and answers
//! `{success, data, error}`.

use serde::{Deserialize, Serialize};

/// What the proxy should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacesAction {
    Search,
    Details,
    SearchAndDetails,
}

/// A latitude/longitude pair in the proxy's shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacesLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Request sent to the proxy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacesRequest {
    pub action: PlacesAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PlacesLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

impl PlacesRequest {
    /// Text search, optionally biased toward a location
    pub fn search(query: impl Into<String>, location: Option<PlacesLocation>) -> Self {
        Self {
            action: PlacesAction::Search,
            query: Some(query.into()),
            location,
            place_id: None,
        }
    }

    /// Details for a known place
    pub fn details(place_id: impl Into<String>) -> Self {
        Self {
            action: PlacesAction::Details,
            query: None,
            location: None,
            place_id: Some(place_id.into()),
        }
    }

    /// Search and return details of the best match in one round trip
    pub fn search_and_details(query: impl Into<String>, location: Option<PlacesLocation>) -> Self {
        Self {
            action: PlacesAction::SearchAndDetails,
            query: Some(query.into()),
            location,
            place_id: None,
        }
    }
}

/// Place fields returned by the proxy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: Option<PlacesLocation>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Payload of a successful lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlacesData {
    Many(Vec<PlaceDetails>),
    One(PlaceDetails),
}

impl PlacesData {
    /// Flatten into a list of places
    pub fn into_places(self) -> Vec<PlaceDetails> {
        match self {
            Self::Many(places) => places,
            Self::One(place) => vec![place],
        }
    }
}

/// Response from the proxy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<PlacesData>,
    #[serde(default)]
    pub error: Option<String>,
}
