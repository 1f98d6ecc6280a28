//! Core data models for Forkly
//!
//! This module contains the data structures of the client: onboarding
//! answers and steps, the signed-in session, restaurants, saved lists and
//! places lookup payloads.

pub mod account;
pub mod ids;
pub mod lead;
pub mod onboarding;
pub mod password;
pub mod places;
pub mod preferences;
pub mod restaurant;
pub mod saved_list;
pub mod selection;
pub mod username;

pub use account::AccountSession;
pub use ids::{AccountId, LeadId, ListId, RestaurantId};
pub use lead::Lead;
pub use onboarding::{
    Consents, ContinueAction, Coordinates, OnboardingData, OnboardingStep, PreferenceBundle,
    ProfileDetails, SignupDetails, StyleChoices, TastePreferences,
};
pub use password::Password;
pub use places::{PlaceDetails, PlacesAction, PlacesData, PlacesLocation, PlacesRequest, PlacesResponse};
pub use preferences::{
    DecisionStyle, DietaryRestriction, DietarySelection, Frequency, Gender, Occasion, PlaceType,
};
pub use restaurant::{NearbyQuery, NearbyRestaurant, Restaurant};
pub use saved_list::{SavedList, SavedRestaurant, SystemListType};
pub use selection::SelectionBounds;
pub use username::Username;
