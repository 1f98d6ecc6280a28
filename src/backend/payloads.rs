//! Wire shapes of the backend's auth, table and RPC endpoints

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AccountId, ListId, PreferenceBundle, RestaurantId};

/// Body of `POST /auth/v1/signup`
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignupMetadata<'a>,
}

/// User metadata stored with the auth record
#[derive(Debug, Serialize)]
pub struct SignupMetadata<'a> {
    pub username: &'a str,
    pub full_name: &'a str,
}

/// Answer of the signup endpoint
///
/// With email confirmation on, the endpoint returns the bare user; with it
/// off, a session wrapping the user.
#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub id: Option<AccountId>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: AccountId,
    #[serde(default)]
    pub email: Option<String>,
}

impl SignupResponse {
    /// The created account's id, wherever the backend put it
    pub fn account_id(&self) -> Option<AccountId> {
        self.user.as_ref().map(|u| u.id).or(self.id)
    }

    /// The created account's email, wherever the backend put it
    pub fn email(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .or(self.email.as_deref())
    }
}

/// Error bodies across auth, PostgREST and functions
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Most specific message present
    pub fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
    }
}

/// Profile columns updated after the summary step
#[derive(Debug, Serialize)]
pub struct ProfilePatch<'a> {
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<&'a str>,
    pub city: &'a str,
    pub neighborhood: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_permission: bool,
    pub onboarding_completed: bool,
}

/// Row upserted into `user_preferences`, keyed by `user_id`
#[derive(Debug, Serialize)]
pub struct PreferencesRow<'a> {
    pub user_id: AccountId,
    pub disliked_cuisines: &'a [String],
    pub occasions: &'a [String],
    pub frequency: Option<&'a str>,
    pub place_types: &'a [String],
    pub decision_style: &'a [String],
    pub dietary_restrictions: &'a [String],
    pub notifications_enabled: bool,
    pub beta_tester: bool,
}

impl<'a> ProfilePatch<'a> {
    pub fn from_bundle(bundle: &'a PreferenceBundle) -> Self {
        Self {
            birth_date: bundle.birth_date,
            gender: bundle.gender.as_deref(),
            city: &bundle.city,
            neighborhood: &bundle.neighborhood,
            latitude: bundle.latitude,
            longitude: bundle.longitude,
            location_permission: bundle.location_permission,
            onboarding_completed: true,
        }
    }
}

impl<'a> PreferencesRow<'a> {
    pub fn from_bundle(user_id: AccountId, bundle: &'a PreferenceBundle) -> Self {
        Self {
            user_id,
            disliked_cuisines: &bundle.disliked_cuisines,
            occasions: &bundle.occasions,
            frequency: bundle.frequency.as_deref(),
            place_types: &bundle.place_types,
            decision_style: &bundle.decision_style,
            dietary_restrictions: &bundle.dietary_restrictions,
            notifications_enabled: bundle.notifications_enabled,
            beta_tester: bundle.beta_tester,
        }
    }
}

/// Body for creating a saved list
#[derive(Debug, Serialize)]
pub struct NewListRow<'a> {
    pub owner_id: AccountId,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct RenameListRow<'a> {
    pub name: &'a str,
}

/// Arguments of the list membership RPCs
#[derive(Debug, Serialize)]
pub struct ListMembershipArgs {
    pub p_list_id: ListId,
    pub p_restaurant_id: RestaurantId,
}

#[derive(Debug, Serialize)]
pub struct ListItemsArgs {
    pub p_list_id: ListId,
}

#[derive(Debug, Serialize)]
pub struct RestaurantArgs {
    pub p_restaurant_id: RestaurantId,
}

#[derive(Debug, Serialize)]
pub struct VisitArgs {
    pub p_restaurant_id: RestaurantId,
    pub p_visited: bool,
}

/// Arguments of the `nearby_restaurants` RPC
#[derive(Debug, Serialize)]
pub struct NearbyArgs {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
    pub max_results: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_response_with_session() {
        let json = r#"{
            "access_token": "jwt",
            "user": {"id": "550e8400-e29b-41d4-a716-446655440000", "email": "a@b.com"}
        }"#;
        let response: SignupResponse = serde_json::from_str(json).unwrap();
        assert!(response.account_id().is_some());
        assert_eq!(response.email(), Some("a@b.com"));
        assert_eq!(response.access_token.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_signup_response_bare_user() {
        let json = r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "email": "a@b.com"}"#;
        let response: SignupResponse = serde_json::from_str(json).unwrap();
        assert!(response.account_id().is_some());
        assert!(response.access_token.is_none());
    }

    #[test]
    fn test_error_body_prefers_specific_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "invalid_grant", "error_description": "Weak password"}"#)
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Weak password"));

        let body: ErrorBody = serde_json::from_str(r#"{"msg": "User already registered"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("User already registered"));
    }
}
