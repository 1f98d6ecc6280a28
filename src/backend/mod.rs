//! Backend collaborator interfaces
//!
//! The hosted backend owns authentication, storage, row-level security,
//! geospatial search and the places proxy. The client talks to it through
//! the traits below; [`rest::RestBackend`] implements all of them over HTTP.
//!
//! Errors follow one convention: an unreachable backend is
//! `ForklyError::Network`, a non-success answer is `ForklyError::Backend`
//! carrying the backend's own message. Callers decide how to reclassify.

pub mod payloads;
pub mod rest;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ForklyResult;
use crate::models::{
    AccountSession, ListId, NearbyQuery, NearbyRestaurant, Password, PlacesRequest,
    PlacesResponse, PreferenceBundle, RestaurantId, SavedList, SavedRestaurant, Username,
};

pub use rest::RestBackend;

/// Credentials and metadata for a new account
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub password: &'a Password,
    pub username: &'a Username,
    pub full_name: &'a str,
}

/// Account creation and preference persistence
#[async_trait]
pub trait OnboardingBackend: Send + Sync {
    /// Whether a profile with this username already exists
    async fn username_exists(&self, username: &Username) -> ForklyResult<bool>;

    /// Create an account; the session carries the new identity
    async fn create_account(&self, account: NewAccount<'_>) -> ForklyResult<AccountSession>;

    /// Upsert profile fields and preferences for the account
    async fn save_preferences(
        &self,
        session: &AccountSession,
        bundle: &PreferenceBundle,
    ) -> ForklyResult<()>;
}

/// Saved list CRUD, membership and visit tracking
#[async_trait]
pub trait SavedListsBackend: Send + Sync {
    async fn fetch_lists(&self, session: &AccountSession) -> ForklyResult<Vec<SavedList>>;

    async fn create_list(
        &self,
        session: &AccountSession,
        name: &str,
        description: Option<&str>,
    ) -> ForklyResult<SavedList>;

    async fn rename_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        name: &str,
    ) -> ForklyResult<SavedList>;

    async fn delete_list(&self, session: &AccountSession, list_id: ListId) -> ForklyResult<()>;

    async fn fetch_list_items(
        &self,
        session: &AccountSession,
        list_id: ListId,
    ) -> ForklyResult<Vec<SavedRestaurant>>;

    async fn add_to_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<()>;

    async fn remove_from_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<()>;

    async fn mark_visited(
        &self,
        session: &AccountSession,
        restaurant_id: RestaurantId,
        visited: bool,
    ) -> ForklyResult<()>;

    /// IDs of the user's lists that contain the restaurant
    async fn lists_containing(
        &self,
        session: &AccountSession,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<Vec<ListId>>;
}

/// Geospatial restaurant search
#[async_trait]
pub trait RestaurantsBackend: Send + Sync {
    async fn nearby_restaurants(&self, query: &NearbyQuery) -> ForklyResult<Vec<NearbyRestaurant>>;
}

/// The places lookup proxy
#[async_trait]
pub trait PlacesBackend: Send + Sync {
    async fn lookup(&self, request: &PlacesRequest) -> ForklyResult<PlacesResponse>;
}

#[async_trait]
impl<T: OnboardingBackend + ?Sized> OnboardingBackend for Arc<T> {
    async fn username_exists(&self, username: &Username) -> ForklyResult<bool> {
        (**self).username_exists(username).await
    }

    async fn create_account(&self, account: NewAccount<'_>) -> ForklyResult<AccountSession> {
        (**self).create_account(account).await
    }

    async fn save_preferences(
        &self,
        session: &AccountSession,
        bundle: &PreferenceBundle,
    ) -> ForklyResult<()> {
        (**self).save_preferences(session, bundle).await
    }
}

#[async_trait]
impl<T: SavedListsBackend + ?Sized> SavedListsBackend for Arc<T> {
    async fn fetch_lists(&self, session: &AccountSession) -> ForklyResult<Vec<SavedList>> {
        (**self).fetch_lists(session).await
    }

    async fn create_list(
        &self,
        session: &AccountSession,
        name: &str,
        description: Option<&str>,
    ) -> ForklyResult<SavedList> {
        (**self).create_list(session, name, description).await
    }

    async fn rename_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        name: &str,
    ) -> ForklyResult<SavedList> {
        (**self).rename_list(session, list_id, name).await
    }

    async fn delete_list(&self, session: &AccountSession, list_id: ListId) -> ForklyResult<()> {
        (**self).delete_list(session, list_id).await
    }

    async fn fetch_list_items(
        &self,
        session: &AccountSession,
        list_id: ListId,
    ) -> ForklyResult<Vec<SavedRestaurant>> {
        (**self).fetch_list_items(session, list_id).await
    }

    async fn add_to_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<()> {
        (**self).add_to_list(session, list_id, restaurant_id).await
    }

    async fn remove_from_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<()> {
        (**self).remove_from_list(session, list_id, restaurant_id).await
    }

    async fn mark_visited(
        &self,
        session: &AccountSession,
        restaurant_id: RestaurantId,
        visited: bool,
    ) -> ForklyResult<()> {
        (**self).mark_visited(session, restaurant_id, visited).await
    }

    async fn lists_containing(
        &self,
        session: &AccountSession,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<Vec<ListId>> {
        (**self).lists_containing(session, restaurant_id).await
    }
}

#[async_trait]
impl<T: RestaurantsBackend + ?Sized> RestaurantsBackend for Arc<T> {
    async fn nearby_restaurants(&self, query: &NearbyQuery) -> ForklyResult<Vec<NearbyRestaurant>> {
        (**self).nearby_restaurants(query).await
    }
}

#[async_trait]
impl<T: PlacesBackend + ?Sized> PlacesBackend for Arc<T> {
    async fn lookup(&self, request: &PlacesRequest) -> ForklyResult<PlacesResponse> {
        (**self).lookup(request).await
    }
}
