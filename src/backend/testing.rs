//! In-memory backend for unit tests

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{NewAccount, OnboardingBackend, PlacesBackend, RestaurantsBackend, SavedListsBackend};
use crate::error::{ForklyError, ForklyResult};
use crate::models::{
    AccountId, AccountSession, ListId, NearbyQuery, NearbyRestaurant, PlacesRequest,
    PlacesResponse, PreferenceBundle, Restaurant, RestaurantId, SavedList, SavedRestaurant,
    SystemListType, Username,
};

/// A failure the fake should report for an operation
#[derive(Debug, Clone)]
pub enum Failure {
    Network,
    Backend(u16, &'static str),
}

impl Failure {
    fn to_error(&self) -> ForklyError {
        match self {
            Self::Network => ForklyError::Network("connection refused".into()),
            Self::Backend(status, message) => ForklyError::Backend {
                status: *status,
                message: message.to_string(),
            },
        }
    }
}

#[derive(Default)]
struct State {
    taken_usernames: HashSet<String>,
    confirm_email: bool,
    failures: HashMap<&'static str, Failure>,
    calls: Vec<String>,
    saved_bundles: Vec<(AccountId, PreferenceBundle)>,
    catalog: Vec<Restaurant>,
    lists: Vec<SavedList>,
    items: Vec<SavedRestaurant>,
    visits: HashMap<RestaurantId, bool>,
    nearby: Vec<NearbyRestaurant>,
    places: Option<PlacesResponse>,
    places_requests: Vec<PlacesRequest>,
}

/// Fake implementing every backend trait with in-memory state
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Enter an operation, failing if a failure is armed for it
    fn enter(&self, op: &'static str, detail: impl Into<String>) -> ForklyResult<()> {
        let mut state = self.state();
        let detail = detail.into();
        state.calls.push(if detail.is_empty() {
            op.to_string()
        } else {
            format!("{}:{}", op, detail)
        });
        match state.failures.get(op) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    pub fn take_username(&self, username: &str) {
        self.state().taken_usernames.insert(username.to_string());
    }

    /// Create accounts without a session, as projects that confirm emails do
    pub fn require_email_confirmation(&self) {
        self.state().confirm_email = true;
    }

    /// Make every call to `op` fail until cleared
    pub fn fail(&self, op: &'static str, failure: Failure) {
        self.state().failures.insert(op, failure);
    }

    pub fn recover(&self, op: &'static str) {
        self.state().failures.remove(op);
    }

    /// Operations called so far, as `op` or `op:detail`
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.split(':').next() == Some(op))
            .count()
    }

    pub fn saved_bundles(&self) -> Vec<(AccountId, PreferenceBundle)> {
        self.state().saved_bundles.clone()
    }

    pub fn add_restaurant(&self, restaurant: Restaurant) {
        self.state().catalog.push(restaurant);
    }

    pub fn set_nearby(&self, rows: Vec<NearbyRestaurant>) {
        self.state().nearby = rows;
    }

    pub fn set_places_response(&self, response: PlacesResponse) {
        self.state().places = Some(response);
    }

    pub fn places_requests(&self) -> Vec<PlacesRequest> {
        self.state().places_requests.clone()
    }

    pub fn is_visited(&self, restaurant_id: RestaurantId) -> bool {
        self.state()
            .visits
            .get(&restaurant_id)
            .copied()
            .unwrap_or(false)
    }

    /// Provision a system list, as the backend does on account creation
    pub fn provision_system_list(
        &self,
        owner: &AccountSession,
        name: &str,
        kind: SystemListType,
    ) -> SavedList {
        let list = new_list(owner.account_id, name, None, Some(kind));
        self.state().lists.push(list.clone());
        list
    }
}

fn new_list(
    owner_id: AccountId,
    name: &str,
    description: Option<&str>,
    system_type: Option<SystemListType>,
) -> SavedList {
    let now = Utc::now();
    SavedList {
        id: ListId::new(),
        owner_id,
        name: name.to_string(),
        description: description.map(str::to_string),
        system_type,
        restaurant_count: 0,
        created_at: now,
        updated_at: now,
    }
}

/// A signed-in session for tests
pub fn signed_in(username: &str) -> AccountSession {
    AccountSession::new(
        AccountId::new(),
        format!("{}@example.com", username),
        Username::normalize(username),
        Some("token".into()),
    )
}

/// A restaurant with only the fields tests care about
pub fn restaurant(name: &str) -> Restaurant {
    Restaurant {
        id: RestaurantId::new(),
        name: name.to_string(),
        cuisine: None,
        address: None,
        neighborhood: None,
        city: None,
        latitude: None,
        longitude: None,
        price_level: None,
        avg_rating: None,
        review_count: 0,
        google_place_id: None,
    }
}

#[async_trait]
impl OnboardingBackend for FakeBackend {
    async fn username_exists(&self, username: &Username) -> ForklyResult<bool> {
        self.enter("username_exists", username.as_str())?;
        Ok(self.state().taken_usernames.contains(username.as_str()))
    }

    async fn create_account(&self, account: NewAccount<'_>) -> ForklyResult<AccountSession> {
        self.enter("create_account", account.username.as_str())?;
        let mut state = self.state();
        state
            .taken_usernames
            .insert(account.username.as_str().to_string());
        let token = (!state.confirm_email).then(|| "token".to_string());
        Ok(AccountSession::new(
            AccountId::new(),
            account.email,
            account.username.clone(),
            token,
        ))
    }

    async fn save_preferences(
        &self,
        session: &AccountSession,
        bundle: &PreferenceBundle,
    ) -> ForklyResult<()> {
        self.enter("save_preferences", "")?;
        let mut state = self.state();
        state
            .saved_bundles
            .retain(|(id, _)| *id != session.account_id);
        state
            .saved_bundles
            .push((session.account_id, bundle.clone()));
        Ok(())
    }
}

#[async_trait]
impl SavedListsBackend for FakeBackend {
    async fn fetch_lists(&self, session: &AccountSession) -> ForklyResult<Vec<SavedList>> {
        self.enter("fetch_lists", "")?;
        let state = self.state();
        Ok(state
            .lists
            .iter()
            .filter(|list| list.owner_id == session.account_id)
            .map(|list| {
                let mut list = list.clone();
                list.restaurant_count =
                    state.items.iter().filter(|i| i.list_id == list.id).count() as u32;
                list
            })
            .collect())
    }

    async fn create_list(
        &self,
        session: &AccountSession,
        name: &str,
        description: Option<&str>,
    ) -> ForklyResult<SavedList> {
        self.enter("create_list", name)?;
        let list = new_list(session.account_id, name, description, None);
        self.state().lists.push(list.clone());
        Ok(list)
    }

    async fn rename_list(
        &self,
        _session: &AccountSession,
        list_id: ListId,
        name: &str,
    ) -> ForklyResult<SavedList> {
        self.enter("rename_list", name)?;
        let mut state = self.state();
        let list = state
            .lists
            .iter_mut()
            .find(|list| list.id == list_id)
            .ok_or_else(|| ForklyError::list_not_found(list_id.to_string()))?;
        list.name = name.to_string();
        list.updated_at = Utc::now();
        Ok(list.clone())
    }

    async fn delete_list(&self, _session: &AccountSession, list_id: ListId) -> ForklyResult<()> {
        self.enter("delete_list", "")?;
        let mut state = self.state();
        state.lists.retain(|list| list.id != list_id);
        state.items.retain(|item| item.list_id != list_id);
        Ok(())
    }

    async fn fetch_list_items(
        &self,
        _session: &AccountSession,
        list_id: ListId,
    ) -> ForklyResult<Vec<SavedRestaurant>> {
        self.enter("fetch_list_items", "")?;
        let state = self.state();
        Ok(state
            .items
            .iter()
            .filter(|item| item.list_id == list_id)
            .map(|item| {
                let mut item = item.clone();
                item.visited = state
                    .visits
                    .get(&item.restaurant.id)
                    .copied()
                    .unwrap_or(false);
                item
            })
            .collect())
    }

    async fn add_to_list(
        &self,
        _session: &AccountSession,
        list_id: ListId,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<()> {
        self.enter("add_to_list", "")?;
        let mut state = self.state();
        let restaurant = state
            .catalog
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned()
            .ok_or(ForklyError::Backend {
                status: 404,
                message: "restaurant does not exist".into(),
            })?;
        let present = state
            .items
            .iter()
            .any(|item| item.list_id == list_id && item.restaurant.id == restaurant_id);
        if !present {
            state.items.push(SavedRestaurant {
                list_id,
                restaurant,
                added_at: Utc::now(),
                visited: false,
                visited_at: None,
            });
        }
        Ok(())
    }

    async fn remove_from_list(
        &self,
        _session: &AccountSession,
        list_id: ListId,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<()> {
        self.enter("remove_from_list", "")?;
        self.state()
            .items
            .retain(|item| !(item.list_id == list_id && item.restaurant.id == restaurant_id));
        Ok(())
    }

    async fn mark_visited(
        &self,
        _session: &AccountSession,
        restaurant_id: RestaurantId,
        visited: bool,
    ) -> ForklyResult<()> {
        self.enter("mark_visited", "")?;
        self.state().visits.insert(restaurant_id, visited);
        Ok(())
    }

    async fn lists_containing(
        &self,
        _session: &AccountSession,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<Vec<ListId>> {
        self.enter("lists_containing", "")?;
        Ok(self
            .state()
            .items
            .iter()
            .filter(|item| item.restaurant.id == restaurant_id)
            .map(|item| item.list_id)
            .collect())
    }
}

#[async_trait]
impl RestaurantsBackend for FakeBackend {
    async fn nearby_restaurants(&self, query: &NearbyQuery) -> ForklyResult<Vec<NearbyRestaurant>> {
        self.enter("nearby_restaurants", format!("{}", query.radius_km))?;
        Ok(self
            .state()
            .nearby
            .iter()
            .filter(|row| row.distance_km <= query.radius_km)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PlacesBackend for FakeBackend {
    async fn lookup(&self, request: &PlacesRequest) -> ForklyResult<PlacesResponse> {
        self.enter("lookup", "")?;
        let mut state = self.state();
        state.places_requests.push(request.clone());
        Ok(state.places.clone().unwrap_or(PlacesResponse {
            success: true,
            data: None,
            error: None,
        }))
    }
}
