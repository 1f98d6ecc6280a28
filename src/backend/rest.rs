//! HTTP implementation of the backend traits
//!
//! Speaks the conventions of a hosted Postgres backend: `/auth/v1` for
//! accounts, `/rest/v1/<table>` for rows, `/rest/v1/rpc/<fn>` for stored
//! procedures and `/functions/v1/<name>` for serverless functions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::payloads::{
    ErrorBody, ListItemsArgs, ListMembershipArgs, NearbyArgs, NewListRow, PreferencesRow,
    ProfilePatch, RenameListRow, RestaurantArgs, SignupMetadata, SignupRequest, SignupResponse,
    VisitArgs,
};
use super::{
    NewAccount, OnboardingBackend, PlacesBackend, RestaurantsBackend, SavedListsBackend,
};
use crate::config::BackendSettings;
use crate::error::{ForklyError, ForklyResult};
use crate::models::{
    AccountSession, ListId, NearbyQuery, NearbyRestaurant, PlacesRequest,
    PlacesResponse, PreferenceBundle, RestaurantId, SavedList, SavedRestaurant, Username,
};

const PLACES_FUNCTION: &str = "places-proxy";

/// Client for the hosted backend
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestBackend {
    /// Build a client from backend settings
    pub fn new(settings: &BackendSettings) -> ForklyResult<Self> {
        if !settings.is_configured() {
            return Err(ForklyError::Config(
                "Backend URL and anon key must be set (see 'forkly config')".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ForklyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.clone(),
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let bearer = token.unwrap_or(&self.anon_key);
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    fn rpc<A: Serialize + ?Sized>(&self, function: &str, token: &str, args: &A) -> RequestBuilder {
        self.request(
            Method::POST,
            &format!("/rest/v1/rpc/{}", function),
            Some(token),
        )
        .json(args)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ForklyResult<T> {
        let response = check_status(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn execute(&self, builder: RequestBuilder) -> ForklyResult<()> {
        check_status(builder.send().await?).await?;
        Ok(())
    }
}

/// Turn a non-success response into `ForklyError::Backend`
async fn check_status(response: Response) -> ForklyResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    warn!(status = status.as_u16(), %message, "backend request failed");
    Err(ForklyError::Backend {
        status: status.as_u16(),
        message,
    })
}

fn bearer(session: &AccountSession) -> ForklyResult<&str> {
    session
        .access_token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or(ForklyError::NotSignedIn)
}

/// PostgREST equality filter on a uuid column
fn eq_id(id: &Uuid) -> String {
    format!("eq.{}", id)
}

#[derive(Deserialize)]
struct ListIdRow {
    list_id: ListId,
}

#[derive(Serialize)]
struct NoArgs {}

#[async_trait]
impl OnboardingBackend for RestBackend {
    async fn username_exists(&self, username: &Username) -> ForklyResult<bool> {
        debug!(%username, "checking username availability");
        let rows: Vec<serde_json::Value> = self
            .fetch(
                self.request(Method::GET, "/rest/v1/profiles", None).query(&[
                    ("select", "id".to_string()),
                    ("username", format!("eq.{}", username)),
                    ("limit", "1".to_string()),
                ]),
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn create_account(&self, account: NewAccount<'_>) -> ForklyResult<AccountSession> {
        debug!(email = account.email, username = %account.username, "creating account");
        let body = SignupRequest {
            email: account.email,
            password: account.password.expose(),
            data: SignupMetadata {
                username: account.username.as_str(),
                full_name: account.full_name,
            },
        };

        let response: SignupResponse = self
            .fetch(self.request(Method::POST, "/auth/v1/signup", None).json(&body))
            .await?;

        let account_id = response.account_id().ok_or_else(|| ForklyError::Backend {
            status: 200,
            message: "signup response did not include a user id".into(),
        })?;
        let email = response.email().unwrap_or(account.email).to_string();

        Ok(AccountSession::new(
            account_id,
            email,
            account.username.clone(),
            response.access_token,
        ))
    }

    async fn save_preferences(
        &self,
        session: &AccountSession,
        bundle: &PreferenceBundle,
    ) -> ForklyResult<()> {
        let token = bearer(session)?;
        debug!(account = %session.account_id, "saving profile and preferences");

        self.execute(
            self.request(Method::PATCH, "/rest/v1/profiles", Some(token))
                .query(&[("id", eq_id(session.account_id.as_uuid()))])
                .header("Prefer", "return=minimal")
                .json(&ProfilePatch::from_bundle(bundle)),
        )
        .await?;

        self.execute(
            self.request(Method::POST, "/rest/v1/user_preferences", Some(token))
                .query(&[("on_conflict", "user_id")])
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(&PreferencesRow::from_bundle(session.account_id, bundle)),
        )
        .await
    }
}

#[async_trait]
impl SavedListsBackend for RestBackend {
    async fn fetch_lists(&self, session: &AccountSession) -> ForklyResult<Vec<SavedList>> {
        let token = bearer(session)?;
        self.fetch(self.rpc("get_user_lists", token, &NoArgs {})).await
    }

    async fn create_list(
        &self,
        session: &AccountSession,
        name: &str,
        description: Option<&str>,
    ) -> ForklyResult<SavedList> {
        let token = bearer(session)?;
        let row = NewListRow {
            owner_id: session.account_id,
            name,
            description,
        };
        let mut created: Vec<SavedList> = self
            .fetch(
                self.request(Method::POST, "/rest/v1/saved_lists", Some(token))
                    .header("Prefer", "return=representation")
                    .json(&row),
            )
            .await?;
        created.pop().ok_or_else(|| ForklyError::Backend {
            status: 201,
            message: "created list was not returned".into(),
        })
    }

    async fn rename_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        name: &str,
    ) -> ForklyResult<SavedList> {
        let token = bearer(session)?;
        let mut updated: Vec<SavedList> = self
            .fetch(
                self.request(Method::PATCH, "/rest/v1/saved_lists", Some(token))
                    .query(&[("id", eq_id(list_id.as_uuid()))])
                    .header("Prefer", "return=representation")
                    .json(&RenameListRow { name }),
            )
            .await?;
        updated
            .pop()
            .ok_or_else(|| ForklyError::list_not_found(list_id.to_string()))
    }

    async fn delete_list(&self, session: &AccountSession, list_id: ListId) -> ForklyResult<()> {
        let token = bearer(session)?;
        self.execute(
            self.request(Method::DELETE, "/rest/v1/saved_lists", Some(token))
                .query(&[("id", eq_id(list_id.as_uuid()))]),
        )
        .await
    }

    async fn fetch_list_items(
        &self,
        session: &AccountSession,
        list_id: ListId,
    ) -> ForklyResult<Vec<SavedRestaurant>> {
        let token = bearer(session)?;
        self.fetch(self.rpc(
            "get_list_restaurants",
            token,
            &ListItemsArgs { p_list_id: list_id },
        ))
        .await
    }

    async fn add_to_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<()> {
        let token = bearer(session)?;
        let args = ListMembershipArgs {
            p_list_id: list_id,
            p_restaurant_id: restaurant_id,
        };
        self.execute(self.rpc("add_restaurant_to_list", token, &args))
            .await
    }

    async fn remove_from_list(
        &self,
        session: &AccountSession,
        list_id: ListId,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<()> {
        let token = bearer(session)?;
        let args = ListMembershipArgs {
            p_list_id: list_id,
            p_restaurant_id: restaurant_id,
        };
        self.execute(self.rpc("remove_restaurant_from_list", token, &args))
            .await
    }

    async fn mark_visited(
        &self,
        session: &AccountSession,
        restaurant_id: RestaurantId,
        visited: bool,
    ) -> ForklyResult<()> {
        let token = bearer(session)?;
        let args = VisitArgs {
            p_restaurant_id: restaurant_id,
            p_visited: visited,
        };
        self.execute(self.rpc("mark_restaurant_visited", token, &args))
            .await
    }

    async fn lists_containing(
        &self,
        session: &AccountSession,
        restaurant_id: RestaurantId,
    ) -> ForklyResult<Vec<ListId>> {
        let token = bearer(session)?;
        let rows: Vec<ListIdRow> = self
            .fetch(self.rpc(
                "get_restaurant_list_ids",
                token,
                &RestaurantArgs {
                    p_restaurant_id: restaurant_id,
                },
            ))
            .await?;
        Ok(rows.into_iter().map(|row| row.list_id).collect())
    }
}

#[async_trait]
impl RestaurantsBackend for RestBackend {
    async fn nearby_restaurants(&self, query: &NearbyQuery) -> ForklyResult<Vec<NearbyRestaurant>> {
        debug!(
            lat = query.origin.latitude,
            lng = query.origin.longitude,
            radius_km = query.radius_km,
            "searching nearby restaurants"
        );
        let args = NearbyArgs {
            lat: query.origin.latitude,
            lng: query.origin.longitude,
            radius_km: query.radius_km,
            max_results: query.limit,
        };
        self.fetch(
            self.request(Method::POST, "/rest/v1/rpc/nearby_restaurants", None)
                .json(&args),
        )
        .await
    }
}

#[async_trait]
impl PlacesBackend for RestBackend {
    async fn lookup(&self, request: &PlacesRequest) -> ForklyResult<PlacesResponse> {
        debug!(action = ?request.action, "calling places proxy");
        self.fetch(
            self.request(
                Method::POST,
                &format!("/functions/v1/{}", PLACES_FUNCTION),
                None,
            )
            .json(request),
        )
        .await
    }
}
