//! Places lookup through the backend proxy

use tracing::debug;

use crate::backend::PlacesBackend;
use crate::error::{ForklyError, ForklyResult};
use crate::models::{PlaceDetails, PlacesLocation, PlacesRequest, PlacesResponse};

const NO_RESULT: &str = "no result";

/// Service for third-party place search and details
pub struct PlacesService<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: PlacesBackend + ?Sized> PlacesService<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Text search, optionally biased toward a location
    pub async fn search(
        &self,
        query: &str,
        location: Option<PlacesLocation>,
    ) -> ForklyResult<Vec<PlaceDetails>> {
        let query = non_empty(query, "Search query")?;
        let response = self
            .backend
            .lookup(&PlacesRequest::search(query, location))
            .await?;
        Ok(unwrap_response(response)?.unwrap_or_default())
    }

    /// Details for a known place
    pub async fn details(&self, place_id: &str) -> ForklyResult<PlaceDetails> {
        let place_id = non_empty(place_id, "Place ID")?;
        let response = self
            .backend
            .lookup(&PlacesRequest::details(place_id))
            .await?;
        first(unwrap_response(response)?)
    }

    /// Details of the best match for a query, in one round trip
    pub async fn search_and_details(
        &self,
        query: &str,
        location: Option<PlacesLocation>,
    ) -> ForklyResult<PlaceDetails> {
        let query = non_empty(query, "Search query")?;
        let response = self
            .backend
            .lookup(&PlacesRequest::search_and_details(query, location))
            .await?;
        first(unwrap_response(response)?)
    }
}

fn non_empty<'s>(value: &'s str, what: &str) -> ForklyResult<&'s str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ForklyError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(value)
}

/// Places of a successful response; `None` when it carried no data
fn unwrap_response(response: PlacesResponse) -> ForklyResult<Option<Vec<PlaceDetails>>> {
    if !response.success {
        let message = response.error.unwrap_or_else(|| NO_RESULT.to_string());
        debug!(%message, "places proxy reported failure");
        return Err(ForklyError::Places(message));
    }
    Ok(response.data.map(|data| data.into_places()))
}

fn first(places: Option<Vec<PlaceDetails>>) -> ForklyResult<PlaceDetails> {
    places
        .and_then(|places| places.into_iter().next())
        .ok_or_else(|| ForklyError::Places(NO_RESULT.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::FakeBackend;
    use crate::models::{PlacesAction, PlacesData};

    fn place(id: &str, name: &str) -> PlaceDetails {
        PlaceDetails {
            place_id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_trims_query() {
        let backend = FakeBackend::new();
        backend.set_places_response(PlacesResponse {
            success: true,
            data: Some(PlacesData::Many(vec![place("p1", "A"), place("p2", "B")])),
            error: None,
        });
        let service = PlacesService::new(&backend);

        let results = service.search("  padaria ", None).await.unwrap();
        assert_eq!(results.len(), 2);

        let sent = backend.places_requests();
        assert_eq!(sent[0].action, PlacesAction::Search);
        assert_eq!(sent[0].query.as_deref(), Some("padaria"));
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_locally() {
        let backend = FakeBackend::new();
        let service = PlacesService::new(&backend);

        assert!(service.search("   ", None).await.unwrap_err().is_validation());
        assert!(service.details("").await.unwrap_err().is_validation());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_carries_proxy_error() {
        let backend = FakeBackend::new();
        backend.set_places_response(PlacesResponse {
            success: false,
            data: None,
            error: Some("quota exceeded".into()),
        });
        let service = PlacesService::new(&backend);

        let err = service.details("p1").await.unwrap_err();
        assert!(matches!(err, ForklyError::Places(ref m) if m == "quota exceeded"));
    }

    #[tokio::test]
    async fn test_missing_data_is_no_result() {
        let backend = FakeBackend::new();
        let service = PlacesService::new(&backend);

        let err = service.search_and_details("bar", None).await.unwrap_err();
        assert!(matches!(err, ForklyError::Places(ref m) if m == "no result"));

        // A search with no data is just empty
        assert!(service.search("bar", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_details_single_place() {
        let backend = FakeBackend::new();
        backend.set_places_response(PlacesResponse {
            success: true,
            data: Some(PlacesData::One(place("p1", "Bar do Zé"))),
            error: None,
        });
        let service = PlacesService::new(&backend);

        assert_eq!(service.details("p1").await.unwrap().name, "Bar do Zé");
    }
}
