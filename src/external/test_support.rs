use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    entities::Coordinates,
    error::Error,
    external::google_maps::{
        DirectionsQuery, DirectionsResponse, DirectionsRoute, Geometry, LatLng, MapsTransport,
        NearbyQuery, OverviewPolyline, PlaceResult, PlacesResponse, ProviderStatus,
    },
    polyline,
};

#[derive(Debug)]
pub struct StubMapsTransport {
    directions: Result<DirectionsResponse, Error>,
    places: HashMap<String, Result<PlacesResponse, Error>>,
    default_places: Result<PlacesResponse, Error>,
    delays: HashMap<String, Duration>,
    directions_calls: AtomicUsize,
    places_queries: Mutex<Vec<NearbyQuery>>,
}

impl Default for StubMapsTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl StubMapsTransport {
    /// No routes and no places anywhere.
    pub fn new() -> Self {
        Self {
            directions: Ok(DirectionsResponse::default()),
            places: HashMap::new(),
            default_places: Ok(PlacesResponse::default()),
            delays: HashMap::new(),
            directions_calls: AtomicUsize::new(0),
            places_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_directions(mut self, response: Result<DirectionsResponse, Error>) -> Self {
        self.directions = response;
        self
    }

    /// Answers nearby queries centred on `location`, whatever the radius.
    pub fn with_places_at(
        mut self,
        location: Coordinates,
        response: Result<PlacesResponse, Error>,
    ) -> Self {
        self.places.insert(location.to_string(), response);
        self
    }

    pub fn with_default_places(mut self, response: Result<PlacesResponse, Error>) -> Self {
        self.default_places = response;
        self
    }

    /// Delays nearby answers for `location`, to shuffle completion order.
    pub fn with_delay_at(mut self, location: Coordinates, delay: Duration) -> Self {
        self.delays.insert(location.to_string(), delay);
        self
    }

    pub fn directions_calls(&self) -> usize {
        self.directions_calls.load(Ordering::SeqCst)
    }

    pub fn places_calls(&self) -> usize {
        self.places_queries().len()
    }

    pub fn places_queries(&self) -> Vec<NearbyQuery> {
        self.places_queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MapsTransport for StubMapsTransport {
    async fn directions(&self, _query: &DirectionsQuery) -> Result<DirectionsResponse, Error> {
        self.directions_calls.fetch_add(1, Ordering::SeqCst);
        self.directions.clone()
    }

    async fn nearby_places(&self, query: &NearbyQuery) -> Result<PlacesResponse, Error> {
        self.places_queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());

        let key = query.location.to_string();

        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }

        self.places
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default_places.clone())
    }
}

pub fn place(id: &str, name: &str, at: Coordinates) -> PlaceResult {
    PlaceResult {
        place_id: id.into(),
        name: name.into(),
        geometry: Geometry {
            location: LatLng {
                lat: at.latitude,
                lng: at.longitude,
            },
        },
        rating: None,
        types: vec![],
        vicinity: None,
    }
}

pub fn places(results: Vec<PlaceResult>) -> PlacesResponse {
    let status = if results.is_empty() {
        ProviderStatus::ZeroResults
    } else {
        ProviderStatus::Ok
    };

    PlacesResponse {
        status,
        results,
        error_message: None,
    }
}

/// A single-route response whose overview polyline encodes `path`.
pub fn directions_along(path: &[Coordinates]) -> DirectionsResponse {
    DirectionsResponse {
        status: ProviderStatus::Ok,
        routes: vec![DirectionsRoute {
            overview_polyline: OverviewPolyline {
                points: polyline::encode(path),
            },
            summary: String::new(),
        }],
        error_message: None,
    }
}

pub fn no_routes() -> DirectionsResponse {
    DirectionsResponse {
        status: ProviderStatus::ZeroResults,
        routes: vec![],
        error_message: None,
    }
}
