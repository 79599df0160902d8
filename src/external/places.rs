use std::sync::Arc;

use crate::{
    cache::ResponseCache,
    entities::Coordinates,
    error::Error,
    external::google_maps::{MapsTransport, NearbyQuery, PlacesResponse},
};

pub const DEFAULT_RADIUS_METERS: f64 = 5000.0;

/// Fetches gas stations, restaurants and cafes around a point, memoizing
/// validated responses.
#[derive(Clone)]
pub struct NearbyPlacesClient {
    transport: Arc<dyn MapsTransport>,
    cache: Arc<ResponseCache<PlacesResponse>>,
}

impl NearbyPlacesClient {
    pub fn new(
        transport: Arc<dyn MapsTransport>,
        cache: Arc<ResponseCache<PlacesResponse>>,
    ) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &ResponseCache<PlacesResponse> {
        &self.cache
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_nearby_places(
        &self,
        location: Coordinates,
        radius_meters: f64,
    ) -> Result<PlacesResponse, Error> {
        let query = NearbyQuery {
            location,
            radius_meters,
        };
        let key = query.cache_key();

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let data = self.transport.nearby_places(&query).await?;

        tracing::debug!("fetched {} place(s)", data.results.len());

        self.cache.put(key, data.clone());

        Ok(data)
    }
}
