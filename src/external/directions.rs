use std::sync::Arc;

use crate::{
    cache::ResponseCache,
    entities::Coordinates,
    error::Error,
    external::google_maps::{DirectionsQuery, DirectionsResponse, MapsTransport},
};

/// Fetches routes from the provider, memoizing validated responses.
#[derive(Clone)]
pub struct DirectionsClient {
    transport: Arc<dyn MapsTransport>,
    cache: Arc<ResponseCache<DirectionsResponse>>,
}

impl DirectionsClient {
    pub fn new(
        transport: Arc<dyn MapsTransport>,
        cache: Arc<ResponseCache<DirectionsResponse>>,
    ) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &ResponseCache<DirectionsResponse> {
        &self.cache
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        waypoints: &[Coordinates],
    ) -> Result<DirectionsResponse, Error> {
        let query = DirectionsQuery {
            origin,
            destination,
            waypoints: waypoints.to_vec(),
        };
        let key = query.cache_key();

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let data = self.transport.directions(&query).await?;

        tracing::info!("fetched {} route(s)", data.routes.len());

        self.cache.put(key, data.clone());

        Ok(data)
    }
}
