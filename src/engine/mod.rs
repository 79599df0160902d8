mod debounced;
mod rest_stop_api;
mod sampler;
mod saved_route_api;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    api::API,
    cache::{CachePolicy, ResponseCache},
    config::Config,
    entities::SavedRoute,
    error::Error,
    external::{DirectionsClient, GoogleMapsTransport, MapsTransport, NearbyPlacesClient},
};

pub use debounced::{DebouncedNearbySearch, NearbyOutcome, NearbyResults};
pub use rest_stop_api::merge_places;
pub use sampler::{sample_route, DEFAULT_MAX_SAMPLES};

#[derive(Clone, Debug)]
pub struct EngineOptions {
    pub max_samples: usize,
    pub cache_policy: CachePolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
            cache_policy: CachePolicy::default(),
        }
    }
}

pub struct Engine {
    directions: DirectionsClient,
    places: NearbyPlacesClient,
    max_samples: usize,
    saved_routes: RwLock<Vec<SavedRoute>>,
}

impl Engine {
    /// Builds an engine with fresh directions and nearby-places caches.
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(transport: Arc<dyn MapsTransport>, options: EngineOptions) -> Self {
        let directions_cache = Arc::new(ResponseCache::with_policy(
            "directions",
            options.cache_policy.clone(),
        ));
        let places_cache = Arc::new(ResponseCache::with_policy(
            "nearby_places",
            options.cache_policy,
        ));

        Self::with_clients(
            DirectionsClient::new(transport.clone(), directions_cache),
            NearbyPlacesClient::new(transport, places_cache),
            options.max_samples,
        )
    }

    pub fn with_clients(
        directions: DirectionsClient,
        places: NearbyPlacesClient,
        max_samples: usize,
    ) -> Self {
        Self {
            directions,
            places,
            max_samples,
            saved_routes: RwLock::new(Vec::new()),
        }
    }

    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let transport = GoogleMapsTransport::new(config.google_maps())?;

        tracing::info!(
            "using {} with {} key",
            config.api_base,
            config.platform.as_str()
        );

        Ok(Self::new(Arc::new(transport), config.engine_options()))
    }

    pub fn directions(&self) -> &DirectionsClient {
        &self.directions
    }

    pub fn places(&self) -> &NearbyPlacesClient {
        &self.places
    }
}

impl API for Engine {}
