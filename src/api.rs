use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Coordinates, DiscoveryResult, Location, RestStop, SavedRoute};
use crate::error::Error;

#[async_trait]
pub trait RestStopAPI {
    async fn fetch_rest_areas_along_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        detour_meters: f64,
    ) -> Result<DiscoveryResult, Error>;

    async fn fetch_nearby_rest_areas(
        &self,
        location: Coordinates,
        radius_meters: Option<f64>,
    ) -> Result<Vec<RestStop>, Error>;

    fn decode_polyline(&self, encoded: &str) -> Vec<Coordinates>;
}

#[async_trait]
pub trait SavedRouteAPI {
    async fn save_route(
        &self,
        name: String,
        origin: Location,
        destination: Location,
        stops: Vec<RestStop>,
    ) -> Result<SavedRoute, Error>;

    async fn find_saved_route(&self, id: Uuid) -> Result<SavedRoute, Error>;

    async fn list_saved_routes(&self) -> Result<Vec<SavedRoute>, Error>;

    async fn touch_saved_route(&self, id: Uuid) -> Result<SavedRoute, Error>;

    async fn remove_saved_route(&self, id: Uuid) -> Result<(), Error>;

    async fn clear_saved_routes(&self) -> Result<(), Error>;
}

pub trait API: RestStopAPI + SavedRouteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
