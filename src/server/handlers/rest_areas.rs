use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Coordinates, DiscoveryRequest, DiscoveryResult, RestStop};
use crate::error::Error;

pub async fn along_route(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<DiscoveryRequest>,
) -> Result<Json<DiscoveryResult>, Error> {
    let result = api
        .fetch_rest_areas_along_route(
            params.origin,
            params.destination,
            params.max_detour_meters,
        )
        .await?;

    Ok(result.into())
}

#[derive(Serialize, Deserialize)]
pub struct NearbyParams {
    latitude: f64,
    longitude: f64,
    radius: Option<f64>,
}

pub async fn nearby(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<RestStop>>, Error> {
    let location = Coordinates::new(params.latitude, params.longitude)?;
    let stops = api.fetch_nearby_rest_areas(location, params.radius).await?;

    Ok(stops.into())
}
