use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{Location, RestStop, SavedRoute};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    name: String,
    origin: Location,
    destination: Location,
    #[serde(default)]
    stops: Vec<RestStop>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<SavedRoute>, Error> {
    let route = api
        .save_route(params.name, params.origin, params.destination, params.stops)
        .await?;

    Ok(route.into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<SavedRoute>>, Error> {
    let routes = api.list_saved_routes().await?;

    Ok(routes.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedRoute>, Error> {
    let route = api.find_saved_route(id).await?;

    Ok(route.into())
}

pub async fn touch(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedRoute>, Error> {
    let route = api.touch_saved_route(id).await?;

    Ok(route.into())
}

pub async fn remove(Extension(api): Extension<DynAPI>, Path(id): Path<Uuid>) -> Result<(), Error> {
    api.remove_saved_route(id).await
}

pub async fn clear(Extension(api): Extension<DynAPI>) -> Result<(), Error> {
    api.clear_saved_routes().await
}
