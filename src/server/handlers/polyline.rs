use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::Coordinates;

#[derive(Serialize, Deserialize)]
pub struct DecodeParams {
    encoded: Option<String>,
}

pub async fn decode(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<DecodeParams>,
) -> Json<Vec<Coordinates>> {
    let route = api.decode_polyline(params.encoded.as_deref().unwrap_or_default());

    route.into()
}
