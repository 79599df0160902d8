use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, RestStop};

/// Decoded route geometry in traversal order.
pub type Route = Vec<Coordinates>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub max_detour_meters: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub route: Route,
    pub rest_areas: Vec<RestStop>,
}

impl DiscoveryResult {
    /// The "no route found" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty() && self.rest_areas.is_empty()
    }
}
