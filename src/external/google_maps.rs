use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{
    entities::Coordinates,
    error::{provider_error, unexpected_error, Error},
};

pub const DEFAULT_API_BASE: &str = "https://maps.googleapis.com/maps/api";

pub const REST_STOP_PLACE_TYPES: &str = "gas_station|restaurant|cafe";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderStatus {
    #[default]
    Ok,
    ZeroResults,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    NotFound,
    UnknownError,
    #[serde(other)]
    Unrecognized,
}

impl ProviderStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok | Self::ZeroResults)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::NotFound => "NOT_FOUND",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub status: ProviderStatus,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    pub overview_polyline: OverviewPolyline,
    #[serde(default)]
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacesResponse {
    #[serde(default)]
    pub status: ProviderStatus,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(location: LatLng) -> Self {
        Self {
            latitude: location.lat,
            longitude: location.lng,
        }
    }
}

/// Responses that carry a provider status and an optional error message.
pub trait ProviderEnvelope {
    fn status(&self) -> ProviderStatus;
    fn error_message(&self) -> Option<&str>;

    /// Rejects payloads whose status is not a success.
    fn validate(self) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let status = self.status();

        if !status.is_success() {
            return Err(provider_error(status.as_str(), self.error_message()));
        }

        Ok(self)
    }
}

impl ProviderEnvelope for DirectionsResponse {
    fn status(&self) -> ProviderStatus {
        self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl ProviderEnvelope for PlacesResponse {
    fn status(&self) -> ProviderStatus {
        self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionsQuery {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub waypoints: Vec<Coordinates>,
}

impl DirectionsQuery {
    pub fn waypoints_param(&self) -> Option<String> {
        if self.waypoints.is_empty() {
            return None;
        }

        let joined = self
            .waypoints
            .iter()
            .map(|waypoint| waypoint.to_string())
            .collect::<Vec<_>>()
            .join("|");

        Some(joined)
    }

    /// Built from the parameters exactly as they are sent.
    pub fn cache_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.origin,
            self.destination,
            self.waypoints_param().unwrap_or_default()
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NearbyQuery {
    pub location: Coordinates,
    pub radius_meters: f64,
}

impl NearbyQuery {
    pub fn radius_param(&self) -> String {
        format!("{:.0}", self.radius_meters)
    }

    pub fn cache_key(&self) -> String {
        format!("{}-{}", self.location, self.radius_param())
    }
}

/// The wire seam between the engine and the mapping provider.
#[async_trait]
pub trait MapsTransport: Send + Sync {
    async fn directions(&self, query: &DirectionsQuery) -> Result<DirectionsResponse, Error>;
    async fn nearby_places(&self, query: &NearbyQuery) -> Result<PlacesResponse, Error>;
}

#[derive(Clone, Debug)]
pub struct GoogleMapsConfig {
    pub api_base: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GoogleMapsTransport {
    config: GoogleMapsConfig,
    client: reqwest::Client,
}

impl GoogleMapsTransport {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(unexpected_error)?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn fetch<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T, Error> {
        let res = req.query(&[("key", &self.config.api_key)]).send().await?;

        let status_code = res.status();
        if !status_code.is_success() {
            return Err(provider_error(status_code.as_str(), status_code.canonical_reason()));
        }

        let body = res.text().await?;

        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!("malformed provider payload: {}", err);
            provider_error("MALFORMED_PAYLOAD", Some(&err.to_string()))
        })
    }
}

#[async_trait]
impl MapsTransport for GoogleMapsTransport {
    #[tracing::instrument(skip(self))]
    async fn directions(&self, query: &DirectionsQuery) -> Result<DirectionsResponse, Error> {
        let mut req = self
            .client
            .get(self.url("directions/json"))
            .query(&[("origin", query.origin.to_string())])
            .query(&[("destination", query.destination.to_string())]);

        if let Some(waypoints) = query.waypoints_param() {
            req = req.query(&[("waypoints", waypoints)]);
        }

        let data: DirectionsResponse = self.fetch(req).await?;

        data.validate()
    }

    #[tracing::instrument(skip(self))]
    async fn nearby_places(&self, query: &NearbyQuery) -> Result<PlacesResponse, Error> {
        let req = self
            .client
            .get(self.url("place/nearbysearch/json"))
            .query(&[("location", query.location.to_string())])
            .query(&[("radius", query.radius_param())])
            .query(&[("type", REST_STOP_PLACE_TYPES)]);

        let data: PlacesResponse = self.fetch(req).await?;

        data.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn at(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    #[test]
    fn missing_status_reads_as_ok() {
        let data: DirectionsResponse = serde_json::from_value(json!({ "routes": [] })).unwrap();

        assert_eq!(data.status, ProviderStatus::Ok);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn unknown_status_is_a_provider_error() {
        let data: PlacesResponse = serde_json::from_value(json!({
            "status": "SOMETHING_NEW",
            "results": []
        }))
        .unwrap();

        assert_eq!(data.status, ProviderStatus::Unrecognized);
        assert_eq!(data.validate().unwrap_err().kind(), ErrorKind::Provider);
    }

    #[test]
    fn denied_request_keeps_message() {
        let data: PlacesResponse = serde_json::from_value(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }))
        .unwrap();

        let err = data.validate().unwrap_err();
        assert!(err.message.contains("REQUEST_DENIED"));
        assert!(err.message.contains("API key is invalid"));
    }

    #[test]
    fn zero_results_is_success() {
        let data: PlacesResponse =
            serde_json::from_value(json!({ "status": "ZERO_RESULTS", "results": [] })).unwrap();

        assert!(data.validate().unwrap().results.is_empty());
    }

    #[test]
    fn directions_keys_follow_waypoint_order() {
        let a = at(1.0, 2.0);
        let b = at(3.0, 4.0);

        let forward = DirectionsQuery {
            origin: at(0.0, 0.0),
            destination: at(5.0, 5.0),
            waypoints: vec![a, b],
        };
        let backward = DirectionsQuery {
            waypoints: vec![b, a],
            ..forward.clone()
        };
        let none = DirectionsQuery {
            waypoints: vec![],
            ..forward.clone()
        };

        assert_ne!(forward.cache_key(), backward.cache_key());
        assert_ne!(forward.cache_key(), none.cache_key());
        assert_eq!(
            forward.waypoints_param().as_deref(),
            Some("1.000000,2.000000|3.000000,4.000000")
        );
        assert_eq!(none.waypoints_param(), None);
    }

    #[test]
    fn nearby_keys_use_sent_precision() {
        let first = NearbyQuery {
            location: at(42.36010001, -71.0589),
            radius_meters: 5000.2,
        };
        let second = NearbyQuery {
            location: at(42.3601, -71.0589),
            radius_meters: 5000.0,
        };
        let wider = NearbyQuery {
            radius_meters: 8000.0,
            ..second.clone()
        };

        assert_eq!(first.cache_key(), second.cache_key());
        assert_ne!(second.cache_key(), wider.cache_key());
        assert_eq!(second.cache_key(), "42.360100,-71.058900-5000");
    }
}
