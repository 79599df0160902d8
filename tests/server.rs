use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use roadside::engine::{Engine, EngineOptions};
use roadside::entities::{Coordinates, DiscoveryResult, RestStop, SavedRoute};
use roadside::error::provider_error;
use roadside::external::test_support::{directions_along, place, places, StubMapsTransport};
use roadside::server::serve_on;

fn at(latitude: f64, longitude: f64) -> Coordinates {
    Coordinates {
        latitude,
        longitude,
    }
}

fn path() -> Vec<Coordinates> {
    (0..5).map(|i| at(42.0 - i as f64 * 0.1, -71.0)).collect()
}

fn spawn(transport: StubMapsTransport) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let engine = Engine::new(Arc::new(transport), EngineOptions::default());

    tokio::spawn(async move {
        serve_on(engine, listener).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn decodes_polylines() {
    let addr = spawn(StubMapsTransport::new());
    let client = reqwest::Client::new();

    let route: Vec<Coordinates> = client
        .post(format!("http://{}/polyline/decode", addr))
        .json(&json!({ "encoded": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(route.len(), 3);
    assert!((route[0].latitude - 38.5).abs() < 1e-9);
    assert!((route[2].longitude + 126.453).abs() < 1e-9);

    let route: Vec<Coordinates> = client
        .post(format!("http://{}/polyline/decode", addr))
        .json(&json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(route.is_empty());
}

#[tokio::test]
async fn finds_rest_areas_along_route() {
    let path = path();
    let transport = StubMapsTransport::new()
        .with_directions(Ok(directions_along(&path)))
        .with_places_at(
            path[2],
            Ok(places(vec![place("ChIJ-mid", "Midway Plaza", at(41.801, -71.0))])),
        );
    let addr = spawn(transport);

    let response = reqwest::Client::new()
        .post(format!("http://{}/rest_areas/along_route", addr))
        .json(&json!({
            "origin": path[0],
            "destination": path[4],
            "max_detour_meters": 5000.0,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let result: DiscoveryResult = response.json().await.unwrap();
    assert_eq!(result.route.len(), 5);
    assert_eq!(result.rest_areas.len(), 1);
    assert_eq!(result.rest_areas[0].id, "ChIJ-mid");
}

#[tokio::test]
async fn maps_errors_to_status_codes() {
    let transport = StubMapsTransport::new()
        .with_directions(Ok(directions_along(&path())))
        .with_default_places(Err(provider_error("OVER_QUERY_LIMIT", None)));
    let addr = spawn(transport);
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/rest_areas/nearby", addr))
        .query(&[("latitude", "91.0"), ("longitude", "0.0")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("http://{}/rest_areas/along_route", addr))
        .json(&json!({
            "origin": at(42.0, -71.0),
            "destination": at(41.6, -71.0),
            "max_detour_meters": 5000.0,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 6);
    assert!(body["error"].as_str().unwrap().contains("OVER_QUERY_LIMIT"));
}

#[tokio::test]
async fn nearby_uses_query_radius() {
    let transport = StubMapsTransport::new().with_places_at(
        at(42.3601, -71.0589),
        Ok(places(vec![place("ChIJ-near", "Harbor Cafe", at(42.361, -71.058))])),
    );
    let addr = spawn(transport);

    let stops: Vec<RestStop> = reqwest::Client::new()
        .get(format!("http://{}/rest_areas/nearby", addr))
        .query(&[("latitude", "42.3601"), ("longitude", "-71.0589"), ("radius", "2500")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].name, "Harbor Cafe");
}

#[tokio::test]
async fn saved_route_lifecycle() {
    let addr = spawn(StubMapsTransport::new());
    let client = reqwest::Client::new();
    let base = format!("http://{}/saved_routes", addr);

    let saved: SavedRoute = client
        .post(&base)
        .json(&json!({
            "name": "Weekend",
            "origin": { "name": "Boston", "coordinates": at(42.3601, -71.0589) },
            "destination": { "name": "New York", "coordinates": at(40.7128, -74.006) },
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved.name, "Weekend");
    assert!(saved.stops.is_empty());

    let listed: Vec<SavedRoute> = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, vec![saved.clone()]);

    let touched: SavedRoute = client
        .patch(format!("{}/{}/access", base, saved.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(touched.last_accessed.is_some());

    let response = client
        .delete(format!("{}/{}", base, saved.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/{}", base, saved.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .post(&base)
        .json(&json!({
            "name": " ",
            "origin": { "name": "Boston", "coordinates": at(42.3601, -71.0589) },
            "destination": { "name": "New York", "coordinates": at(40.7128, -74.006) },
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
