use super::{sample_route, Engine};

use std::collections::HashSet;

use async_trait::async_trait;
use futures::future::join_all;

use crate::{
    api::RestStopAPI,
    entities::{Coordinates, DiscoveryResult, RestStop},
    error::{aggregate_fetch_error, invalid_input_error, Error},
    external::{google_maps::PlacesResponse, DEFAULT_RADIUS_METERS},
    polyline,
};

#[async_trait]
impl RestStopAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn fetch_rest_areas_along_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        detour_meters: f64,
    ) -> Result<DiscoveryResult, Error> {
        check_point("origin", &origin)?;
        check_point("destination", &destination)?;
        check_radius(detour_meters)?;

        let directions = self
            .directions
            .get_directions(origin, destination, &[])
            .await?;

        let Some(first) = directions.routes.first() else {
            tracing::info!("no route found");
            return Ok(DiscoveryResult::empty());
        };

        let route = polyline::decode(&first.overview_polyline.points);
        let samples = sample_route(&route, self.max_samples);

        tracing::info!(
            "probing {} of {} route points within {:.0}m",
            samples.len(),
            route.len(),
            detour_meters
        );

        let rest_areas = self.search_around(&samples, detour_meters).await?;

        Ok(DiscoveryResult { route, rest_areas })
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_nearby_rest_areas(
        &self,
        location: Coordinates,
        radius_meters: Option<f64>,
    ) -> Result<Vec<RestStop>, Error> {
        let radius_meters = radius_meters.unwrap_or(DEFAULT_RADIUS_METERS);

        check_point("location", &location)?;
        check_radius(radius_meters)?;

        self.search_around(&[location], radius_meters).await
    }

    fn decode_polyline(&self, encoded: &str) -> Vec<Coordinates> {
        polyline::decode(encoded)
    }
}

impl Engine {
    /// Looks up places around every point concurrently and merges them in
    /// request order. Failed lookups contribute nothing unless all of them
    /// fail.
    async fn search_around(
        &self,
        points: &[Coordinates],
        radius_meters: f64,
    ) -> Result<Vec<RestStop>, Error> {
        if points.is_empty() {
            return Ok(vec![]);
        }

        let lookups = points
            .iter()
            .map(|point| self.places.get_nearby_places(*point, radius_meters));
        let outcomes = join_all(lookups).await;

        let mut responses = Vec::with_capacity(outcomes.len());
        let mut last_error = None;

        for (point, outcome) in points.iter().zip(outcomes) {
            match outcome {
                Ok(data) => responses.push((*point, data)),
                Err(err) => {
                    tracing::warn!("nearby lookup around {} failed: {}", point, err);
                    last_error = Some(err);
                }
            }
        }

        if responses.is_empty() {
            return Err(aggregate_fetch_error(points.len(), last_error.as_ref()));
        }

        Ok(merge_places(&responses, radius_meters))
    }
}

/// Flattens `(probe point, response)` pairs into rest stops.
///
/// Places farther than `radius_meters` from the probe point that returned them
/// are dropped. Among the remaining sightings, the first one of a place id wins.
pub fn merge_places(
    responses: &[(Coordinates, PlacesResponse)],
    radius_meters: f64,
) -> Vec<RestStop> {
    let mut seen = HashSet::new();
    let mut stops = Vec::new();

    for (probe, data) in responses {
        for place in &data.results {
            let location = Coordinates::from(place.geometry.location);

            if probe.distance_meters(&location) > radius_meters {
                tracing::debug!("dropping {} outside the search radius", place.place_id);
                continue;
            }

            if seen.insert(place.place_id.as_str()) {
                stops.push(RestStop::from(place));
            }
        }
    }

    stops
}

fn check_point(name: &str, point: &Coordinates) -> Result<(), Error> {
    if !point.is_valid() {
        return Err(invalid_input_error(format!("{} out of range: {}", name, point)));
    }

    Ok(())
}

fn check_radius(radius_meters: f64) -> Result<(), Error> {
    // the provider takes whole meters
    if !radius_meters.is_finite() || radius_meters < 1.0 {
        return Err(invalid_input_error(format!(
            "search radius must be at least 1 meter, got {}",
            radius_meters
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::test_support::{place, places};

    fn at(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    #[test]
    fn first_sighting_wins() {
        let probe_a = at(42.0, -71.0);
        let probe_b = at(42.01, -71.0);

        let responses = vec![
            (
                probe_a,
                places(vec![
                    place("X", "From A", at(42.001, -71.0)),
                    place("Y", "Only A", at(42.002, -71.0)),
                ]),
            ),
            (
                probe_b,
                places(vec![
                    place("X", "From B", at(42.009, -71.0)),
                    place("Z", "Only B", at(42.011, -71.0)),
                ]),
            ),
        ];

        let stops = merge_places(&responses, 5000.0);
        let ids: Vec<_> = stops.iter().map(|stop| stop.id.as_str()).collect();

        assert_eq!(ids, vec!["X", "Y", "Z"]);
        assert_eq!(stops[0].name, "From A");
    }

    #[test]
    fn drops_places_outside_radius() {
        let probe = at(42.0, -71.0);
        let responses = vec![(
            probe,
            places(vec![
                place("near", "Near", at(42.001, -71.0)),
                place("far", "Far", at(43.0, -71.0)),
            ]),
        )];

        let stops = merge_places(&responses, 1000.0);

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].id, "near");
    }

    #[test]
    fn out_of_radius_sighting_does_not_claim_the_id() {
        let responses = vec![
            (at(0.0, 0.0), places(vec![place("X", "Far", at(0.5, 0.0))])),
            (at(0.5, 0.0), places(vec![place("X", "Near", at(0.5, 0.0))])),
        ];

        let stops = merge_places(&responses, 1000.0);

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name, "Near");
    }

    #[test]
    fn rejects_bad_radius() {
        assert!(check_radius(0.0).is_err());
        assert!(check_radius(-5.0).is_err());
        assert!(check_radius(f64::INFINITY).is_err());
        assert!(check_radius(f64::NAN).is_err());
        assert!(check_radius(0.4).is_err());
        assert!(check_radius(0.999).is_err());
        assert!(check_radius(1.0).is_ok());
        assert!(check_radius(16093.0).is_ok());
    }
}
