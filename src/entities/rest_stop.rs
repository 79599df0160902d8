use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::external::google_maps::PlaceResult;

/// A point of interest a traveller can pull over at.
///
/// Identity is the provider place id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestStop {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub types: Vec<String>,
    pub vicinity: String,
}

impl RestStop {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl From<&PlaceResult> for RestStop {
    fn from(place: &PlaceResult) -> Self {
        Self {
            id: place.place_id.clone(),
            name: place.name.clone(),
            latitude: place.geometry.location.lat,
            longitude: place.geometry.location.lng,
            rating: place.rating.unwrap_or(0.0),
            types: place.types.clone(),
            vicinity: place.vicinity.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fills_missing_optional_fields() {
        let place: PlaceResult = serde_json::from_value(json!({
            "place_id": "abc",
            "name": "Big Oak Area",
            "geometry": { "location": { "lat": 43.615, "lng": -116.2019 } }
        }))
        .unwrap();

        let stop = RestStop::from(&place);

        assert_eq!(stop.id, "abc");
        assert_eq!(stop.rating, 0.0);
        assert!(stop.types.is_empty());
        assert_eq!(stop.vicinity, "");
        assert_eq!(stop.coordinates().latitude, 43.615);
    }

    #[test]
    fn keeps_provider_fields() {
        let place: PlaceResult = serde_json::from_value(json!({
            "place_id": "xyz",
            "name": "River View Stop",
            "geometry": { "location": { "lat": 43.5, "lng": -116.25 } },
            "rating": 4.5,
            "types": ["gas_station", "convenience_store"],
            "vicinity": "1 River Rd"
        }))
        .unwrap();

        let stop = RestStop::from(&place);

        assert_eq!(stop.rating, 4.5);
        assert_eq!(stop.types, vec!["gas_station", "convenience_store"]);
        assert_eq!(stop.vicinity, "1 River Rd");
    }
}
