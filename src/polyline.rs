use crate::entities::{Coordinates, Route};

const PRECISION: f64 = 1e5;

const CHUNK_OFFSET: i64 = 63;

const CONTINUATION_BIT: i64 = 0x20;

const CHUNK_MASK: i64 = 0x1f;

/// Decodes an encoded polyline into coordinates.
///
/// An empty string yields an empty route. Malformed or truncated input never
/// panics: decoding stops at the last complete latitude/longitude pair.
pub fn decode(encoded: &str) -> Route {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut route = Vec::new();

    while index < bytes.len() {
        let Some(delta_lat) = next_value(bytes, &mut index) else {
            break;
        };
        let Some(delta_lng) = next_value(bytes, &mut index) else {
            break;
        };

        lat = lat.wrapping_add(delta_lat);
        lng = lng.wrapping_add(delta_lng);

        route.push(Coordinates {
            latitude: lat as f64 / PRECISION,
            longitude: lng as f64 / PRECISION,
        });
    }

    route
}

/// Same as [`decode`], treating a missing polyline as empty.
pub fn decode_optional(encoded: Option<&str>) -> Route {
    encoded.map(decode).unwrap_or_default()
}

fn next_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index)?;
        *index += 1;

        let chunk = i64::from(byte) - CHUNK_OFFSET;
        if chunk < 0 || shift > 60 {
            return None;
        }

        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk < CONTINUATION_BIT {
            break;
        }
    }

    if result & 1 == 1 {
        Some(!(result >> 1))
    } else {
        Some(result >> 1)
    }
}

/// Encodes coordinates into the polyline format, rounding to 1e-5 degrees.
pub fn encode(route: &[Coordinates]) -> String {
    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in route {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lng = (point.longitude * PRECISION).round() as i64;

        push_value(lat - prev_lat, &mut encoded);
        push_value(lng - prev_lng, &mut encoded);

        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn push_value(delta: i64, encoded: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;

    while value >= CONTINUATION_BIT as u64 {
        let chunk = (value & CHUNK_MASK as u64) | CONTINUATION_BIT as u64;
        encoded.push(char::from((chunk + CHUNK_OFFSET as u64) as u8));
        value >>= 5;
    }

    encoded.push(char::from((value + CHUNK_OFFSET as u64) as u8));
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn assert_close(actual: &Coordinates, lat: f64, lng: f64) {
        assert!(
            (actual.latitude - lat).abs() < 1e-5 && (actual.longitude - lng).abs() < 1e-5,
            "expected ({}, {}), got {:?}",
            lat,
            lng,
            actual
        );
    }

    #[test]
    fn decodes_reference_polyline() {
        let route = decode(REFERENCE);

        assert_eq!(route.len(), 3);
        assert_close(&route[0], 38.5, -120.2);
        assert_close(&route[1], 40.7, -120.95);
        assert_close(&route[2], 43.252, -126.453);
    }

    #[test]
    fn encodes_reference_polyline() {
        let route = vec![
            Coordinates { latitude: 38.5, longitude: -120.2 },
            Coordinates { latitude: 40.7, longitude: -120.95 },
            Coordinates { latitude: 43.252, longitude: -126.453 },
        ];

        assert_eq!(encode(&route), REFERENCE);
    }

    #[test]
    fn empty_and_missing_input() {
        assert!(decode("").is_empty());
        assert!(decode_optional(None).is_empty());
        assert!(decode_optional(Some("")).is_empty());
    }

    #[test]
    fn round_trip_within_precision() {
        let route = vec![
            Coordinates { latitude: 42.3601, longitude: -71.0589 },
            Coordinates { latitude: 41.823_987, longitude: -71.412_834 },
            Coordinates { latitude: 41.308_274, longitude: -72.927_883 },
            Coordinates { latitude: 40.7128, longitude: -74.0060 },
            Coordinates { latitude: -33.868_82, longitude: 151.209_29 },
            Coordinates { latitude: 0.0, longitude: 0.0 },
        ];

        let decoded = decode(&encode(&route));

        assert_eq!(decoded.len(), route.len());
        for (original, decoded) in route.iter().zip(decoded.iter()) {
            assert_close(decoded, original.latitude, original.longitude);
        }
    }

    #[test]
    fn truncated_input_keeps_complete_pairs() {
        // drop the final longitude of the reference polyline
        let truncated = &REFERENCE[..REFERENCE.len() - 4];
        let route = decode(truncated);

        assert_eq!(route.len(), 2);
        assert_close(&route[1], 40.7, -120.95);
    }

    #[test]
    fn garbage_does_not_panic() {
        assert!(decode("\u{1}\u{2}").is_empty());
        let _ = decode("~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~");
        let _ = decode("ÿÿÿ");
    }
}
