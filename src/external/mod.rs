pub mod directions;
pub mod google_maps;
pub mod places;

#[doc(hidden)]
pub mod test_support;

pub use directions::DirectionsClient;
pub use google_maps::{GoogleMapsConfig, GoogleMapsTransport, MapsTransport};
pub use places::{NearbyPlacesClient, DEFAULT_RADIUS_METERS};
