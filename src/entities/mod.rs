mod location;
mod rest_stop;
mod route;
mod saved_route;

pub use location::{miles_to_meters, Coordinates, Location};
pub use rest_stop::RestStop;
pub use route::{DiscoveryRequest, DiscoveryResult, Route};
pub use saved_route::SavedRoute;
