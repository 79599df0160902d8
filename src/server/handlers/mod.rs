pub mod polyline;
pub mod rest_areas;
pub mod saved_routes;
