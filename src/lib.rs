pub mod api;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod polyline;
pub mod server;
