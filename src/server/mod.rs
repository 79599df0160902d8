mod handlers;

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{polyline, rest_areas, saved_routes};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/rest_areas/along_route", post(rest_areas::along_route))
        .route("/rest_areas/nearby", get(rest_areas::nearby))
        .route("/polyline/decode", post(polyline::decode))
        .route(
            "/saved_routes",
            post(saved_routes::create)
                .get(saved_routes::list)
                .delete(saved_routes::clear),
        )
        .route(
            "/saved_routes/:id",
            get(saved_routes::find).delete(saved_routes::remove),
        )
        .route("/saved_routes/:id/access", patch(saved_routes::touch))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let listener = TcpListener::bind(addr).map_err(unexpected_error)?;

    serve_on(api, listener).await
}

/// Serves on an already bound listener, which lets callers pick port 0.
pub async fn serve_on<T: API + Sync + Send + 'static>(
    api: T,
    listener: TcpListener,
) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", listener.local_addr().map_err(unexpected_error)?);

    axum::Server::from_tcp(listener)
        .map_err(unexpected_error)?
        .serve(app.into_make_service())
        .await
        .map_err(unexpected_error)
}
