use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::SavedRouteAPI,
    entities::{Location, RestStop, SavedRoute},
    error::{invalid_input_error, not_found_error, Error},
};

#[async_trait]
impl SavedRouteAPI for Engine {
    #[tracing::instrument(skip(self, stops))]
    async fn save_route(
        &self,
        name: String,
        origin: Location,
        destination: Location,
        stops: Vec<RestStop>,
    ) -> Result<SavedRoute, Error> {
        if name.trim().is_empty() {
            return Err(invalid_input_error("route name is empty"));
        }

        if !origin.coordinates.is_valid() || !destination.coordinates.is_valid() {
            return Err(invalid_input_error("route endpoints out of range"));
        }

        let route = SavedRoute::new(name, origin, destination, stops);

        self.saved_routes.write().await.push(route.clone());

        tracing::info!("saved route {}", route.id);

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn find_saved_route(&self, id: Uuid) -> Result<SavedRoute, Error> {
        self.saved_routes
            .read()
            .await
            .iter()
            .find(|route| route.id == id)
            .cloned()
            .ok_or_else(not_found_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list_saved_routes(&self) -> Result<Vec<SavedRoute>, Error> {
        Ok(self.saved_routes.read().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn touch_saved_route(&self, id: Uuid) -> Result<SavedRoute, Error> {
        let mut routes = self.saved_routes.write().await;

        let route = routes
            .iter_mut()
            .find(|route| route.id == id)
            .ok_or_else(not_found_error)?;
        route.touch();

        Ok(route.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn remove_saved_route(&self, id: Uuid) -> Result<(), Error> {
        let mut routes = self.saved_routes.write().await;

        let index = routes
            .iter()
            .position(|route| route.id == id)
            .ok_or_else(not_found_error)?;
        routes.remove(index);

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn clear_saved_routes(&self) -> Result<(), Error> {
        self.saved_routes.write().await.clear();

        Ok(())
    }
}
