use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Location, RestStop};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    pub id: Uuid,
    pub name: String,
    pub origin: Location,
    pub destination: Location,
    pub stops: Vec<RestStop>,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl SavedRoute {
    pub fn new(
        name: String,
        origin: Location,
        destination: Location,
        stops: Vec<RestStop>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            origin,
            destination,
            stops,
            created_at: Utc::now(),
            last_accessed: None,
        }
    }

    pub fn touch(&mut self) {
        self.last_accessed = Some(Utc::now());
    }
}
