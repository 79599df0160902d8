use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::{
    api::RestStopAPI,
    config::Config,
    debounce::Debouncer,
    entities::{Coordinates, RestStop},
    error::Error,
};

/// The answer to one debounced search, tagged with the request it answers.
#[derive(Debug)]
pub struct NearbyOutcome {
    pub location: Coordinates,
    pub radius_meters: Option<f64>,
    pub result: Result<Vec<RestStop>, Error>,
}

pub type NearbyResults = mpsc::UnboundedReceiver<NearbyOutcome>;

type SearchArgs = (u64, Coordinates, Option<f64>);

/// `fetch_nearby_rest_areas` for interactive callers such as a panning map.
///
/// Bursts of [`search`](Self::search) calls collapse into one lookup with the
/// arguments of the last call. A lookup that finishes after a newer call was
/// made is discarded, so only the answer to the latest call is delivered.
pub struct DebouncedNearbySearch {
    debouncer: Debouncer<SearchArgs>,
    generation: Arc<AtomicU64>,
}

impl DebouncedNearbySearch {
    pub fn new<T>(api: Arc<T>, wait: Duration) -> (Self, NearbyResults)
    where
        T: RestStopAPI + Send + Sync + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let generation = Arc::new(AtomicU64::new(0));
        let latest = Arc::clone(&generation);

        let debouncer = Debouncer::new(
            wait,
            move |(issued, location, radius_meters): SearchArgs| {
                let api = Arc::clone(&api);
                let latest = Arc::clone(&latest);
                let tx = tx.clone();

                async move {
                    let result = api.fetch_nearby_rest_areas(location, radius_meters).await;

                    if latest.load(Ordering::SeqCst) != issued {
                        tracing::debug!("discarding superseded nearby lookup around {}", location);
                        return;
                    }

                    let outcome = NearbyOutcome {
                        location,
                        radius_meters,
                        result,
                    };

                    if tx.send(outcome).is_err() {
                        tracing::debug!("nearby results dropped, receiver is gone");
                    }
                }
            },
        );

        (
            Self {
                debouncer,
                generation,
            },
            rx,
        )
    }

    /// Uses the configured quiet period.
    pub fn from_config<T>(api: Arc<T>, config: &Config) -> (Self, NearbyResults)
    where
        T: RestStopAPI + Send + Sync + ?Sized + 'static,
    {
        Self::new(api, config.debounce_wait)
    }

    pub fn search(&self, location: Coordinates, radius_meters: Option<f64>) {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.debouncer.schedule((issued, location, radius_meters));
    }

    /// Drops the pending call and abandons any lookup already in flight.
    pub fn cancel_pending(&self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);

        self.debouncer.cancel_pending()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
