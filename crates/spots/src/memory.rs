//! A [`Database`] keeping spots in memory, for tests.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use model::spot::Spot;
use utility::geo;

use crate::database::{Database, DatabaseError, Result, SpotRepo};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredSpot {
    pub id: String,
    pub name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
}

impl StoredSpot {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            website: None,
            description: None,
            latitude,
            longitude,
            rating: 0.0,
        }
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    fn to_model(&self, center_latitude: f64, center_longitude: f64) -> Spot {
        Spot {
            id: self.id.clone(),
            name: self.name.clone(),
            location: format!("POINT({} {})", self.longitude, self.latitude),
            website: self.website.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            rating: self.rating,
            distance: geo::haversine_distance_m(
                center_latitude,
                center_longitude,
                self.latitude,
                self.longitude,
            ),
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    spots: Vec<StoredSpot>,
    unavailable: AtomicBool,
    latency: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    shared: Arc<Shared>,
}

impl MemoryDatabase {
    pub fn new(spots: Vec<StoredSpot>) -> Self {
        Self {
            shared: Arc::new(Shared {
                spots,
                ..Default::default()
            }),
        }
    }

    /// Delays every query by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                spots: self.shared.spots.clone(),
                unavailable: AtomicBool::new(self.shared.unavailable.load(Ordering::SeqCst)),
                latency: Some(latency),
            }),
        }
    }

    /// Simulates losing (or regaining) the connection to the store.
    pub fn set_available(&self, available: bool) {
        self.shared.unavailable.store(!available, Ordering::SeqCst);
    }
}

impl Database for MemoryDatabase {
    type Autocommit = MemoryAutocommit;

    fn auto(&self) -> Self::Autocommit {
        MemoryAutocommit {
            shared: self.shared.clone(),
        }
    }
}

pub struct MemoryAutocommit {
    shared: Arc<Shared>,
}

impl MemoryAutocommit {
    async fn select<P>(
        &self,
        latitude: f64,
        longitude: f64,
        predicate: P,
    ) -> Result<Vec<Spot>>
    where
        P: Fn(&StoredSpot, &Spot) -> bool,
    {
        if let Some(latency) = self.shared.latency {
            tokio::time::sleep(latency).await;
        }
        if self.shared.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("connection refused".into()));
        }

        Ok(self
            .shared
            .spots
            .iter()
            .filter_map(|stored| {
                let spot = stored.to_model(latitude, longitude);
                predicate(stored, &spot).then_some(spot)
            })
            .collect())
    }
}

#[async_trait]
impl SpotRepo for MemoryAutocommit {
    async fn find_in_circle(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
    ) -> Result<Vec<Spot>> {
        self.select(latitude, longitude, |_, spot| spot.distance <= radius_m)
            .await
    }

    async fn find_in_square(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
    ) -> Result<Vec<Spot>> {
        let bbox = geo::calculate_square_bounding_box(longitude, latitude, radius_m);
        self.select(latitude, longitude, |stored, _| {
            bbox.contains(stored.longitude, stored.latitude)
        })
        .await
    }
}
