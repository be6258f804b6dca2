use std::{error, result};

use async_trait::async_trait;
use model::spot::Spot;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// No connection to the store could be established.
    #[error("database unavailable: {0}")]
    Unavailable(Box<dyn error::Error + Send + Sync>),

    /// The store rejected or failed to run the query.
    #[error("query failed: {0}")]
    Query(Box<dyn error::Error + Send + Sync>),

    /// A row did not match the expected shape.
    #[error("unexpected row: {0}")]
    Decode(Box<dyn error::Error + Send + Sync>),
}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Read access to spots. Every returned spot carries its geodesic distance in
/// meters to the given center.
#[async_trait]
pub trait SpotRepo {
    /// Spots within `radius_m` meters geodesic distance of the center.
    async fn find_in_circle(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
    ) -> Result<Vec<Spot>>;

    /// Spots inside the planar square bounding box around the center.
    async fn find_in_square(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
    ) -> Result<Vec<Spot>>;
}

pub trait Database: Clone + Send + Sync + 'static {
    type Autocommit: SpotRepo + Send;

    /// Operations outside of an explicit transaction, each on a pooled
    /// connection.
    fn auto(&self) -> Self::Autocommit;
}
