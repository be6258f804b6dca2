use std::time::Duration;

use model::{
    area::{AreaQuery, ShapeMode},
    spot::Spot,
};
use utility::let_also::LetAlso;

use crate::{
    database::{Database, SpotRepo},
    RequestError, RequestResult,
};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database,
{
    pub database: D,
    query_timeout: Duration,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self {
            database,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Runs the area query against the store and ranks the result.
    pub async fn spots_in_area(&self, query: &AreaQuery) -> RequestResult<Vec<Spot>> {
        let mut repo = self.database.auto();
        let lookup = async {
            match query.shape {
                ShapeMode::Circle => {
                    repo.find_in_circle(query.latitude, query.longitude, query.radius)
                        .await
                }
                ShapeMode::Square => {
                    repo.find_in_square(query.latitude, query.longitude, query.radius)
                        .await
                }
            }
        };

        tokio::time::timeout(self.query_timeout, lookup)
            .await
            .map_err(|_| RequestError::QueryTimeout(self.query_timeout))??
            .let_owned(|spots| {
                log::debug!("{} spots found for {}", spots.len(), query);
                let spots = Spot::ranked(spots);
                for spot in &spots {
                    log::trace!(
                        "ranked {:?}: {:.1} m, rating {}",
                        spot.name,
                        spot.distance,
                        spot.rating
                    );
                }
                Ok(spots)
            })
    }
}
