use async_trait::async_trait;
use model::spot::Spot;
use spots::database::{Result, SpotRepo};
use sqlx::prelude::FromRow;

use crate::{
    queries::spot::{get_in_circle, get_in_square},
    PgDatabaseAutocommit,
};

/// A row of an area query. `website` and `description` are already
/// coalesced to empty strings by the query.
#[derive(Debug, Clone, FromRow)]
pub struct SpotRow {
    pub id: String,
    pub name: String,
    pub website: String,
    pub location: String,
    pub description: String,
    pub rating: f64,
    pub distance: f64,
}

impl SpotRow {
    pub fn to_model(self) -> Spot {
        Spot {
            id: self.id,
            name: self.name,
            location: self.location,
            website: self.website,
            description: self.description,
            rating: self.rating,
            distance: self.distance,
        }
    }

    pub fn to_models(rows: Vec<Self>) -> Vec<Spot> {
        rows.into_iter().map(Self::to_model).collect()
    }
}

#[async_trait]
impl SpotRepo for PgDatabaseAutocommit {
    async fn find_in_circle(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
    ) -> Result<Vec<Spot>> {
        get_in_circle(&self.pool, latitude, longitude, radius_m).await
    }

    async fn find_in_square(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
    ) -> Result<Vec<Spot>> {
        get_in_square(&self.pool, latitude, longitude, radius_m).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_maps_to_spot_field_by_field() {
        let spot = SpotRow {
            id: "42".to_owned(),
            name: "Kiellinie".to_owned(),
            website: String::new(),
            location: "POINT(10.15 54.33)".to_owned(),
            description: "Promenade".to_owned(),
            rating: 4.5,
            distance: 12.25,
        }
        .to_model();

        assert_eq!(spot.id, "42");
        assert_eq!(spot.name, "Kiellinie");
        assert_eq!(spot.website, "");
        assert_eq!(spot.location, "POINT(10.15 54.33)");
        assert_eq!(spot.description, "Promenade");
        assert_eq!(spot.rating, 4.5);
        assert_eq!(spot.distance, 12.25);
    }
}
