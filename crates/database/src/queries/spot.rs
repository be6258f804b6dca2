use model::spot::Spot;
use spots::database::Result;
use sqlx::{Executor, Postgres};
use utility::{geo, let_also::LetAlso};

use crate::data_model::spot::SpotRow;

use super::convert_error;

pub(crate) const CIRCLE_QUERY: &str = "
    SELECT
        id::text AS id,
        name,
        COALESCE(website, '') AS website,
        ST_AsText(coordinates) AS location,
        COALESCE(description, '') AS description,
        rating::float8 AS rating,
        ST_Distance(
            coordinates,
            ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography
        ) AS distance
    FROM
        spots
    WHERE
        ST_DWithin(
            coordinates,
            ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography,
            $3
        );
    ";

// The envelope test is planar on purpose; only the distance is geodesic.
pub(crate) const SQUARE_QUERY: &str = "
    SELECT
        id::text AS id,
        name,
        COALESCE(website, '') AS website,
        ST_AsText(coordinates) AS location,
        COALESCE(description, '') AS description,
        rating::float8 AS rating,
        ST_Distance(
            coordinates,
            ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography
        ) AS distance
    FROM
        spots
    WHERE
        ST_Intersects(
            coordinates::geometry,
            ST_MakeEnvelope($3, $4, $5, $6, 4326)
        );
    ";

pub async fn get_in_circle<'c, E>(
    executor: E,
    center_latitude: f64,
    center_longitude: f64,
    radius_m: f64,
) -> Result<Vec<Spot>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(CIRCLE_QUERY)
        .bind(center_longitude)
        .bind(center_latitude)
        .bind(radius_m)
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|spots: Vec<SpotRow>| Ok(SpotRow::to_models(spots)))
}

pub async fn get_in_square<'c, E>(
    executor: E,
    center_latitude: f64,
    center_longitude: f64,
    radius_m: f64,
) -> Result<Vec<Spot>>
where
    E: Executor<'c, Database = Postgres>,
{
    let bbox =
        geo::calculate_square_bounding_box(center_longitude, center_latitude, radius_m);

    sqlx::query_as(SQUARE_QUERY)
        .bind(center_longitude)
        .bind(center_latitude)
        .bind(bbox.min_lon)
        .bind(bbox.min_lat)
        .bind(bbox.max_lon)
        .bind(bbox.max_lat)
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|spots: Vec<SpotRow>| Ok(SpotRow::to_models(spots)))
}
