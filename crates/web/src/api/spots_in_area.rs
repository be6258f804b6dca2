use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, State},
    http::Method,
    routing::get,
    Json, Router,
};
use model::{area::AreaQuery, spot::Spot};
use serde::Deserialize;
use spots::{database::Database, RequestError};

use crate::{
    common::{schema, RouteErrorResponse, RouteResult},
    WebState,
};

pub(crate) fn routes<D>(state: WebState<D>) -> Router
where
    D: Database,
{
    Router::new()
        .route("/spots-in-area", get(spots_in_area::<D>))
        .route("/spots-in-area/schema", get(schema::<Spot>))
        .with_state(state)
}

/// Raw query parameters. Everything is kept as text so that validation can
/// name the offending parameter.
#[derive(Deserialize)]
pub(crate) struct SpotsInAreaParams {
    latitude: Option<String>,
    longitude: Option<String>,
    radius: Option<String>,
    #[serde(rename = "isCircle")]
    is_circle: Option<String>,
}

async fn spots_in_area<D>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { spot_client }): State<WebState<D>>,
    params: Result<Query<SpotsInAreaParams>, QueryRejection>,
) -> RouteResult<Json<Vec<Spot>>>
where
    D: Database,
{
    let error_response = |why: RouteErrorResponse| {
        why.with_method(&Method::GET).with_uri(original_uri.path())
    };

    let Query(params) = params.map_err(|why| error_response(why.into()))?;
    let query = AreaQuery::parse(
        params.latitude.as_deref(),
        params.longitude.as_deref(),
        params.radius.as_deref(),
        params.is_circle.as_deref(),
    )
    .map_err(|why| {
        log::debug!("rejected spots-in-area request: {}", why);
        error_response(RequestError::from(why).into())
    })?;

    spot_client
        .spots_in_area(&query)
        .await
        .map(Json)
        .map_err(|why| {
            log::error!("could not query spots ({}): {:?}", query, why);
            error_response(why.into())
        })
}
