use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, Request},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};
use spots::RequestError;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default = "Default::default")]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responeses -

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    pub error: String,

    /// Name of the offending query parameter, for `400` responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            error: status_code
                .canonical_reason()
                .unwrap_or("i dunno what happened here :/")
                .to_owned(),
            parameter: None,
            http_method: None,
            requested_uri: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error = message.into();
        self
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::InvalidParameter(why) => Self::new(StatusCode::BAD_REQUEST)
                .with_parameter(why.parameter())
                .with_message(why.to_string()),
            RequestError::StoreUnavailable(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE).with_message(value.to_string())
            }
            RequestError::QueryExecution(_) | RequestError::Serialization(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .with_message(value.to_string())
            }
            RequestError::QueryTimeout(_) => {
                Self::new(StatusCode::GATEWAY_TIMEOUT).with_message(value.to_string())
            }
        }
    }
}

impl From<QueryRejection> for RouteErrorResponse {
    fn from(value: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST).with_message(value.body_text())
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error, time::Duration};

    use model::area::InvalidParameter;

    use super::*;

    fn source() -> Box<dyn Error + Send + Sync> {
        "relation \"spots\" does not exist: SELECT id FROM spots".into()
    }

    #[test]
    fn invalid_parameter_is_bad_request() {
        let response = RouteErrorResponse::from(RequestError::from(
            InvalidParameter::Missing("radius"),
        ));
        assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(response.parameter.as_deref(), Some("radius"));
        assert!(response.error.contains("radius"));
    }

    #[test]
    fn store_errors_map_to_server_statuses() {
        let cases = [
            (
                RequestError::StoreUnavailable(source()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                RequestError::QueryExecution(source()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RequestError::Serialization(source()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RequestError::QueryTimeout(Duration::from_secs(3)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];
        for (error, status_code) in cases {
            let response = RouteErrorResponse::from(error);
            assert_eq!(response.status_code, status_code);
            assert!(response.parameter.is_none());
        }
    }

    #[test]
    fn store_error_details_are_not_exposed() {
        let response = RouteErrorResponse::from(RequestError::QueryExecution(source()));
        assert!(!response.error.contains("SELECT"));
        assert!(!response.error.contains("relation"));
    }

    #[test]
    fn error_body_has_error_field() {
        let body = serde_json::to_value(
            RouteErrorResponse::new(StatusCode::SERVICE_UNAVAILABLE),
        )
        .unwrap();
        assert_eq!(body["error"], "Service Unavailable");
        assert!(body.get("statusCode").is_none());
        assert!(body.get("parameter").is_none());
    }
}
