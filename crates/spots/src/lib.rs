use std::{error::Error, time::Duration};

use model::area::InvalidParameter;

pub mod client;
pub mod database;
#[cfg(any(test, feature = "memory"))]
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),

    #[error("the spot store is unavailable")]
    StoreUnavailable(#[source] Box<dyn Error + Send + Sync>),

    #[error("the spot query could not be executed")]
    QueryExecution(#[source] Box<dyn Error + Send + Sync>),

    #[error("the spot store returned rows of an unexpected shape")]
    Serialization(#[source] Box<dyn Error + Send + Sync>),

    #[error("the spot query did not finish within {0:?}")]
    QueryTimeout(Duration),
}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::Unavailable(why) => Self::StoreUnavailable(why),
            database::DatabaseError::Query(why) => Self::QueryExecution(why),
            database::DatabaseError::Decode(why) => Self::Serialization(why),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
