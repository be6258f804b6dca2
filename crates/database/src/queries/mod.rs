use spots::database::DatabaseError;

pub mod spot;

/// SQLSTATE classes meaning the store cannot serve us right now, as opposed
/// to a broken query.
const UNAVAILABLE_SQLSTATE_CLASSES: &[&str] = &["08", "28", "53", "57P"];

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => DatabaseError::Unavailable(Box::new(why)),
        sqlx::Error::Database(_) if is_unavailable_sqlstate(&why) => {
            DatabaseError::Unavailable(Box::new(why))
        }
        sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => DatabaseError::Decode(Box::new(why)),
        _ => DatabaseError::Query(Box::new(why)),
    }
}

fn is_unavailable_sqlstate(why: &sqlx::Error) -> bool {
    match why {
        sqlx::Error::Database(db) => db.code().is_some_and(|code| {
            UNAVAILABLE_SQLSTATE_CLASSES
                .iter()
                .any(|class| code.starts_with(*class))
        }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn connection_failures_are_unavailable() {
        let refused = sqlx::Error::Io(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert!(matches!(convert_error(refused), DatabaseError::Unavailable(_)));
        assert!(matches!(
            convert_error(sqlx::Error::PoolTimedOut),
            DatabaseError::Unavailable(_)
        ));
    }

    #[test]
    fn row_shape_mismatches_are_decode_errors() {
        let missing = sqlx::Error::ColumnNotFound("distance".to_owned());
        assert!(matches!(convert_error(missing), DatabaseError::Decode(_)));
    }

    #[test]
    fn other_failures_are_query_errors() {
        assert!(matches!(
            convert_error(sqlx::Error::RowNotFound),
            DatabaseError::Query(_)
        ));
    }
}
