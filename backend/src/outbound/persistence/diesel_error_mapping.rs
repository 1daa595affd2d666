//! Translation of pool and Diesel failures into people repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::PeopleRepositoryError;

use super::pool::PoolError;

/// Map pool checkout and build failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> PeopleRepositoryError {
    debug!(message = error.message(), "connection pool failure");
    PeopleRepositoryError::connection(error.message())
}

/// Map Diesel errors to connection or query errors.
///
/// Only a closed connection counts as a connectivity failure; constraint
/// violations and every other database error are query failures.
pub(crate) fn map_diesel_error(error: DieselError) -> PeopleRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PeopleRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            PeopleRepositoryError::query("referenced user does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            PeopleRepositoryError::query("check constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PeopleRepositoryError::query("unique constraint violated")
        }
        DieselError::NotFound => PeopleRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => PeopleRepositoryError::query("database query error"),
        _ => PeopleRepositoryError::query("database error"),
    }
}
