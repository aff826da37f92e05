//! Translation of pool and Diesel failures into [`RowStoreError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::PostingId;
use crate::domain::ports::RowStoreError;

use super::pool::PoolError;

/// Name PostgreSQL gives the `corrections.posting_id` foreign key.
pub(crate) const CORRECTION_POSTING_FK: &str = "corrections_posting_id_fkey";

/// Map pool errors to row store connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> RowStoreError {
    RowStoreError::connection(error.into_message())
}

/// Map Diesel errors to row store errors.
pub(crate) fn map_diesel_error(error: DieselError) -> RowStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::QueryBuilderError(_) => RowStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            RowStoreError::connection("database connection error")
        }
        _ => RowStoreError::query("database error"),
    }
}

/// Map a failed correction insert, recognising the posting foreign key.
///
/// Violations of any other foreign key fall through to a generic query error
/// and are logged, since they point at a schema change this adapter does not
/// know about.
pub(crate) fn map_correction_insert_error(
    error: DieselError,
    posting_id: PostingId,
) -> RowStoreError {
    if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = &error {
        if info.constraint_name() == Some(CORRECTION_POSTING_FK) {
            return RowStoreError::missing_posting(posting_id);
        }
        warn!(
            message = info.message(),
            constraint_name = ?info.constraint_name(),
            "unrecognised foreign key violation"
        );
    }
    map_diesel_error(error)
}
