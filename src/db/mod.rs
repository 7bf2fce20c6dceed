pub(crate) mod idea_queries;
pub(crate) mod instrument_queries;
pub(crate) mod portfolio_queries;
pub(crate) mod user_queries;

use crate::errors::AppError;

/// Maps a failed write to the error taxonomy: unique/FK violations become the
/// typed `Constraint` outcome (the transaction has already been rolled back),
/// anything else stays a database fault.
pub(crate) fn write_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            AppError::Constraint(db.message().to_string())
        }
        other => AppError::Db(other),
    }
}
