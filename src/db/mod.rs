pub mod announcements;
pub mod complaints;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod profiles;
pub mod schedules;
pub mod sessions;
pub mod settings;
pub mod stats;

use crate::errors::AppError;

/// Wraps a validation failure found while mapping a row, so a corrupt value
/// surfaces as a rusqlite conversion error pointing at the column.
pub(crate) fn conversion_error(column: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}
