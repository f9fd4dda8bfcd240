// ==========================================
// SteelWorks Operations - reporting service errors
// ==========================================

use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportingError {
    /// start > end; raised before any query runs
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("reporting session is closed")]
    SessionClosed,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<rusqlite::Error> for ReportingError {
    fn from(err: rusqlite::Error) -> Self {
        ReportingError::Repository(RepositoryError::from(err))
    }
}

pub type ReportingResult<T> = Result<T, ReportingError>;
