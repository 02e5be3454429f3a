//! Errors raised while building facet menus.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacetError {
    /// A selection or bucket value could not be read as a date.
    #[error("invalid date format: {value:?}")]
    InvalidDateFormat { value: String },
    /// The configured bucket width is not a positive number of days chrono can represent.
    #[error("invalid range gap: {days} days")]
    InvalidRangeGap { days: i64 },
}

pub type FacetResult<T> = Result<T, FacetError>;
