//! Filtering, ranking and aggregation over loaded tables.
//!
//! Every operation borrows its input and returns a new table, so a derived
//! view is always a subset (or summary) of the data it came from.

pub mod aggregate;
pub mod coerce;
pub mod filter;
pub mod profile;
pub mod rank;

use thiserror::Error;

/// Why a single view operation could not produce output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("no valid values in '{0}'")]
    NoValidRows(String),
}

pub type ViewResult<T> = Result<T, ViewError>;
