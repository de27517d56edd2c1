//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required field is missing or fails the presence/positivity checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// Data read back from a store could not be interpreted
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

impl Error {
    /// Whether this error was caused by bad caller input rather than a store failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
