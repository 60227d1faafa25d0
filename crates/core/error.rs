//! Error types for the query layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeostackError>;

#[derive(Debug, Error)]
pub enum GeostackError {
    /// A path identifier that is not a 24 digit hex ObjectId
    #[error("Invalid identifier '{0}': expected a 24 character hex string")]
    InvalidIdentifier(String),

    #[error("Invalid amount '{0}': expected a non-negative integer")]
    InvalidAmount(String),

    #[error("Amount {requested} exceeds the maximum of {max}")]
    AmountTooLarge { requested: u64, max: u64 },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Failure reported by the document store backend
    #[error("Document store error: {0}")]
    Store(String),

    /// Seed data for the in-memory store could not be read or decoded
    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeostackError {
    /// Errors caused by malformed request parameters rather than by a backend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier(_)
                | Self::InvalidAmount(_)
                | Self::AmountTooLarge { .. }
                | Self::InvalidDate(_)
                | Self::InvalidPolygon(_)
        )
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for GeostackError {
    fn from(e: mongodb::error::Error) -> Self {
        Self::Store(e.to_string())
    }
}
