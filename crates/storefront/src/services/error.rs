//! Service error types.

use thiserror::Error;

use vibe_commerce_core::{EmailError, QuantityError};

use crate::db::RepositoryError;

/// Client input that a service refused. Nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `productId` missing or blank.
    #[error("Invalid product or quantity: productId is required")]
    MissingProductId,

    /// `qty` missing, not an integer, or out of range.
    #[error("Invalid product or quantity: {0}")]
    InvalidQuantity(String),

    /// A required checkout field is missing or empty.
    #[error("Missing required fields: {0}")]
    MissingField(&'static str),

    /// The checkout email is not an address.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

impl From<QuantityError> for ValidationError {
    fn from(err: QuantityError) -> Self {
        Self::InvalidQuantity(err.to_string())
    }
}

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
