//! Error types for gateway operations.

use std::error::Error;
use std::fmt;

use crate::schema::ValidationErrors;
use crate::store::StoreError;

/// Error type for gateway operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The request body or the merged document failed schema validation.
    Validation(ValidationErrors),
    /// No document with this id exists in the collection.
    NotFound { name: &'static str, id: String },
    /// Any other failure reported by the store.
    Store(StoreError),
}

impl GatewayError {
    pub fn not_found(name: &'static str, id: impl Into<String>) -> Self {
        GatewayError::NotFound {
            name,
            id: id.into(),
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation(_) => 400,
            GatewayError::NotFound { .. } => 404,
            GatewayError::Store(_) => 500,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Validation(e) => write!(f, "{}", e),
            GatewayError::NotFound { name, .. } => write!(f, "{} not found", name),
            GatewayError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GatewayError::Validation(e) => Some(e),
            GatewayError::Store(e) => Some(e),
            GatewayError::NotFound { .. } => None,
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        GatewayError::Store(err)
    }
}

impl From<ValidationErrors> for GatewayError {
    fn from(err: ValidationErrors) -> Self {
        GatewayError::Validation(err)
    }
}
