//! Access-control error types.

use uuid::Uuid;

/// Errors produced by the access-control workflows.
///
/// All variants are terminal for the current operation; authorization and
/// lookup outcomes are deterministic functions of current state, so nothing
/// here is retried.
#[derive(Debug)]
pub enum AccessError {
    /// The referenced document does not exist.
    NotFound(Uuid),
    /// The identity is not authorized for the attempted action.
    Forbidden(&'static str),
    /// Underlying store failure, propagated unchanged.
    Database(sqlx::Error),
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::NotFound(id) => write!(f, "Document not found with id: {}", id),
            AccessError::Forbidden(reason) => write!(f, "{}", reason),
            AccessError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for AccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccessError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AccessError {
    fn from(e: sqlx::Error) -> Self {
        AccessError::Database(e)
    }
}
