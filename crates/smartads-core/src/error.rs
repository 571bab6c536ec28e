//! Error types for the SmartAds client stack.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmartadsError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Remote authority rejected the request: {0}")]
    Remote(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Session context missing: no account is logged in")]
    SessionContext,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SmartadsResult<T> = Result<T, SmartadsError>;
