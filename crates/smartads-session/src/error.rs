//! Session error types.

use smartads_core::error::SmartadsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Uniform for unknown email and wrong password alike, so callers
    /// cannot enumerate accounts.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<SessionError> for SmartadsError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => SmartadsError::AuthenticationFailed {
                reason: err.to_string(),
            },
            SessionError::Crypto(msg) => SmartadsError::Crypto(msg),
        }
    }
}
