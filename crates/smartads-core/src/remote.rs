//! Remote authority trait — the seam between the session service and
//! the backend HTTP API.
//!
//! The session service is generic over this trait so it has no
//! dependency on the HTTP crate, and tests can drive both pipeline
//! branches with a programmable fake.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{AccountId, FeatureId, SubUserUpdate};

/// Errors from the remote authority.
///
/// Everything except [`RemoteError::Rejected`] is a transport-class
/// failure and triggers the local-fallback branch. `Rejected` is a
/// business decision by the backend (e.g. "email already exists") and
/// is forwarded as a hard failure where the contract says so.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Invalid response from remote authority: {0}")]
    InvalidResponse(String),

    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl RemoteError {
    /// True for backend business rejections, false for transport-class
    /// failures.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RemoteError::Rejected(_))
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Identity returned by the backend login and Google exchange.
#[derive(Debug, Clone)]
pub struct RemoteIdentity {
    pub id: AccountId,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

/// Head-account signup submission.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Google identity exchange submission.
#[derive(Debug, Clone)]
pub struct GoogleExchangeInput {
    pub email: String,
    pub name: String,
    pub google_id: String,
    pub picture: Option<String>,
}

/// Delegated-account creation submission.
#[derive(Debug, Clone)]
pub struct AddSubUserInput {
    pub head_user_id: AccountId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub allowed_features: Vec<FeatureId>,
}

/// Backend acknowledgement of a delegated-account creation.
#[derive(Debug, Clone)]
pub struct SubUserCreated {
    pub id: AccountId,
    pub created_at: DateTime<Utc>,
}

/// A delegated account as reported by the backend list endpoint.
#[derive(Debug, Clone)]
pub struct RemoteSubUser {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub allowed_features: Vec<FeatureId>,
    pub created_at: Option<DateTime<Utc>>,
}

pub trait RemoteAuthority: Send + Sync {
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = RemoteResult<RemoteIdentity>> + Send;

    fn signup(&self, input: SignupInput) -> impl Future<Output = RemoteResult<()>> + Send;

    fn google_exchange(
        &self,
        input: GoogleExchangeInput,
    ) -> impl Future<Output = RemoteResult<RemoteIdentity>> + Send;

    fn add_sub_user(
        &self,
        input: AddSubUserInput,
    ) -> impl Future<Output = RemoteResult<SubUserCreated>> + Send;

    fn update_sub_user(
        &self,
        id: AccountId,
        updates: &SubUserUpdate,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    fn delete_sub_user(&self, id: AccountId) -> impl Future<Output = RemoteResult<()>> + Send;

    fn list_sub_users(
        &self,
        head_user_id: AccountId,
    ) -> impl Future<Output = RemoteResult<Vec<RemoteSubUser>>> + Send;
}
