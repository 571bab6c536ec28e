//! Account domain model.
//!
//! An account is any authenticated principal: either a head account
//! that owns an organization, or a delegated account (sub-user)
//! scoped under one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::feature::FeatureId;

/// Unique account identifier. Assigned locally as max-existing + 1.
pub type AccountId = u64;

/// Marker for accounts created through an external identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Stored lower-cased; unique case-insensitively across the roster.
    pub email: String,
    /// Argon2id PHC-format hash. `None` for external-identity accounts,
    /// which can never be logged into with a password.
    pub password_hash: Option<String>,
    pub name: String,
    /// Shared by a head account and all accounts delegated under it.
    pub organization_name: String,
    pub is_head_user: bool,
    /// Owning head account; `None` for head accounts. Weak reference,
    /// used for lookup and authorization only.
    pub head_user_id: Option<AccountId>,
    /// Subset of the feature catalog this account may use. Always the
    /// full catalog for head accounts.
    pub allowed_features: Vec<FeatureId>,
    pub picture: Option<String>,
    pub auth_provider: Option<AuthProvider>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Case-insensitive email comparison against the stored (lower-cased)
    /// address.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email == email.to_lowercase()
    }

    pub fn has_feature(&self, feature: FeatureId) -> bool {
        self.allowed_features.contains(&feature)
    }
}

/// Fields required for local head-account registration.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    /// Raw password; hashed with Argon2id before storage.
    pub password: String,
    pub organization_name: String,
}

/// Fields required to create a delegated account.
#[derive(Debug, Clone)]
pub struct NewSubUser {
    pub name: String,
    pub email: String,
    /// Raw password; hashed with Argon2id before storage.
    pub password: String,
    pub allowed_features: Vec<FeatureId>,
}

/// Partial update of a delegated account. `None` = no change.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_features: Option<Vec<FeatureId>>,
}

/// Payload obtained from the Google identity exchange.
#[derive(Debug, Clone, Default)]
pub struct GoogleIdentity {
    pub email: Option<String>,
    pub name: Option<String>,
    /// Google subject id; used as the account id when it parses as one.
    pub google_id: Option<String>,
    pub picture: Option<String>,
    /// Hosted-domain hint; becomes the organization label when present.
    pub hosted_domain: Option<String>,
    pub allowed_features: Option<Vec<FeatureId>>,
}
