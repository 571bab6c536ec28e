//! Session/identity store — login, registration, Google reconciliation,
//! and feature access checks.

mod directory;

use chrono::Utc;
use smartads_core::error::{SmartadsError, SmartadsResult};
use smartads_core::models::{
    ALL_FEATURES, Account, AccountId, AuthProvider, Feature, FeatureId, GoogleIdentity,
    NewAccount, full_catalog,
};
use smartads_core::outcome::Outcome;
use smartads_core::remote::{GoogleExchangeInput, RemoteAuthority, RemoteIdentity};
use smartads_core::store::{Snapshot, SnapshotStore};
use smartads_core::validate::{check_password, validate_email};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::password;

/// In-memory roster plus the current-account pointer.
///
/// All mutations run under one lock so check-then-append sequences
/// (duplicate-email checks, id assignment) are atomic.
struct State {
    accounts: Vec<Account>,
    current: Option<Account>,
}

impl State {
    fn next_id(&self) -> AccountId {
        self.accounts.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    fn email_in_use(&self, email: &str) -> bool {
        self.accounts.iter().any(|a| a.email_matches(email))
    }

    fn position(&self, id: AccountId) -> Option<usize> {
        self.accounts.iter().position(|a| a.id == id)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            accounts: self.accounts.clone(),
            current_account: self.current.clone(),
        }
    }
}

/// Drop duplicate feature ids, keeping first occurrence.
fn dedup_features(features: Vec<FeatureId>) -> Vec<FeatureId> {
    let mut out = Vec::with_capacity(features.len());
    for f in features {
        if !out.contains(&f) {
            out.push(f);
        }
    }
    out
}

fn validation(field: &str, message: impl Into<String>) -> SmartadsError {
    SmartadsError::Validation {
        field: field.into(),
        message: message.into(),
    }
}

/// Session/identity store and sub-user directory.
///
/// Generic over the remote authority and the snapshot store so the
/// service has no dependency on the HTTP or storage crates, and tests
/// can drive both pipeline branches deterministically.
pub struct SessionService<R: RemoteAuthority, S: SnapshotStore> {
    remote: R,
    store: S,
    config: SessionConfig,
    state: Mutex<State>,
}

impl<R: RemoteAuthority, S: SnapshotStore> SessionService<R, S> {
    /// Build the service with seeded defaults (no snapshot loaded yet).
    ///
    /// Fails only if the seed admin password cannot be hashed.
    pub fn new(remote: R, store: S, config: SessionConfig) -> SmartadsResult<Self> {
        let mut accounts = Vec::new();
        if let Some(seed) = &config.seed_admin {
            let hash = password::hash_password(&seed.password, config.pepper.as_deref())?;
            accounts.push(Account {
                id: 1,
                email: seed.email.to_lowercase(),
                password_hash: Some(hash),
                name: seed.name.clone(),
                organization_name: seed.organization.clone(),
                is_head_user: true,
                head_user_id: None,
                allowed_features: full_catalog(),
                picture: None,
                auth_provider: None,
                created_at: Utc::now(),
            });
        }

        Ok(Self {
            remote,
            store,
            config,
            state: Mutex::new(State {
                accounts,
                current: None,
            }),
        })
    }

    /// Load a previously persisted snapshot, replacing the seeded
    /// defaults when one exists.
    ///
    /// Never fails the caller: a missing, malformed, or unreadable
    /// snapshot leaves the defaults in place.
    pub async fn initialize(&self) {
        match self.store.load().await {
            Ok(Some(snapshot)) => {
                let mut state = self.state.lock().await;
                info!(
                    accounts = snapshot.accounts.len(),
                    logged_in = snapshot.current_account.is_some(),
                    "Restored persisted session state"
                );
                state.accounts = snapshot.accounts;
                state.current = snapshot.current_account;
            }
            Ok(None) => debug!("No persisted snapshot, keeping seeded defaults"),
            Err(e) => warn!(error = %e, "Snapshot load failed, keeping seeded defaults"),
        }
    }

    async fn persist(&self, state: &State) -> SmartadsResult<()> {
        self.store.save(&state.snapshot()).await
    }

    /// Shape a backend identity into a head-equivalent account with the
    /// full feature catalog.
    fn head_account_from(&self, identity: RemoteIdentity) -> Account {
        Account {
            id: identity.id,
            email: identity.email.to_lowercase(),
            password_hash: None,
            name: identity.full_name,
            organization_name: self.config.organization_label.clone(),
            is_head_user: true,
            head_user_id: None,
            allowed_features: full_catalog(),
            picture: None,
            auth_provider: None,
            created_at: Utc::now(),
        }
    }

    /// Authenticate with email + password.
    ///
    /// Tries the remote authority first; any remote failure falls
    /// through to the local roster (case-insensitive email, Argon2id
    /// verify). Local failure is a uniform "invalid credentials".
    pub async fn login(&self, email: &str, password: &str) -> SmartadsResult<Outcome<Account>> {
        // 1. Delegate to the remote authority.
        match self.remote.login(email, password).await {
            Ok(identity) => {
                let account = self.head_account_from(identity);
                let mut state = self.state.lock().await;
                state.current = Some(account.clone());
                self.persist(&state).await?;
                return Ok(Outcome::remote(account));
            }
            Err(e) => debug!(error = %e, "Remote login failed, trying local roster"),
        }

        // 2. Local fallback.
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .iter()
            .find(|a| a.email_matches(email))
            .cloned()
            .ok_or(SessionError::InvalidCredentials)?;

        // External-identity accounts carry no usable password.
        let hash = account
            .password_hash
            .as_deref()
            .ok_or(SessionError::InvalidCredentials)?;
        if !password::verify_password(password, hash, self.config.pepper.as_deref())? {
            return Err(SessionError::InvalidCredentials.into());
        }

        state.current = Some(account.clone());
        self.persist(&state).await?;
        Ok(Outcome::local(account))
    }

    /// Clear the current-account pointer.
    pub async fn logout(&self) -> SmartadsResult<()> {
        let mut state = self.state.lock().await;
        state.current = None;
        self.persist(&state).await
    }

    /// Local-only head-account registration (bootstrap/demo path).
    ///
    /// Validates email format and password strength, rejects duplicate
    /// emails, and appends a head account with the full catalog. Does
    /// not log the new account in.
    pub async fn register_user(&self, input: NewAccount) -> SmartadsResult<Account> {
        if !validate_email(&input.email, &self.config.email_policy) {
            return Err(validation("email", "invalid email format"));
        }
        let report = check_password(&input.password);
        if !report.is_valid() {
            return Err(validation(
                "password",
                format!("password must contain {}", report.missing().join(", ")),
            ));
        }

        let hash = password::hash_password(&input.password, self.config.pepper.as_deref())?;

        let mut state = self.state.lock().await;
        if state.email_in_use(&input.email) {
            return Err(SmartadsError::AlreadyExists {
                entity: format!("account with email {}", input.email.to_lowercase()),
            });
        }

        let account = Account {
            id: state.next_id(),
            email: input.email.to_lowercase(),
            password_hash: Some(hash),
            name: input.name,
            organization_name: input.organization_name,
            is_head_user: true,
            head_user_id: None,
            allowed_features: full_catalog(),
            picture: None,
            auth_provider: None,
            created_at: Utc::now(),
        };

        state.accounts.push(account.clone());
        self.persist(&state).await?;
        Ok(account)
    }

    /// Reconcile a Google identity payload into the roster and log the
    /// account in.
    ///
    /// When the payload carries a Google id the backend exchange is
    /// attempted first; its failure never surfaces. An existing account
    /// with the same email has only name and picture merged; otherwise
    /// a head account with no usable password is synthesized.
    pub async fn register_google_user(
        &self,
        identity: GoogleIdentity,
    ) -> SmartadsResult<Outcome<Account>> {
        let email = identity
            .email
            .as_deref()
            .map(str::to_lowercase)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| validation("email", "missing email in Google identity payload"))?;

        // 1. Backend exchange, when an exchange is possible.
        let mut from_remote = false;
        let mut resolved_name = identity.name.clone();
        let mut resolved_id: Option<AccountId> =
            identity.google_id.as_deref().and_then(|s| s.parse().ok());
        if let Some(google_id) = &identity.google_id {
            match self
                .remote
                .google_exchange(GoogleExchangeInput {
                    email: email.clone(),
                    name: identity.name.clone().unwrap_or_default(),
                    google_id: google_id.clone(),
                    picture: identity.picture.clone(),
                })
                .await
            {
                Ok(remote_identity) => {
                    from_remote = true;
                    resolved_id = Some(remote_identity.id);
                    if !remote_identity.full_name.is_empty() {
                        resolved_name = Some(remote_identity.full_name);
                    }
                }
                Err(e) => debug!(error = %e, "Google exchange failed, reconciling locally"),
            }
        }

        let wrap = |account: Account| {
            if from_remote {
                Outcome::remote(account)
            } else {
                Outcome::local(account)
            }
        };

        // 2. Existing account: merge only name and picture, log it in.
        let mut state = self.state.lock().await;
        if let Some(pos) = state.accounts.iter().position(|a| a.email == email) {
            let merged = {
                let account = &mut state.accounts[pos];
                if let Some(name) = resolved_name {
                    account.name = name;
                }
                if let Some(picture) = identity.picture {
                    account.picture = Some(picture);
                }
                account.clone()
            };
            state.current = Some(merged.clone());
            self.persist(&state).await?;
            return Ok(wrap(merged));
        }

        // 3. New account: synthesize a head account without a usable
        //    password.
        let id = resolved_id
            .filter(|id| state.position(*id).is_none())
            .unwrap_or_else(|| state.next_id());
        let account = Account {
            id,
            email,
            password_hash: None,
            name: resolved_name.unwrap_or_else(|| "Google User".into()),
            organization_name: identity
                .hosted_domain
                .unwrap_or_else(|| "Personal".into()),
            is_head_user: true,
            head_user_id: None,
            allowed_features: identity
                .allowed_features
                .map(dedup_features)
                .filter(|f| !f.is_empty())
                .unwrap_or_else(full_catalog),
            picture: identity.picture,
            auth_provider: Some(AuthProvider::Google),
            created_at: Utc::now(),
        };

        state.accounts.push(account.clone());
        state.current = Some(account.clone());
        self.persist(&state).await?;
        Ok(wrap(account))
    }

    /// True iff the resolved account may use the feature.
    ///
    /// Prefers the in-memory current account when its id matches (a
    /// roster read could be stale for a backend-merged session), then
    /// the roster. An unresolved id is simply `false`.
    pub async fn has_feature_access(&self, account_id: AccountId, feature: FeatureId) -> bool {
        let state = self.state.lock().await;
        if let Some(current) = &state.current {
            if current.id == account_id {
                return current.has_feature(feature);
            }
        }
        state
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .is_some_and(|a| a.has_feature(feature))
    }

    /// The catalog entries the account may use, in catalog order.
    pub async fn account_features(&self, account_id: AccountId) -> Vec<Feature> {
        let state = self.state.lock().await;
        let account = if let Some(current) = state.current.as_ref().filter(|c| c.id == account_id)
        {
            Some(current)
        } else {
            state.accounts.iter().find(|a| a.id == account_id)
        };
        match account {
            Some(account) => ALL_FEATURES
                .iter()
                .filter(|f| account.allowed_features.contains(&f.id))
                .copied()
                .collect(),
            None => Vec::new(),
        }
    }

    /// The currently logged-in account, if any.
    pub async fn current_account(&self) -> Option<Account> {
        self.state.lock().await.current.clone()
    }

    /// The current account, or a context-missing error for callers
    /// that require an active session.
    pub async fn require_current(&self) -> SmartadsResult<Account> {
        self.current_account()
            .await
            .ok_or(SmartadsError::SessionContext)
    }

    /// Full roster (heads and delegated accounts).
    pub async fn accounts(&self) -> Vec<Account> {
        self.state.lock().await.accounts.clone()
    }

    /// The underlying remote authority.
    pub fn remote_authority(&self) -> &R {
        &self.remote
    }
}
