//! Sub-user directory — CRUD over delegated accounts, remote-first
//! with local fallback.

use chrono::Utc;
use smartads_core::error::{SmartadsError, SmartadsResult};
use smartads_core::models::{Account, AccountId, NewSubUser, SubUserUpdate};
use smartads_core::outcome::Outcome;
use smartads_core::remote::{AddSubUserInput, RemoteAuthority, RemoteSubUser};
use smartads_core::store::SnapshotStore;
use smartads_core::validate::{check_password, validate_email};
use tracing::{debug, warn};

use super::{SessionService, State, dedup_features, validation};
use crate::password;

impl<R: RemoteAuthority, S: SnapshotStore> SessionService<R, S> {
    /// Organization label for a delegated account: the head account's
    /// organization, from the session when it is the head, otherwise
    /// from the roster, otherwise the configured default.
    fn organization_for(&self, state: &State, head_user_id: AccountId) -> String {
        state
            .current
            .as_ref()
            .filter(|c| c.id == head_user_id)
            .or_else(|| state.accounts.iter().find(|a| a.id == head_user_id))
            .map(|a| a.organization_name.clone())
            .unwrap_or_else(|| self.config.organization_label.clone())
    }

    /// Create a delegated account under a head account.
    ///
    /// Remote path: submit, then mirror the created record into the
    /// roster. Local fallback validates in order: email format,
    /// password strength, duplicate email, non-empty features, and
    /// that the head id resolves to a head account.
    pub async fn add_sub_user(
        &self,
        head_user_id: AccountId,
        input: NewSubUser,
    ) -> SmartadsResult<Outcome<Account>> {
        // 1. Submit to the remote authority.
        match self
            .remote
            .add_sub_user(AddSubUserInput {
                head_user_id,
                name: input.name.clone(),
                email: input.email.clone(),
                password: input.password.clone(),
                allowed_features: input.allowed_features.clone(),
            })
            .await
        {
            Ok(created) => {
                let hash =
                    password::hash_password(&input.password, self.config.pepper.as_deref())?;
                let mut state = self.state.lock().await;
                let mut account = Account {
                    id: created.id,
                    email: input.email.to_lowercase(),
                    password_hash: Some(hash),
                    name: input.name,
                    organization_name: self.organization_for(&state, head_user_id),
                    is_head_user: false,
                    head_user_id: Some(head_user_id),
                    allowed_features: dedup_features(input.allowed_features),
                    picture: None,
                    auth_provider: None,
                    created_at: created.created_at,
                };
                // Mirror by email: a same-email roster entry is replaced
                // in place. The backend's id sequence is not ours, so a
                // collision with a different local account keeps that
                // account and gives the mirror a fresh local id.
                let same_email = state
                    .accounts
                    .iter()
                    .position(|a| a.email_matches(&account.email));
                let id_taken = state
                    .accounts
                    .iter()
                    .enumerate()
                    .any(|(i, a)| a.id == account.id && Some(i) != same_email);
                if id_taken {
                    let local_id = state.next_id();
                    warn!(
                        remote_id = account.id,
                        local_id,
                        "Backend sub-user id collides with an existing account, mirroring under a local id"
                    );
                    account.id = local_id;
                }
                match same_email {
                    Some(pos) => state.accounts[pos] = account.clone(),
                    None => state.accounts.push(account.clone()),
                }
                self.persist(&state).await?;
                return Ok(Outcome::remote(account));
            }
            Err(e) => debug!(error = %e, "Remote add sub-user failed, using local roster"),
        }

        // 2. Local fallback with full validation.
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
        let allowed_features = dedup_features(input.allowed_features);
        if allowed_features.is_empty() {
            return Err(validation(
                "allowedFeatures",
                "at least one feature must be assigned",
            ));
        }
        let organization_name = match state.accounts.iter().find(|a| a.id == head_user_id) {
            Some(head) if head.is_head_user => head.organization_name.clone(),
            _ => return Err(validation("headUserId", "invalid head account")),
        };

        let account = Account {
            id: state.next_id(),
            email: input.email.to_lowercase(),
            password_hash: Some(hash),
            name: input.name,
            organization_name,
            is_head_user: false,
            head_user_id: Some(head_user_id),
            allowed_features,
            picture: None,
            auth_provider: None,
            created_at: Utc::now(),
        };

        state.accounts.push(account.clone());
        self.persist(&state).await?;
        Ok(Outcome::local(account))
    }

    /// Merge a partial update into a roster entry, refreshing the
    /// current-account pointer when it is the target.
    fn merge_update(
        state: &mut State,
        pos: usize,
        updates: &SubUserUpdate,
        password_hash: Option<String>,
    ) -> Account {
        let merged = {
            let account = &mut state.accounts[pos];
            if let Some(name) = &updates.name {
                account.name = name.clone();
            }
            if let Some(email) = &updates.email {
                account.email = email.to_lowercase();
            }
            if let Some(hash) = password_hash {
                account.password_hash = Some(hash);
            }
            if let Some(features) = &updates.allowed_features {
                account.allowed_features = dedup_features(features.clone());
            }
            account.clone()
        };
        if state.current.as_ref().is_some_and(|c| c.id == merged.id) {
            state.current = Some(merged.clone());
        }
        merged
    }

    /// Partially update a delegated account.
    ///
    /// A business rejection from the remote authority (e.g. the new
    /// email already exists there) is forwarded as a hard failure;
    /// transport failures fall back to a validated local merge, which
    /// fails when the target id does not exist.
    pub async fn update_sub_user(
        &self,
        sub_user_id: AccountId,
        updates: SubUserUpdate,
    ) -> SmartadsResult<Outcome<Account>> {
        // 1. Submit the partial update.
        match self.remote.update_sub_user(sub_user_id, &updates).await {
            Ok(()) => {
                let hash = match &updates.password {
                    Some(pw) => {
                        Some(password::hash_password(pw, self.config.pepper.as_deref())?)
                    }
                    None => None,
                };
                let mut state = self.state.lock().await;
                let pos = state.position(sub_user_id).ok_or_else(|| {
                    SmartadsError::NotFound {
                        entity: "sub-user".into(),
                        id: sub_user_id.to_string(),
                    }
                })?;
                Self::ensure_email_free(&state, sub_user_id, updates.email.as_deref())?;
                let merged = Self::merge_update(&mut state, pos, &updates, hash);
                self.persist(&state).await?;
                Ok(Outcome::remote(merged))
            }
            Err(e) if e.is_rejection() => Err(SmartadsError::Remote(e.to_string())),
            Err(e) => {
                debug!(error = %e, "Remote update sub-user failed, using local roster");

                // 2. Local fallback with validation of the provided
                //    fields.
                if let Some(email) = &updates.email {
                    if !validate_email(email, &self.config.email_policy) {
                        return Err(validation("email", "invalid email format"));
                    }
                }
                if let Some(pw) = &updates.password {
                    let report = check_password(pw);
                    if !report.is_valid() {
                        return Err(validation(
                            "password",
                            format!("password must contain {}", report.missing().join(", ")),
                        ));
                    }
                }
                let hash = match &updates.password {
                    Some(pw) => {
                        Some(password::hash_password(pw, self.config.pepper.as_deref())?)
                    }
                    None => None,
                };

                let mut state = self.state.lock().await;
                let pos = state.position(sub_user_id).ok_or_else(|| {
                    SmartadsError::NotFound {
                        entity: "sub-user".into(),
                        id: sub_user_id.to_string(),
                    }
                })?;
                Self::ensure_email_free(&state, sub_user_id, updates.email.as_deref())?;
                let merged = Self::merge_update(&mut state, pos, &updates, hash);
                self.persist(&state).await?;
                Ok(Outcome::local(merged))
            }
        }
    }

    /// Roster-wide email uniqueness when an update changes the email.
    fn ensure_email_free(
        state: &State,
        target: AccountId,
        email: Option<&str>,
    ) -> SmartadsResult<()> {
        if let Some(email) = email {
            if state
                .accounts
                .iter()
                .any(|a| a.id != target && a.email_matches(email))
            {
                return Err(SmartadsError::AlreadyExists {
                    entity: format!("account with email {}", email.to_lowercase()),
                });
            }
        }
        Ok(())
    }

    /// Remove a delegated account.
    ///
    /// The local fallback refuses unless the target exists and belongs
    /// to the given head account. Removing the logged-in account logs
    /// out.
    pub async fn remove_sub_user(
        &self,
        head_user_id: AccountId,
        sub_user_id: AccountId,
    ) -> SmartadsResult<Outcome<()>> {
        // 1. Issue the remote delete.
        match self.remote.delete_sub_user(sub_user_id).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                state.accounts.retain(|a| a.id != sub_user_id);
                if state.current.as_ref().is_some_and(|c| c.id == sub_user_id) {
                    state.current = None;
                }
                self.persist(&state).await?;
                Ok(Outcome::remote(()))
            }
            Err(e) => {
                debug!(error = %e, "Remote delete sub-user failed, using local roster");

                // 2. Local fallback: the target must be a delegated
                //    account of this head.
                let mut state = self.state.lock().await;
                let authorized = state
                    .accounts
                    .iter()
                    .find(|a| a.id == sub_user_id)
                    .is_some_and(|a| a.head_user_id == Some(head_user_id));
                if !authorized {
                    return Err(SmartadsError::AuthorizationDenied {
                        reason: "cannot remove this user".into(),
                    });
                }
                state.accounts.retain(|a| a.id != sub_user_id);
                if state.current.as_ref().is_some_and(|c| c.id == sub_user_id) {
                    state.current = None;
                }
                self.persist(&state).await?;
                Ok(Outcome::local(()))
            }
        }
    }

    /// List the delegated accounts under a head account.
    ///
    /// Remote path: union of the remote list and local-only entries,
    /// de-duplicated by email with remote entries taking precedence.
    /// Fallback: the local roster filtered by head id. Never fails.
    pub async fn sub_users(&self, head_user_id: AccountId) -> Outcome<Vec<Account>> {
        match self.remote.list_sub_users(head_user_id).await {
            Ok(remote_subs) => {
                let state = self.state.lock().await;
                let mut combined: Vec<Account> = remote_subs
                    .into_iter()
                    .map(|s| self.account_from_remote(&state, head_user_id, s))
                    .collect();
                for local in state
                    .accounts
                    .iter()
                    .filter(|a| a.head_user_id == Some(head_user_id))
                {
                    if !combined.iter().any(|c| c.email_matches(&local.email)) {
                        combined.push(local.clone());
                    }
                }
                Outcome::remote(combined)
            }
            Err(e) => {
                debug!(error = %e, "Remote list sub-users failed, using local roster");
                let state = self.state.lock().await;
                Outcome::local(
                    state
                        .accounts
                        .iter()
                        .filter(|a| a.head_user_id == Some(head_user_id))
                        .cloned()
                        .collect(),
                )
            }
        }
    }

    /// Shape a remote directory entry into an account, filling the
    /// fields the wire contract omits from any matching local mirror.
    fn account_from_remote(
        &self,
        state: &State,
        head_user_id: AccountId,
        sub: RemoteSubUser,
    ) -> Account {
        let email = sub.email.to_lowercase();
        let local = state.accounts.iter().find(|a| a.email_matches(&email));
        Account {
            id: sub.id,
            email,
            password_hash: local.and_then(|a| a.password_hash.clone()),
            name: sub.name,
            organization_name: local
                .map(|a| a.organization_name.clone())
                .unwrap_or_else(|| self.organization_for(state, head_user_id)),
            is_head_user: false,
            head_user_id: Some(head_user_id),
            allowed_features: dedup_features(sub.allowed_features),
            picture: local.and_then(|a| a.picture.clone()),
            auth_provider: None,
            created_at: sub.created_at.unwrap_or_else(Utc::now),
        }
    }
}
