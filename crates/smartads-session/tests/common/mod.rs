//! Test fixtures: a programmable fake remote authority so both
//! branches of the remote-first/local-fallback pipeline can be driven
//! deterministically, without a network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use smartads_core::models::{AccountId, SubUserUpdate};
use smartads_core::remote::{
    AddSubUserInput, GoogleExchangeInput, RemoteAuthority, RemoteError, RemoteIdentity,
    RemoteResult, RemoteSubUser, SignupInput, SubUserCreated,
};

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

/// Programmable in-process stand-in for the backend.
pub struct FakeRemote {
    reachable: AtomicBool,
    /// email -> (password, identity) for the login endpoint.
    credentials: Mutex<HashMap<String, (String, RemoteIdentity)>>,
    sub_users: Mutex<Vec<RemoteSubUser>>,
    next_id: AtomicU64,
    reject_update: Mutex<Option<String>>,
    google_ids: Mutex<HashMap<String, AccountId>>,
}

impl FakeRemote {
    /// Backend that answers requests.
    pub fn reachable() -> Self {
        Self {
            reachable: AtomicBool::new(true),
            credentials: Mutex::new(HashMap::new()),
            sub_users: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(100),
            reject_update: Mutex::new(None),
            google_ids: Mutex::new(HashMap::new()),
        }
    }

    /// Backend that fails every request at the transport level.
    pub fn unreachable() -> Self {
        let fake = Self::reachable();
        fake.reachable.store(false, Ordering::SeqCst);
        fake
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn add_credential(&self, email: &str, password: &str, id: AccountId, full_name: &str) {
        self.credentials.lock().unwrap().insert(
            email.to_lowercase(),
            (
                password.to_string(),
                RemoteIdentity {
                    id,
                    email: email.to_lowercase(),
                    full_name: full_name.to_string(),
                    role: "head".into(),
                },
            ),
        );
    }

    pub fn push_sub_user(&self, sub: RemoteSubUser) {
        self.sub_users.lock().unwrap().push(sub);
    }

    /// Make the update endpoint report a business rejection.
    pub fn reject_updates(&self, message: &str) {
        *self.reject_update.lock().unwrap() = Some(message.to_string());
    }

    /// Restart the backend's id sequence at the given value.
    pub fn set_next_id(&self, next: AccountId) {
        self.next_id.store(next, Ordering::SeqCst);
    }

    fn offline<T>(&self) -> RemoteResult<T> {
        Err(RemoteError::Transport("connection refused".into()))
    }

    fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }
}

impl RemoteAuthority for FakeRemote {
    async fn login(&self, email: &str, password: &str) -> RemoteResult<RemoteIdentity> {
        if !self.is_reachable() {
            return self.offline();
        }
        match self.credentials.lock().unwrap().get(&email.to_lowercase()) {
            Some((expected, identity)) if expected == password => Ok(identity.clone()),
            _ => Err(RemoteError::Rejected("Invalid credentials".into())),
        }
    }

    async fn signup(&self, _input: SignupInput) -> RemoteResult<()> {
        if !self.is_reachable() {
            return self.offline();
        }
        Ok(())
    }

    async fn google_exchange(&self, input: GoogleExchangeInput) -> RemoteResult<RemoteIdentity> {
        if !self.is_reachable() {
            return self.offline();
        }
        let mut ids = self.google_ids.lock().unwrap();
        let id = *ids
            .entry(input.email.to_lowercase())
            .or_insert_with(|| self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok(RemoteIdentity {
            id,
            email: input.email.to_lowercase(),
            full_name: input.name,
            role: "head".into(),
        })
    }

    async fn add_sub_user(&self, input: AddSubUserInput) -> RemoteResult<SubUserCreated> {
        if !self.is_reachable() {
            return self.offline();
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sub_users.lock().unwrap().push(RemoteSubUser {
            id,
            name: input.name,
            email: input.email.to_lowercase(),
            allowed_features: input.allowed_features,
            created_at: Some(fixed_time()),
        });
        Ok(SubUserCreated {
            id,
            created_at: fixed_time(),
        })
    }

    async fn update_sub_user(&self, _id: AccountId, _updates: &SubUserUpdate) -> RemoteResult<()> {
        if !self.is_reachable() {
            return self.offline();
        }
        if let Some(message) = self.reject_update.lock().unwrap().clone() {
            return Err(RemoteError::Rejected(message));
        }
        Ok(())
    }

    async fn delete_sub_user(&self, id: AccountId) -> RemoteResult<()> {
        if !self.is_reachable() {
            return self.offline();
        }
        self.sub_users.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn list_sub_users(&self, _head_user_id: AccountId) -> RemoteResult<Vec<RemoteSubUser>> {
        if !self.is_reachable() {
            return self.offline();
        }
        Ok(self.sub_users.lock().unwrap().clone())
    }
}
