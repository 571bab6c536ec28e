//! Snapshot store trait — durable local persistence of the roster and
//! the current-account pointer.
//!
//! The whole state is one serialized record under a single slot, read
//! once at startup and rewritten after every mutation.

use serde::{Deserialize, Serialize};

use crate::error::SmartadsResult;
use crate::models::Account;

/// The persisted record: full roster plus the logged-in account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub current_account: Option<Account>,
}

pub trait SnapshotStore: Send + Sync {
    /// Read the persisted snapshot. `Ok(None)` means nothing usable is
    /// stored — including malformed content, which implementations
    /// treat as absent rather than failing the caller.
    fn load(&self) -> impl Future<Output = SmartadsResult<Option<Snapshot>>> + Send;

    /// Replace the persisted snapshot.
    fn save(&self, snapshot: &Snapshot) -> impl Future<Output = SmartadsResult<()>> + Send;
}
