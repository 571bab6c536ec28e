//! In-memory snapshot store for tests.

use std::sync::{Arc, Mutex};

use smartads_core::error::SmartadsResult;
use smartads_core::store::{Snapshot, SnapshotStore};

/// Holds the snapshot in process memory. Test-oriented counterpart of
/// [`crate::FileStore`]; clones share the same slot, so a "restarted"
/// service built from a clone sees what the previous one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Snapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start pre-populated, as if a previous run had persisted state.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    /// Inspect what was last saved.
    pub fn stored(&self) -> Option<Snapshot> {
        self.slot.lock().expect("store lock poisoned").clone()
    }
}

impl SnapshotStore for MemoryStore {
    async fn load(&self) -> SmartadsResult<Option<Snapshot>> {
        Ok(self.slot.lock().expect("store lock poisoned").clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> SmartadsResult<()> {
        *self.slot.lock().expect("store lock poisoned") = Some(snapshot.clone());
        Ok(())
    }
}
