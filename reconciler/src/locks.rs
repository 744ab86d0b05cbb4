//! Per-service mutual exclusion.
//!
//! Reconciliations of the same [`ServiceIdentity`] run one at a time;
//! different identities never wait on each other. The registry only keeps
//! weak references, so an entry lives while some reconciliation holds or
//! awaits it, including a `lock()` call that is cancelled mid-wait.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use tokio::sync::{Mutex, OwnedMutexGuard};

use corelib::ServiceIdentity;

type Slot = Arc<Mutex<()>>;

#[derive(Clone, Default)]
pub struct IdentityLocks {
    slots: Arc<parking_lot::Mutex<HashMap<ServiceIdentity, Weak<Mutex<()>>>>>,
}

/// Held for the duration of one reconciliation of `identity`.
pub struct IdentityGuard {
    guard: Option<OwnedMutexGuard<()>>,
    identity: ServiceIdentity,
    locks: IdentityLocks,
}

impl IdentityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, identity: &ServiceIdentity) -> IdentityGuard {
        let slot = self.slot(identity);
        let guard = slot.lock_owned().await;

        IdentityGuard {
            guard: Some(guard),
            identity: identity.clone(),
            locks: self.clone(),
        }
    }

    fn slot(&self, identity: &ServiceIdentity) -> Slot {
        let mut slots = self.slots.lock();
        // Entries left behind by cancelled waiters.
        slots.retain(|_, weak| weak.strong_count() > 0);

        if let Some(slot) = slots.get(identity).and_then(Weak::upgrade) {
            return slot;
        }

        let slot = Slot::default();
        slots.insert(identity.clone(), Arc::downgrade(&slot));
        slot
    }

    /// Number of identities currently held or awaited.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for IdentityGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut slots = self.locks.slots.lock();
        if slots
            .get(&self.identity)
            .is_some_and(|weak| weak.strong_count() == 0)
        {
            slots.remove(&self.identity);
        }
    }
}
