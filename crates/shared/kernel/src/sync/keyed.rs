use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::trace;

/// Smallest table size at which dead slots are swept on the next lock.
const SWEEP_THRESHOLD: usize = 1_024;

type Slot = AsyncMutex<()>;

/// A table of async mutexes addressed by string keys.
///
/// Callers holding a guard for a key exclude every other caller for the same key while
/// callers for different keys proceed independently. Slots are reference counted and are
/// dropped from the table once no guard or waiter refers to them.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    table: Mutex<Table>,
}

#[derive(Debug)]
struct Table {
    slots: FxHashMap<String, Weak<Slot>>,
    /// Size at which the next sweep runs; twice the live count after each sweep.
    sweep_at: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self { slots: FxHashMap::default(), sweep_at: SWEEP_THRESHOLD }
    }
}

/// Exclusive access to one key of a [`KeyedLocks`] table, released on drop.
#[must_use = "the key is unlocked as soon as the guard is dropped"]
#[derive(Debug)]
pub struct KeyedGuard {
    _guard: OwnedMutexGuard<()>,
}

impl KeyedLocks {
    /// Waits until `key` is free and returns a guard holding it.
    pub async fn lock(&self, key: &str) -> KeyedGuard {
        let slot = self.slot(key);
        KeyedGuard { _guard: slot.lock_owned().await }
    }

    /// Number of keys currently tracked, including slots awaiting a sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.lock().slots.len()
    }

    fn slot(&self, key: &str) -> Arc<Slot> {
        let mut table = self.table.lock();

        if let Some(slot) = table.slots.get(key).and_then(Weak::upgrade) {
            return slot;
        }

        if table.slots.len() >= table.sweep_at {
            let before = table.slots.len();
            table.slots.retain(|_, slot| slot.strong_count() > 0);
            table.sweep_at = table.slots.len().saturating_mul(2).max(SWEEP_THRESHOLD);
            trace!(swept = before - table.slots.len(), next = table.sweep_at, "Swept idle key slots");
        }

        let slot = Arc::new(Slot::new(()));
        table.slots.insert(key.to_owned(), Arc::downgrade(&slot));
        slot
    }
}
