use std::collections::HashMap;
use std::process;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::lock::{Lockable, ReentrantLock};

/// Identity-keyed lock table: one reentrant lock per distinct object
/// identity, created on first use.
///
/// Entries are never removed, so the table grows with the number of distinct
/// identities ever synchronized through it, not with call count. Own one per
/// application context instead of reaching for a global.
pub struct MonitorTable {
    locks: Mutex<HashMap<usize, Arc<ReentrantLock>>>,
}

impl MonitorTable {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of identities that have been synchronized through this table.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }

    /// Run `work` while holding the lock associated with `object`'s identity.
    ///
    /// Calls keyed on the same referent serialize; distinct referents never
    /// block each other here. The per-identity lock is reentrant, so nesting
    /// `synchronized` on one identity within one thread does not self-deadlock.
    /// `work`'s output is handed back untouched, and the lock is released on
    /// every exit path including unwinding.
    ///
    /// Identity is the referent's address: keep `object` alive for as long as
    /// anything synchronizes on it, or a later allocation at the same address
    /// would share its lock.
    ///
    /// Aborts the process if the lock turns out not to be held at release
    /// time. That means lock/unlock balance is already corrupted, and
    /// continuing would run the next critical section unsynchronized.
    pub fn synchronized<T: ?Sized, R>(&self, object: &T, work: impl FnOnce() -> R) -> R {
        let lock = self.lock_for(object);

        lock.lock();
        let _release = Exit { lock: &lock };

        work()
    }

    fn lock_for<T: ?Sized>(&self, object: &T) -> Arc<ReentrantLock> {
        let key = (object as *const T).cast::<()>() as usize;

        // insert-if-absent under the table mutex: a first-use race from two
        // threads must not mint two locks for one identity
        self.locks
            .lock()
            .entry(key)
            .or_insert_with(|| Arc::new(ReentrantLock::new()))
            .clone()
    }
}

impl Default for MonitorTable {
    fn default() -> Self {
        Self::new()
    }
}

struct Exit<'l> {
    lock: &'l ReentrantLock,
}

impl<'l> Drop for Exit<'l> {
    fn drop(&mut self) {
        if !self.lock.is_held_by_current_thread() {
            process::abort();
        }

        self.lock.unlock();
    }
}
