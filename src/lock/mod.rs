pub mod mutex;
pub mod reentrant;
pub mod spinlock;

pub use mutex::SimpleLock;
pub use reentrant::ReentrantLock;
#[allow(deprecated)]
pub use spinlock::SpinLock;

/// Capability for mutual exclusion: anything that can be locked and unlocked.
///
/// Implementations must guarantee that between a `lock` returning and the
/// matching `unlock`, no other context observes the lock as acquirable. The
/// trait is `unsafe` because callers rely on that exclusion for memory safety.
pub unsafe trait Lockable {
    fn new() -> Self;

    /// Non-blocking: try locking. If succeeding, return true, or false.
    fn try_lock(&self) -> bool;

    /// Blocking: get locking or wait until getting locking.
    fn lock(&self);

    /// Release lock. Valid only after a matching `lock` by the current holder.
    fn unlock(&self);

    /// Run `work` while holding the lock. See [`with_lock`].
    fn with<R>(&self, work: impl FnOnce() -> R) -> R
    where
        Self: Sized,
    {
        with_lock(self, work)
    }
}

/// Acquire `lock`, run `work`, release.
///
/// The release runs exactly once on every exit path, including when `work`
/// unwinds. `work`'s output is handed back untouched; a `work` returning
/// `Result` propagates its `Err` to the caller with the lock already free.
pub fn with_lock<L: Lockable, R>(lock: &L, work: impl FnOnce() -> R) -> R {
    lock.lock();
    let _release = Release { lock };

    work()
}

struct Release<'l, L: Lockable> {
    lock: &'l L,
}

impl<'l, L: Lockable> Drop for Release<'l, L> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}
