use parking_lot::lock_api::RawReentrantMutex;
use parking_lot::RawThreadId;

use super::Lockable;

type RawReentrant = RawReentrantMutex<parking_lot::RawMutex, RawThreadId>;

/// Blocking, recursive lock.
///
/// N nested `lock` calls by one thread require exactly N `unlock` calls
/// before another thread can acquire.
pub struct ReentrantLock {
    inner: RawReentrant,
}

impl ReentrantLock {
    /// Whether the calling thread currently holds this lock.
    ///
    /// Releasing a lock that is not held is undefined behaviour in the
    /// underlying primitive; callers that cannot prove lock/unlock balance
    /// check this first (the monitor table does).
    pub fn is_held_by_current_thread(&self) -> bool {
        self.inner.is_owned_by_current_thread()
    }
}

unsafe impl Lockable for ReentrantLock {
    #[inline]
    fn new() -> Self {
        Self {
            inner: RawReentrant::INIT,
        }
    }

    #[inline]
    fn try_lock(&self) -> bool {
        self.inner.try_lock()
    }

    #[inline]
    fn lock(&self) {
        self.inner.lock();
    }

    #[inline]
    fn unlock(&self) {
        unsafe { self.inner.unlock() };
    }
}
