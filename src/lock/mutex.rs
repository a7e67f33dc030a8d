use parking_lot::lock_api::RawMutex as RMutex;

use super::Lockable;

/// Blocking, non-reentrant lock.
///
/// A second `lock` from the thread already holding it does not succeed and
/// does not fail; it blocks forever. Use [`ReentrantLock`](super::ReentrantLock)
/// when nested acquisition is expected.
pub struct SimpleLock {
    inner: parking_lot::RawMutex,
}

unsafe impl Lockable for SimpleLock {
    #[inline]
    fn new() -> Self {
        Self {
            inner: RMutex::INIT,
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
