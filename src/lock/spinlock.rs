use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_utils::Backoff;

use super::Lockable;

/// Busy-waiting lock.
///
/// A contended `lock` burns CPU polling instead of parking the thread, so
/// waiters stay runnable and fight the holder for cores. Kept for callers
/// with measured, instruction-scale critical sections; everything else
/// belongs on [`SimpleLock`](super::SimpleLock).
#[deprecated(note = "busy-waits under contention; use SimpleLock")]
pub struct SpinLock {
    flag: AtomicBool,
}

#[allow(deprecated)]
unsafe impl Lockable for SpinLock {
    fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    fn try_lock(&self) -> bool {
        self.flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    fn lock(&self) {
        let backoff = Backoff::new();

        while self
            .flag
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            backoff.snooze();
        }
    }

    fn unlock(&self) {
        self.flag.store(false, Ordering::Release);
    }
}
