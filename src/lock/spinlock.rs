use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::Backoff;
use parking_lot::lock_api::{self, GuardSend, RawRwLock};

const WRITE_LOCKED: usize = usize::MAX;

/// Reader-writer spin lock.
///
/// `state` is the number of shared holders, or `WRITE_LOCKED` while a writer holds it.
/// Readers are never blocked by waiting writers, so a steady read stream can starve a writer.
pub struct RawSpinRwLock {
    state: AtomicUsize,
}

impl RawSpinRwLock {
    pub const fn new() -> Self {
        Self {
            state: AtomicUsize::new(0),
        }
    }
}

unsafe impl RawRwLock for RawSpinRwLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawSpinRwLock::new();

    type GuardMarker = GuardSend;

    fn lock_shared(&self) {
        let backoff = Backoff::new();

        while !self.try_lock_shared() {
            backoff.snooze();
        }
    }

    fn try_lock_shared(&self) -> bool {
        let mut state = self.state.load(Ordering::Relaxed);

        loop {
            if state == WRITE_LOCKED {
                return false;
            }

            assert!(state < WRITE_LOCKED - 1, "too many readers");

            match self.state.compare_exchange_weak(
                state,
                state + 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(current) => state = current,
            }
        }
    }

    unsafe fn unlock_shared(&self) {
        self.state.fetch_sub(1, Ordering::Release);
    }

    fn lock_exclusive(&self) {
        let backoff = Backoff::new();

        while self
            .state
            .compare_exchange_weak(0, WRITE_LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            backoff.snooze();
        }
    }

    fn try_lock_exclusive(&self) -> bool {
        self.state
            .compare_exchange(0, WRITE_LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock_exclusive(&self) {
        self.state.store(0, Ordering::Release);
    }
}

pub type SpinRwLock<T> = lock_api::RwLock<RawSpinRwLock, T>;
