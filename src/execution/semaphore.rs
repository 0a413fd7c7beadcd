use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A small, blocking counting semaphore bounding in-flight chunks.
///
/// Permits are returned when the [`Permit`] guard drops, so a chunk that bails out with an
/// error still frees its slot.
pub struct Semaphore {
    permits: Mutex<usize>,
    cv: Condvar,
}

/// Holds one permit until dropped.
pub struct Permit<'a> {
    sem: &'a Semaphore,
    /// Time spent blocked before the permit was granted (zero if none).
    pub waited: Duration,
}

impl Semaphore {
    /// `permits` must be non-zero; callers validate that up front.
    pub fn new(permits: usize) -> Self {
        debug_assert!(permits > 0, "permits must be > 0");
        Self {
            permits: Mutex::new(permits),
            cv: Condvar::new(),
        }
    }

    // The guarded counter stays consistent even if a holder panicked, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.permits.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until a permit is available.
    pub fn acquire(&self) -> Permit<'_> {
        let start = Instant::now();
        let mut waited = false;
        let mut available = self.lock();
        while *available == 0 {
            waited = true;
            available = self
                .cv
                .wait(available)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *available -= 1;
        Permit {
            sem: self,
            waited: if waited { start.elapsed() } else { Duration::ZERO },
        }
    }

    fn release(&self) {
        *self.lock() += 1;
        self.cv.notify_one();
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.sem.release();
    }
}
