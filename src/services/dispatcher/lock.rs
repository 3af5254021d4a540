//! Re-entry lock held for the duration of one destructive call.

use std::cell::Cell;
use std::rc::Rc;

/// Shared flag between the engine and its dispatcher.
///
/// Clones observe the same flag. Acquiring hands out a guard that releases the
/// lock when dropped, whether the call succeeded, failed or was abandoned.
#[derive(Debug, Clone, Default)]
pub struct DestructiveLock {
    held: Rc<Cell<bool>>,
}

impl DestructiveLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }

    /// Take the lock, or `None` if a destructive call is already running.
    pub fn try_acquire(&self) -> Option<LockGuard> {
        if self.held.replace(true) {
            return None;
        }
        Some(LockGuard {
            held: Rc::clone(&self.held),
        })
    }
}

#[derive(Debug)]
pub struct LockGuard {
    held: Rc<Cell<bool>>,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.held.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_guard_dropped() {
        let lock = DestructiveLock::new();
        let guard = lock.try_acquire();

        assert!(guard.is_some());
        assert!(lock.is_held());
        assert!(lock.try_acquire().is_none());

        drop(guard);
        assert!(!lock.is_held());
        assert!(lock.try_acquire().is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let lock = DestructiveLock::new();
        let other = lock.clone();
        let _guard = lock.try_acquire().unwrap();

        assert!(other.is_held());
    }

    #[test]
    fn test_failed_acquire_keeps_lock_held() {
        let lock = DestructiveLock::new();
        let _guard = lock.try_acquire().unwrap();
        assert!(lock.try_acquire().is_none());
        assert!(lock.is_held());
    }
}
