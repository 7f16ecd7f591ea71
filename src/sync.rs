//! Synchronization primitives with conditional compilation.
//!
//! Uses `parking_lot` locks when the `fast-lock` feature is enabled, falling
//! back to `std::sync` otherwise. The std variants recover from poisoning:
//! every guarded value in lexner is replaced wholesale, so a panicking writer
//! can never leave it half-updated.

#[cfg(feature = "fast-lock")]
pub use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(not(feature = "fast-lock"))]
pub use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock a mutex and return the guard, handling poisoning gracefully.
///
/// # Example
///
/// ```rust
/// use lexner::sync::{lock, Mutex};
///
/// let mutex = Mutex::new(42);
/// *lock(&mutex) += 1;
/// assert_eq!(*lock(&mutex), 43);
/// ```
#[cfg(feature = "fast-lock")]
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock()
}

#[cfg(not(feature = "fast-lock"))]
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Acquire a shared read guard.
#[cfg(feature = "fast-lock")]
pub fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read()
}

#[cfg(not(feature = "fast-lock"))]
pub fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

/// Acquire an exclusive write guard.
#[cfg(feature = "fast-lock")]
pub fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write()
}

#[cfg(not(feature = "fast-lock"))]
pub fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_rwlock_readers_and_writer() {
        let value = Arc::new(RwLock::new(0usize));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let value = Arc::clone(&value);
                thread::spawn(move || {
                    for _ in 0..100 {
                        *write(&value) += 1;
                        let _ = *read(&value);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(*read(&value), 400);
    }
}
