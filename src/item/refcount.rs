use std::sync::RwLock;

use crate::{Error, Result};

/// Count of external logical holders of a typed item.
///
/// Mutations take the write lock so that the check-then-decrement in
/// [`ReferenceCount::decrement`] is atomic as a whole; reads take the read lock. The lock guards
/// nothing but the counter, so property operations never contend with it.
///
/// Unlike collection buckets, a poisoned counter is not recovered: every operation then fails
/// with [`Error::LockError`], since the count may no longer match the holders.
#[derive(Debug, Default)]
pub struct ReferenceCount {
    count: RwLock<u32>,
}

impl ReferenceCount {
    /// Create a counter starting at zero
    #[must_use]
    pub fn new() -> Self {
        ReferenceCount {
            count: RwLock::new(0),
        }
    }

    /// Increment the count and return the new value
    ///
    /// # Errors
    /// Returns [`Error::CountOverflow`] if the count is already `u32::MAX`, in which case it is
    /// left unchanged, or [`Error::LockError`] if the lock was poisoned.
    pub fn increment(&self) -> Result<u32> {
        let mut count = self.count.write().map_err(|_| Error::LockError)?;
        *count = count.checked_add(1).ok_or(Error::CountOverflow)?;
        Ok(*count)
    }

    /// Decrement the count and return the new value
    ///
    /// # Errors
    /// Returns [`Error::CountUnderflow`] if the count is already zero, in which case it stays at
    /// zero, or [`Error::LockError`] if the lock was poisoned.
    pub fn decrement(&self) -> Result<u32> {
        let mut count = self.count.write().map_err(|_| Error::LockError)?;
        if *count < 1 {
            return Err(Error::CountUnderflow);
        }
        *count -= 1;
        Ok(*count)
    }

    /// The current count
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the lock was poisoned.
    pub fn get(&self) -> Result<u32> {
        let count = self.count.read().map_err(|_| Error::LockError)?;
        Ok(*count)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn test_increment_decrement() {
        let count = ReferenceCount::new();
        assert_eq!(count.get().unwrap(), 0);
        assert_eq!(count.increment().unwrap(), 1);
        assert_eq!(count.increment().unwrap(), 2);
        assert_eq!(count.decrement().unwrap(), 1);
        assert_eq!(count.get().unwrap(), 1);
    }

    #[test]
    fn test_underflow() {
        let count = ReferenceCount::new();
        assert_eq!(count.decrement(), Err(Error::CountUnderflow));
        assert_eq!(count.get().unwrap(), 0);

        count.increment().unwrap();
        count.decrement().unwrap();
        assert_eq!(count.decrement(), Err(Error::CountUnderflow));
        assert_eq!(count.get().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_balanced_updates() {
        let count = Arc::new(ReferenceCount::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let count = Arc::clone(&count);
                thread::spawn(move || {
                    for _ in 0..500 {
                        count.increment().unwrap();
                        count.decrement().unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(count.get().unwrap(), 0);
    }

    #[test]
    fn test_overflow() {
        let count = ReferenceCount {
            count: RwLock::new(u32::MAX - 1),
        };
        assert_eq!(count.increment().unwrap(), u32::MAX);
        assert_eq!(count.increment(), Err(Error::CountOverflow));
        assert_eq!(count.get().unwrap(), u32::MAX);
        assert_eq!(count.decrement().unwrap(), u32::MAX - 1);
    }

    #[test]
    fn test_concurrent_decrements_stop_at_zero() {
        const START: u32 = 1000;
        const THREADS: usize = 8;
        const PER_THREAD: usize = 250;

        let count = Arc::new(ReferenceCount::new());
        for _ in 0..START {
            count.increment().unwrap();
        }

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let count = Arc::clone(&count);
                thread::spawn(move || {
                    let mut succeeded = 0;
                    let mut underflowed = 0;
                    for _ in 0..PER_THREAD {
                        match count.decrement() {
                            Ok(_) => succeeded += 1,
                            Err(Error::CountUnderflow) => underflowed += 1,
                            Err(e) => panic!("unexpected error: {e}"),
                        }
                    }
                    (succeeded, underflowed)
                })
            })
            .collect();

        let (mut succeeded, mut underflowed) = (0, 0);
        for handle in handles {
            let (ok, err) = handle.join().unwrap();
            succeeded += ok;
            underflowed += err;
        }

        assert_eq!(succeeded, START as usize);
        assert_eq!(underflowed, THREADS * PER_THREAD - START as usize);
        assert_eq!(count.get().unwrap(), 0);
    }
}
