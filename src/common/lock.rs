//! Lock helpers for [`ShareLock`](crate::ShareLock) state.
//!
//! A panic inside a critical section never leaves the guarded state half
//! written (appends happen after the pull returns), so a poisoned lock is
//! recovered instead of propagated.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
