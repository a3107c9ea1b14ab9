//! Striped per-id mutual exclusion.

use parking_lot::{Mutex, MutexGuard};
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

/// Number of lock stripes shared by all ids.
pub(crate) const STRIPES: usize = 64;

/// Fixed table of locks, each id hashed onto one stripe.
///
/// A stripe is only held around a provider read-compare-write, never while
/// hooks run, so a thread holds at most one stripe at a time. The table
/// does not grow with the number of ids seen.
pub(crate) struct IdLocks {
    stripes: Box<[Mutex<()>]>,
    hasher: RandomState,
}

impl IdLocks {
    /// Lock the stripe of `id`.
    pub(crate) fn lock(&self, id: &str) -> MutexGuard<'_, ()> {
        self.stripes[self.stripe(id)].lock()
    }

    pub(crate) fn stripe(&self, id: &str) -> usize {
        (self.hasher.hash_one(id) as usize) % self.stripes.len()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.stripes.len()
    }
}

impl Default for IdLocks {
    fn default() -> Self {
        Self {
            stripes: (0..STRIPES).map(|_| Mutex::new(())).collect(),
            hasher: RandomState::new(),
        }
    }
}
