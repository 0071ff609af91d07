//! Lock-guarded chain handle for sharing across threads.
//!
//! [`Chain`] has no internal locking. `SharedChain` wraps one in an
//! `Arc<Mutex<_>>` so several owners can mutate it in turn; each `lock` or
//! `with` call is atomic, sequences of calls are not.

use crate::chain::Chain;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// A cloneable, mutex-guarded handle to a single chain.
#[derive(Debug)]
pub struct SharedChain<K, V> {
    inner: Arc<Mutex<Chain<K, V>>>,
}

impl<K, V> SharedChain<K, V> {
    /// Create a handle around an empty chain.
    pub fn new() -> Self {
        Self::from(Chain::new())
    }

    /// Lock the chain for the lifetime of the returned guard.
    pub fn lock(&self) -> MutexGuard<'_, Chain<K, V>> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the chain.
    pub fn with<R>(&self, f: impl FnOnce(&mut Chain<K, V>) -> R) -> R {
        let mut chain = self.inner.lock();
        f(&mut chain)
    }

    /// Clone the current content.
    pub fn snapshot(&self) -> Chain<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.inner.lock().clone()
    }

    /// Take the chain back if this is the last handle.
    pub fn into_inner(self) -> Result<Chain<K, V>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner()),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<K, V> Clone for SharedChain<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SharedChain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> From<Chain<K, V>> for SharedChain<K, V> {
    fn from(chain: Chain<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(chain)),
        }
    }
}
