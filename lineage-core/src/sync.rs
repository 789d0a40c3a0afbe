//! Shared Access
//!
//! [`Dag`] is a plain single-threaded structure. Traversals read adjacency
//! that a concurrent mutation could change halfway through, so a store
//! shared between threads sits behind one exclusive lock for the whole
//! graph. There is no finer-grained locking.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::graph::{Dag, DagConfig};

/// A cloneable, thread-safe handle to a single [`Dag`].
#[derive(Debug, Clone, Default)]
pub struct SharedDag {
    inner: Arc<Mutex<Dag>>,
}

impl SharedDag {
    /// Create a handle to a new empty graph.
    pub fn new() -> Self {
        Self::from(Dag::new())
    }

    /// Create a handle to a new empty graph with the given configuration.
    pub fn with_config(config: DagConfig) -> Self {
        Self::from(Dag::with_config(config))
    }

    /// Acquire the lock.
    ///
    /// The guard must not be held across a call that locks the same handle.
    pub fn lock(&self) -> MutexGuard<'_, Dag> {
        self.inner.lock()
    }

    /// Run a read-only closure under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Dag) -> R) -> R {
        f(&*self.inner.lock())
    }

    /// Run a mutating closure under the lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Dag) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// Take the graph out if this is the last handle, or get the handle
    /// back otherwise.
    pub fn into_inner(self) -> Result<Dag, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Dag> for SharedDag {
    fn from(dag: Dag) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dag)),
        }
    }
}
