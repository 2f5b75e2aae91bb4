//! # Shared Store
//!
//! A cloneable handle that serializes access to one [`Store`].
//!
//! ## Thread Safety
//! The SQLite connection handle is not safe for unsynchronized concurrent
//! use. `SharedStore` puts the store behind a `tokio::sync::Mutex`; each
//! call holds the lock for exactly one operation.
//!
//! ```rust,ignore
//! let shared = SharedStore::new(Store::connect(config).await?);
//! let handle = shared.clone();
//! tokio::spawn(async move { handle.insert(&employee).await });
//! let all = shared.fetch_all().await?;
//! ```

use roster_core::Employee;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::DbResult;
use crate::store::Store;

/// Mutex-guarded, cloneable [`Store`] handle.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wraps `store`.
    pub fn new(store: Store) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store for a sequence of calls.
    pub async fn lock(&self) -> MutexGuard<'_, Store> {
        self.inner.lock().await
    }

    /// Inserts under the lock. See [`Store::insert`].
    pub async fn insert(&self, employee: &Employee) -> DbResult<()> {
        self.lock().await.insert(employee).await
    }

    /// Fetches every employee under the lock.
    pub async fn fetch_all(&self) -> DbResult<Vec<Employee>> {
        self.lock().await.fetch_all().await
    }

    /// Gets an employee by id; `Ok(None)` when absent.
    pub async fn fetch_by_id(&self, id: i32) -> DbResult<Option<Employee>> {
        self.lock().await.fetch_by_id(id).await
    }

    /// Rewrites a stored employee. See [`Store::update`].
    pub async fn update(&self, employee: &Employee) -> DbResult<bool> {
        self.lock().await.update(employee).await
    }

    /// Deletes by id; a missing id is a no-op.
    pub async fn delete_by_id(&self, id: i32) -> DbResult<()> {
        self.lock().await.delete_by_id(id).await
    }

    /// Number of stored employees.
    pub async fn count(&self) -> DbResult<i64> {
        self.lock().await.count().await
    }

    /// Closes the store if this is the last handle.
    ///
    /// Returns the handle back when other clones are still alive.
    pub async fn close(self) -> Result<(), SharedStore> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => {
                mutex.into_inner().close().await;
                Ok(())
            }
            Err(inner) => Err(SharedStore { inner }),
        }
    }
}
