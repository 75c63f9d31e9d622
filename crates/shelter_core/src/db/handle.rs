//! Process-wide store handle.
//!
//! # Responsibility
//! - Lazily open exactly one migrated SQLite connection per process.
//! - Serialize access to that connection across threads.
//! - Support explicit teardown so the store can be reopened.
//!
//! # Invariants
//! - Concurrent first callers construct at most one connection.
//! - A live handle is never silently rebound to a different path.

use super::open::open_db;
use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

static STORE_HANDLE: RwLock<Option<Arc<StoreHandle>>> = RwLock::new(None);

/// Shared handle to the on-device animal store.
#[derive(Debug)]
pub struct StoreHandle {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl StoreHandle {
    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `f` with exclusive access to the connection.
    ///
    /// Lock poisoning is ignored; a transaction interrupted by a panic is
    /// rolled back when it is dropped.
    pub fn with_conn<T, E>(&self, f: impl FnOnce(&mut Connection) -> Result<T, E>) -> Result<T, E> {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Returns the process-wide store, opening it at `path` on first use.
///
/// # Errors
/// - `DbError::StoreAlreadyOpen` when a handle for another path is live.
/// - Any open/migration error from `open_db`.
pub fn get_or_open_store(path: impl AsRef<Path>) -> DbResult<Arc<StoreHandle>> {
    let requested = path.as_ref().to_path_buf();

    {
        let slot = STORE_HANDLE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.as_ref() {
            return ensure_same_path(handle, requested);
        }
    }

    let mut slot = STORE_HANDLE.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(handle) = slot.as_ref() {
        return ensure_same_path(handle, requested);
    }

    let conn = open_db(&requested)?;
    let handle = Arc::new(StoreHandle {
        path: requested,
        conn: Mutex::new(conn),
    });
    *slot = Some(Arc::clone(&handle));
    info!(
        "event=store_handle module=db status=opened path={}",
        handle.path.display()
    );
    Ok(handle)
}

/// Returns the live store handle, if any.
pub fn current_store() -> Option<Arc<StoreHandle>> {
    STORE_HANDLE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Drops the process-wide handle.
///
/// Outstanding `Arc` clones keep their connection until released; later
/// calls to `get_or_open_store` open a fresh connection.
///
/// Returns `true` when a handle was live.
pub fn close_store() -> bool {
    let previous = STORE_HANDLE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    match previous {
        Some(handle) => {
            info!(
                "event=store_handle module=db status=closed path={}",
                handle.path.display()
            );
            true
        }
        None => false,
    }
}

fn ensure_same_path(handle: &Arc<StoreHandle>, requested: PathBuf) -> DbResult<Arc<StoreHandle>> {
    if handle.path != requested {
        return Err(DbError::StoreAlreadyOpen {
            active: handle.path.clone(),
            requested,
        });
    }
    Ok(Arc::clone(handle))
}
