use crate::activity::{Activity, Directory};
use crate::catalog::Catalog;
use crate::error::{ActivityError, Result};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared, lock-guarded activity table.
///
/// Cloning is cheap and every clone sees the same table. Signup and
/// unregister hold the write lock across the membership check and the
/// mutation, so two requests for the same email cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    inner: Arc<RwLock<Directory>>,
}

impl ActivityStore {
    pub fn new(directory: Directory) -> Self {
        Self {
            inner: Arc::new(RwLock::new(directory)),
        }
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.to_directory())
    }

    /// A store holding the built-in catalog.
    pub fn seeded() -> Self {
        Self::from_catalog(&Catalog::builtin())
    }

    /// Snapshot of the whole table.
    pub fn list(&self) -> Directory {
        self.read().clone()
    }

    pub fn get(&self, name: &str) -> Result<Activity> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| ActivityError::ActivityNotFound(name.to_string()))
    }

    /// Add `email` to the roster of `activity`. Capacity is not enforced.
    pub fn signup(&self, activity: &str, email: &str) -> Result<String> {
        let mut dir = self.write();
        let entry = dir
            .get_mut(activity)
            .ok_or_else(|| ActivityError::ActivityNotFound(activity.to_string()))?;

        if entry.is_registered(email) {
            return Err(ActivityError::AlreadySignedUp {
                activity: activity.to_string(),
                email: email.to_string(),
            });
        }
        entry.participants.push(email.to_string());

        Ok(format!("Signed up {email} for {activity}"))
    }

    /// Remove `email` from the roster of `activity`.
    pub fn unregister(&self, activity: &str, email: &str) -> Result<String> {
        let mut dir = self.write();
        let entry = dir
            .get_mut(activity)
            .ok_or_else(|| ActivityError::ActivityNotFound(activity.to_string()))?;

        let pos = entry
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| ActivityError::NotRegistered {
                activity: activity.to_string(),
                email: email.to_string(),
            })?;
        entry.participants.remove(pos);

        Ok(format!("Unregistered {email} from {activity}"))
    }

    // The table has no multi-step invariants a panicking writer could leave
    // half-applied, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Directory> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Directory> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
