//! In-memory resource store.

use dashmap::DashMap;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_entity::resource::{Resource, ResourceKind};

/// DashMap-backed content storage.
///
/// `mutate` runs its closure under the entry's write lock, which is
/// what keeps enrollment changes atomic: check and insert happen in one
/// critical section, so two racing enrolls cannot both pass the
/// roster check.
#[derive(Debug, Default)]
pub struct ResourceStore {
    resources: DashMap<Uuid, Resource>,
}

impl ResourceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            resources: DashMap::new(),
        }
    }

    /// Stores a new resource.
    pub fn insert(&self, resource: Resource) {
        self.resources.insert(resource.id, resource);
    }

    /// Fetches a resource by ID.
    pub fn get(&self, id: Uuid) -> Option<Resource> {
        self.resources.get(&id).map(|entry| entry.clone())
    }

    /// All resources of a kind.
    pub fn list_by_kind(&self, kind: ResourceKind) -> Vec<Resource> {
        self.resources
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.clone())
            .collect()
    }

    /// Removes a resource. Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.resources.remove(&id).is_some()
    }

    /// Mutates a resource under its entry lock.
    ///
    /// The closure may fail, in which case nothing is committed beyond
    /// what the closure itself wrote before failing — closures are
    /// expected to validate first and mutate last. Returns the updated
    /// resource on success.
    pub fn mutate<F>(&self, id: Uuid, f: F) -> Result<Resource, AppError>
    where
        F: FnOnce(&mut Resource) -> Result<(), AppError>,
    {
        let mut entry = self
            .resources
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        f(entry.value_mut())?;
        Ok(entry.clone())
    }
}
