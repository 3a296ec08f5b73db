//! Persistence hook for registries.
//!
//! Propagation never performs I/O itself; callers hand the updated
//! registries to a [`RegistryStore`]. `voxreg-io` provides the XML file
//! store used by applications.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use crate::error::{RegistrationError, Result};
use crate::registry::TransformRegistry;
use crate::space::SpaceDescriptor;

/// Saves and loads the registry of a space at its storage location.
pub trait RegistryStore {
    /// Persist `registry` at `space`'s storage location.
    fn save(&mut self, space: &SpaceDescriptor, registry: &TransformRegistry) -> Result<()>;

    /// Load the registry stored for `space`, or `None` when nothing has
    /// been stored yet.
    fn load(&self, space: &SpaceDescriptor) -> Result<Option<TransformRegistry>>;
}

/// Storage location of `space`, or a persistence error when it has none.
pub fn storage_location(space: &SpaceDescriptor) -> Result<&Path> {
    space
        .storage()
        .ok_or_else(|| RegistrationError::persistence(space.id(), "space has no storage location"))
}

/// Registry store keeping registries in memory, keyed by storage location.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistryStore {
    registries: HashMap<PathBuf, TransformRegistry>,
}

impl MemoryRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    /// Registry stored at `path`, if any.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&TransformRegistry> {
        self.registries.get(path.as_ref())
    }
}

impl RegistryStore for MemoryRegistryStore {
    fn save(&mut self, space: &SpaceDescriptor, registry: &TransformRegistry) -> Result<()> {
        let path = storage_location(space)?.to_path_buf();
        tracing::debug!(
            space = %space.id(),
            path = %path.display(),
            entries = registry.len(),
            "registry stored in memory"
        );
        self.registries.insert(path, registry.clone());
        Ok(())
    }

    fn load(&self, space: &SpaceDescriptor) -> Result<Option<TransformRegistry>> {
        let path = storage_location(space)?;
        Ok(self.registries.get(path).cloned())
    }
}
