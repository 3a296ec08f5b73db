//! Spaces taking part in a registration.
//!
//! Volumes, ROIs and meshes live outside this crate; propagation only needs
//! their id, their voxel geometry, whether they are template spaces, and
//! where their registry is stored.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use voxreg_core::{Size3, Spacing3};
use crate::registry::TransformRegistry;

/// Identity and geometry of a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceDescriptor {
    id: String,
    size: Size3,
    spacing: Spacing3,
    is_template: bool,
    storage: Option<PathBuf>,
}

impl SpaceDescriptor {
    pub fn new(id: impl Into<String>, size: Size3, spacing: Spacing3) -> Self {
        Self {
            id: id.into(),
            size,
            spacing,
            is_template: false,
            storage: None,
        }
    }

    /// Mark the space as a template. Propagation never writes into the
    /// registry of a template space.
    pub fn with_template(mut self, is_template: bool) -> Self {
        self.is_template = is_template;
        self
    }

    /// Location the space's registry is persisted to.
    pub fn with_storage(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage = Some(path.into());
        self
    }

    /// Descriptor of a space resampled onto this space's grid.
    pub fn resampled(&self, id: impl Into<String>) -> Self {
        Self::new(id, self.size, self.spacing)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> Size3 {
        self.size
    }

    pub fn spacing(&self) -> Spacing3 {
        self.spacing
    }

    pub fn is_template(&self) -> bool {
        self.is_template
    }

    pub fn storage(&self) -> Option<&Path> {
        self.storage.as_deref()
    }
}

/// A space together with its registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    pub descriptor: SpaceDescriptor,
    pub registry: TransformRegistry,
}

impl Space {
    /// Create a space with an empty registry.
    pub fn new(descriptor: SpaceDescriptor) -> Self {
        let registry = TransformRegistry::new(descriptor.id());
        Self { descriptor, registry }
    }

    /// Pair a descriptor with a previously loaded registry.
    pub fn with_registry(descriptor: SpaceDescriptor, registry: TransformRegistry) -> Self {
        Self { descriptor, registry }
    }

    pub fn id(&self) -> &str {
        self.descriptor.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let space = SpaceDescriptor::new("ct", [512, 512, 120], Spacing3::new([0.7, 0.7, 2.5]))
            .with_template(true)
            .with_storage("/data/ct/registry.xml");
        assert_eq!(space.id(), "ct");
        assert!(space.is_template());
        assert_eq!(space.storage(), Some(Path::new("/data/ct/registry.xml")));
    }

    #[test]
    fn test_resampled_shares_geometry() {
        let fixed = SpaceDescriptor::new("ct", [512, 512, 120], Spacing3::new([0.7, 0.7, 2.5]))
            .with_template(true)
            .with_storage("/data/ct/registry.xml");
        let resampled = fixed.resampled("mr-on-ct");
        assert_eq!(resampled.size(), fixed.size());
        assert_eq!(resampled.spacing(), fixed.spacing());
        assert!(!resampled.is_template());
        assert!(resampled.storage().is_none());
    }

    #[test]
    fn test_space_starts_with_empty_registry() {
        let space = Space::new(SpaceDescriptor::new("mr", [1, 1, 1], Spacing3::uniform(1.0)));
        assert_eq!(space.registry.reference_space_id(), "mr");
        assert!(space.registry.is_empty());
    }
}
