//! File-backed registry store.

use std::fs;
use std::path::{Path, PathBuf};

use voxreg_registration::store::storage_location;
use voxreg_registration::{RegistrationError, RegistryStore, SpaceDescriptor, TransformRegistry};

use crate::document::{read_registry, registry_to_string};
use crate::error::DocumentError;

/// Stores each registry as an XML document at its space's storage location.
///
/// Relative locations are resolved against the base directory when one is
/// set. Documents are written to a sibling temporary file first and then
/// renamed over the target.
#[derive(Debug, Clone, Default)]
pub struct XmlRegistryStore {
    base_dir: Option<PathBuf>,
}

impl XmlRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Resolved document path for `space`.
    pub fn path_for(&self, space: &SpaceDescriptor) -> Result<PathBuf, RegistrationError> {
        let location = storage_location(space)?;
        Ok(match &self.base_dir {
            Some(base) if location.is_relative() => base.join(location),
            _ => location.to_path_buf(),
        })
    }
}

fn persistence(space: &SpaceDescriptor, err: DocumentError) -> RegistrationError {
    RegistrationError::persistence(space.id(), err.to_string())
}

fn write_atomically(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(())
}

impl RegistryStore for XmlRegistryStore {
    fn save(
        &mut self,
        space: &SpaceDescriptor,
        registry: &TransformRegistry,
    ) -> Result<(), RegistrationError> {
        let path = self.path_for(space)?;
        let xml = registry_to_string(registry).map_err(|e| persistence(space, e))?;
        write_atomically(&path, &xml).map_err(|e| persistence(space, e.into()))?;
        tracing::info!(
            space = %space.id(),
            path = %path.display(),
            entries = registry.len(),
            "registry saved"
        );
        Ok(())
    }

    fn load(
        &self,
        space: &SpaceDescriptor,
    ) -> Result<Option<TransformRegistry>, RegistrationError> {
        let path = self.path_for(space)?;
        if !path.exists() {
            tracing::debug!(
                space = %space.id(),
                path = %path.display(),
                "no stored registry"
            );
            return Ok(None);
        }
        let registry = read_registry(&path).map_err(|e| persistence(space, e))?;
        if registry.reference_space_id() != space.id() {
            return Err(RegistrationError::persistence(
                space.id(),
                format!(
                    "{} holds the registry of '{}'",
                    path.display(),
                    registry.reference_space_id()
                ),
            ));
        }
        tracing::info!(
            space = %space.id(),
            path = %path.display(),
            entries = registry.len(),
            "registry loaded"
        );
        Ok(Some(registry))
    }
}
