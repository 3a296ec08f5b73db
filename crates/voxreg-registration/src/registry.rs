//! Insertion-ordered collection of the transforms leaving one space.
//!
//! The registry of space `X` holds, under key `Y`, the transform mapping
//! `X` coordinates into `Y` coordinates. The key is always the transform's
//! `target_space_id`, so a registry never holds two transforms to the same
//! space.

use indexmap::map::{IndexMap, Iter, Keys};
use voxreg_core::{Size3, Spacing3, Transform};
use crate::error::{RegistrationError, Result};

/// Transforms from one reference space to every space registered with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformRegistry {
    reference_space_id: String,
    entries: IndexMap<String, Transform>,
}

impl TransformRegistry {
    /// Create an empty registry for `reference_space_id`.
    pub fn new(reference_space_id: impl Into<String>) -> Self {
        Self {
            reference_space_id: reference_space_id.into(),
            entries: IndexMap::new(),
        }
    }

    /// Id of the space every transform in this registry maps from.
    pub fn reference_space_id(&self) -> &str {
        &self.reference_space_id
    }

    /// Store `transform` under its target space id.
    ///
    /// An existing entry is replaced in place (keeping its position) when
    /// `replace` is set; otherwise the call is a no-op. Returns whether the
    /// registry was written.
    pub fn append(&mut self, transform: Transform, replace: bool) -> bool {
        let key = transform.target_space_id().to_string();
        if let Some(existing) = self.entries.get_mut(&key) {
            if !replace {
                tracing::trace!(
                    reference = %self.reference_space_id,
                    key = %key,
                    "entry exists, append skipped"
                );
                return false;
            }
            *existing = transform;
            tracing::trace!(reference = %self.reference_space_id, key = %key, "entry replaced");
            return true;
        }
        tracing::trace!(reference = %self.reference_space_id, key = %key, "entry appended");
        self.entries.insert(key, transform);
        true
    }

    /// Remove the transform stored under `key`, preserving the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Transform> {
        let removed = self.entries.shift_remove(key);
        if removed.is_some() {
            tracing::trace!(reference = %self.reference_space_id, key = %key, "entry removed");
        }
        removed
    }

    pub fn get(&self, key: &str) -> Option<&Transform> {
        self.entries.get(key)
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn try_get(&self, key: &str) -> Result<&Transform> {
        self.entries
            .get(key)
            .ok_or_else(|| RegistrationError::key_not_found(&self.reference_space_id, key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_, String, Transform> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Keys<'_, String, Transform> {
        self.entries.keys()
    }

    /// Transforms in insertion order.
    pub fn transforms(&self) -> impl Iterator<Item = &Transform> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries; same as [`len`](Self::len).
    pub fn count(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register the identity mapping of the reference space onto itself.
    ///
    /// An existing self entry is left untouched.
    pub fn seed_identity(&mut self, size: Size3, spacing: Spacing3) -> bool {
        let identity = Transform::identity(self.reference_space_id.clone())
            .with_name(self.reference_space_id.clone())
            .with_geometry(size, spacing);
        self.append(identity, false)
    }

    /// Append every entry of `other`. Returns the number of entries written.
    pub fn merge(&mut self, other: &TransformRegistry, replace: bool) -> usize {
        let mut written = 0;
        for transform in other.transforms() {
            if self.append(transform.clone(), replace) {
                written += 1;
            }
        }
        written
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Transform) -> bool) {
        self.entries.retain(|key, transform| keep(key, transform));
    }
}

impl<'a> IntoIterator for &'a TransformRegistry {
    type Item = (&'a String, &'a Transform);
    type IntoIter = Iter<'a, String, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
