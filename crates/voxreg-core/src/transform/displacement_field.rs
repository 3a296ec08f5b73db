//! Displacement field transform reference.
//!
//! A dense displacement field is a non-linear transform where each voxel has
//! its own displacement vector. The field image itself belongs to the image
//! layer; transforms only carry a reference to it. Fields are stored already
//! in the convention the resampler needs, so forward and backward fields are
//! separate artifacts and never derived from one another.

use std::fmt;

/// Opaque reference to a dense 3D displacement field image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplacementField {
    /// File name of the vector-field image, relative to the document that
    /// references it.
    file_name: String,
}

impl DisplacementField {
    /// Create a reference to the field stored in `file_name`.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self { file_name: file_name.into() }
    }

    /// Get the referenced file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for DisplacementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "displacement field '{}'", self.file_name)
    }
}
