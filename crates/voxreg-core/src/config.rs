//! Numerical tolerances shared by the transform algebra.

use serde::{Deserialize, Serialize};

/// Determinant magnitude below which a linear part is treated as singular.
pub const DEFAULT_SINGULAR_EPSILON: f64 = 1e-12;

/// Element-wise tolerance of the `Mᵀ ≈ M⁻¹` orthogonality test.
pub const DEFAULT_RIGID_TOLERANCE: f64 = 1e-6;

/// Tolerance configuration.
///
/// Identity checks never use these values: `is_identity` is an exact comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Minimum `|det(M)|` for inversion and decomposition.
    pub singular_epsilon: f64,
    /// Maximum element-wise deviation between `Mᵀ` and `M⁻¹` for a rigid classification.
    pub rigid_tolerance: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            singular_epsilon: DEFAULT_SINGULAR_EPSILON,
            rigid_tolerance: DEFAULT_RIGID_TOLERANCE,
        }
    }
}

impl Tolerances {
    /// Create a tolerance config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the singular determinant epsilon.
    pub fn with_singular_epsilon(mut self, epsilon: f64) -> Self {
        self.singular_epsilon = epsilon;
        self
    }

    /// Set the rigid classification tolerance.
    pub fn with_rigid_tolerance(mut self, tolerance: f64) -> Self {
        self.rigid_tolerance = tolerance;
        self
    }

    /// Whether `determinant` is too small to invert.
    pub fn is_singular(&self, determinant: f64) -> bool {
        !determinant.is_finite() || determinant.abs() < self.singular_epsilon
    }
}
