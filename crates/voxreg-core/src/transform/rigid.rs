//! Euler-angle rotation parameterisation.
//!
//! Angles are applied X first, then Y, then Z:
//! R = R_z(gamma) * R_y(beta) * R_x(alpha)

use nalgebra::{Matrix3, Rotation3};
use serde::{Serialize, Deserialize};

/// Unit of angles passed to and returned from rotation accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    /// Convert an angle in this unit to radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => value.to_radians(),
        }
    }

    /// Convert an angle in radians to this unit.
    pub fn from_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => value.to_degrees(),
        }
    }

    /// Convert three angles in radians to this unit.
    pub fn from_radians3(self, angles: [f64; 3]) -> [f64; 3] {
        angles.map(|a| self.from_radians(a))
    }
}

/// Build the rotation matrix for Euler angles `[x, y, z]` in radians.
pub fn rotation_matrix_from_euler(angles: [f64; 3]) -> Matrix3<f64> {
    let (sx, cx) = angles[0].sin_cos();
    let (sy, cy) = angles[1].sin_cos();
    let (sz, cz) = angles[2].sin_cos();

    Matrix3::new(
        cz * cy,
        cz * sy * sx - sz * cx,
        cz * sy * cx + sz * sx,
        sz * cy,
        sz * sy * sx + cz * cx,
        sz * sy * cx - cz * sx,
        -sy,
        cy * sx,
        cy * cx,
    )
}

/// Recover Euler angles `[x, y, z]` in radians from an orthogonal matrix.
///
/// The input must be a proper rotation; a sheared or anisotropic matrix gives
/// meaningless angles and has to go through the affine decomposition instead.
pub fn euler_from_rotation_matrix(rotation: &Matrix3<f64>) -> [f64; 3] {
    let (x, y, z) = Rotation3::from_matrix_unchecked(*rotation).euler_angles();
    [x, y, z]
}
