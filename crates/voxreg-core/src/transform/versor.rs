//! Versor (unit quaternion) and angle-axis rotation parameterisations.
//!
//! Robust against gimbal lock; conversions go through nalgebra's
//! `UnitQuaternion`.

use nalgebra::{Matrix3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3 as NaVector3};
use crate::error::{Result, TransformError};
use crate::spatial::{Vector, Vector3};

/// Unit quaternion stored as (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Versor {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Versor {
    /// Create a versor, normalising the components.
    ///
    /// Fails when all four components are zero.
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Result<Self> {
        let norm = (x * x + y * y + z * z + w * w).sqrt();
        if !norm.is_finite() || norm < f64::EPSILON {
            return Err(TransformError::invalid_parameter(
                "versor components must not all be zero",
            ));
        }
        Ok(Self { x: x / norm, y: y / norm, z: z / norm, w: w / norm })
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }

    /// Build the versor of an orthogonal rotation matrix.
    pub fn from_rotation_matrix(rotation: &Matrix3<f64>) -> Self {
        let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*rotation));
        Self::from(q)
    }

    /// Build the rotation matrix of this versor.
    pub fn to_rotation_matrix(&self) -> Matrix3<f64> {
        self.to_unit_quaternion().to_rotation_matrix().into_inner()
    }

    /// Convert to nalgebra's unit quaternion.
    pub fn to_unit_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_quaternion(Quaternion::new(self.w, self.x, self.y, self.z))
    }

    /// Components as `[x, y, z, w]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<UnitQuaternion<f64>> for Versor {
    fn from(q: UnitQuaternion<f64>) -> Self {
        let q = q.into_inner();
        Self { x: q.i, y: q.j, z: q.k, w: q.w }
    }
}

/// Rotation by `angle` radians about a unit `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleAxis {
    pub angle: f64,
    pub axis: Vector3,
}

impl AngleAxis {
    /// Create an angle-axis rotation, normalising the axis.
    pub fn new(angle: f64, axis: Vector3) -> Result<Self> {
        let norm = axis.norm();
        if !norm.is_finite() || norm < f64::EPSILON {
            return Err(TransformError::invalid_parameter("rotation axis has zero length"));
        }
        Ok(Self { angle, axis: axis * (1.0 / norm) })
    }

    /// Extract angle and axis from an orthogonal rotation matrix.
    ///
    /// A zero rotation reports angle 0 about the z axis.
    pub fn from_rotation_matrix(rotation: &Matrix3<f64>) -> Self {
        let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*rotation));
        match q.axis_angle() {
            Some((axis, angle)) => Self { angle, axis: Vector(axis.into_inner()) },
            None => Self { angle: 0.0, axis: Vector3::z_axis() },
        }
    }

    /// Build the rotation matrix.
    pub fn to_rotation_matrix(&self) -> Matrix3<f64> {
        let axis: Unit<NaVector3<f64>> = Unit::new_normalize(self.axis.0);
        Rotation3::from_axis_angle(&axis, self.angle).into_inner()
    }
}
