//! Affine transform implementation.
//!
//! This module provides an affine transform (linear transformation + translation)
//! acting about a movable center of rotation.

use nalgebra::{Matrix3, Matrix4, Point3 as NaPoint3, Vector3 as NaVector3};
use crate::config::Tolerances;
use crate::error::{Result, TransformError};
use crate::spatial::{Point, Point3, Vector, Vector3};
use super::trait_::PointTransform;

/// Affine Transform (Linear transformation + Translation).
///
/// Represents a general affine transformation with a center:
/// T(x) = A(x - c) + c + t
///
/// where:
/// * A is a 3×3 matrix (linear transformation: rotation, zoom, shear)
/// * t is the stored translation vector
/// * c is the center of rotation/zoom
///
/// The same mapping written without a center is `T(x) = A x + o` with the
/// offset `o = t + c - A c` (see [`AffineTransform::offset`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3<f64>,
    translation: Vector3,
    center: Point3,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity(None)
    }
}

impl AffineTransform {
    /// Create a new affine transform.
    ///
    /// # Arguments
    /// * `matrix` - Row-major linear part
    /// * `translation` - Stored translation vector
    /// * `center` - Center of rotation
    pub fn new(matrix: Matrix3<f64>, translation: Vector3, center: Point3) -> Self {
        Self { matrix, translation, center }
    }

    /// Create an identity affine transform.
    ///
    /// # Arguments
    /// * `center` - Optional center of rotation. If None, uses the origin.
    pub fn identity(center: Option<Point3>) -> Self {
        Self::new(
            Matrix3::identity(),
            Vector3::zeros(),
            center.unwrap_or_else(Point3::origin),
        )
    }

    /// Create a pure translation about the origin.
    pub fn from_translation(translation: Vector3) -> Self {
        Self::new(Matrix3::identity(), translation, Point3::origin())
    }

    /// Get the linear part.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Get the stored translation vector.
    pub fn translation(&self) -> Vector3 {
        self.translation
    }

    /// Get the center of rotation.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Replace the linear part, keeping translation and center.
    pub fn set_matrix(&mut self, matrix: Matrix3<f64>) {
        self.matrix = matrix;
    }

    /// Replace the stored translation.
    pub fn set_translation(&mut self, translation: Vector3) {
        self.translation = translation;
    }

    /// Replace the center without compensating the translation.
    ///
    /// This changes the mapping; use [`AffineTransform::with_center_of_rotation`]
    /// to move the center while keeping every point's image.
    pub fn set_center(&mut self, center: Point3) {
        self.center = center;
    }

    /// Reset to the identity mapping. The center of rotation is kept.
    pub fn set_identity(&mut self) {
        self.matrix = Matrix3::identity();
        self.translation = Vector3::zeros();
    }

    /// Exact identity test: identity matrix and zero translation, no tolerance.
    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix3::identity() && self.translation.to_array() == [0.0; 3]
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// Orthogonality test `Hᵀ ≈ H⁻¹` on the homogeneous linear block.
    ///
    /// Translation does not take part: a rotation about any center followed by
    /// any shift is rigid.
    pub fn is_rigid_with(&self, tolerances: &Tolerances) -> bool {
        let mut h = Matrix4::<f64>::identity();
        for i in 0..3 {
            for j in 0..3 {
                h[(i, j)] = self.matrix[(i, j)];
            }
        }
        let Some(inverse) = h.try_inverse() else {
            return false;
        };
        let transposed = h.transpose();
        (0..4).all(|i| {
            (0..4).all(|j| {
                (transposed[(i, j)] - inverse[(i, j)]).abs() <= tolerances.rigid_tolerance
            })
        })
    }

    /// Orthogonality test with the default tolerance.
    pub fn is_rigid(&self) -> bool {
        self.is_rigid_with(&Tolerances::default())
    }

    /// Equivalent translation when the center is moved to the origin.
    pub fn offset(&self) -> Vector3 {
        let c = self.center.0.coords;
        Vector(self.translation.0 + c - self.matrix * c)
    }

    /// Effective homogeneous matrix `[A | o]` (offset in the last column).
    pub fn homogeneous(&self) -> Matrix4<f64> {
        compose_homogeneous(&self.matrix, &self.offset().0)
    }

    /// Raw homogeneous matrix `[A | t]` built from the stored translation.
    pub fn raw_homogeneous(&self) -> Matrix4<f64> {
        compose_homogeneous(&self.matrix, &self.translation.0)
    }

    /// Build a transform with the given center from an effective `[A | o]` matrix.
    pub fn from_homogeneous(h: &Matrix4<f64>, center: Point3) -> Self {
        let (matrix, offset) = split_homogeneous(h);
        let c = center.0.coords;
        let translation = offset - c + matrix * c;
        Self::new(matrix, Vector(translation), center)
    }

    /// Build a transform from a raw `[A | t]` matrix and a center.
    pub fn from_raw_homogeneous(h: &Matrix4<f64>, center: Point3) -> Self {
        let (matrix, translation) = split_homogeneous(h);
        Self::new(matrix, Vector(translation), center)
    }

    /// Compute the inverse transform, expressed about the same center.
    ///
    /// If `T(x) = A(x - c) + c + t` then `T⁻¹(y) = A⁻¹(y - c) + c - A⁻¹ t`.
    pub fn try_inverse(&self, tolerances: &Tolerances) -> Result<Self> {
        let det = self.determinant();
        if tolerances.is_singular(det) {
            return Err(TransformError::singular(det, tolerances.singular_epsilon));
        }
        let inverse = self
            .matrix
            .try_inverse()
            .ok_or_else(|| TransformError::singular(det, tolerances.singular_epsilon))?;
        Ok(Self::new(inverse, Vector(-(inverse * self.translation.0)), self.center))
    }

    /// Compute the inverse transform with default tolerances.
    pub fn inverse(&self) -> Result<Self> {
        self.try_inverse(&Tolerances::default())
    }

    /// Equivalent transform acting about `new_center`.
    ///
    /// With `Δ = new_center - c`, this is the transform with translation
    /// `t - Δ` followed by the translation by `Δ` pushed through the pivot,
    /// which reduces to `t' = t + (A - I)Δ`. The mapping is unchanged.
    pub fn with_center_of_rotation(&self, new_center: Point3) -> Self {
        let delta = new_center - self.center;
        let shifted = Self::new(self.matrix, self.translation - delta, Point3::origin());
        let pivot = Self::from_translation(delta);
        let raw = shifted.raw_homogeneous() * pivot.raw_homogeneous();
        Self::from_raw_homogeneous(&raw, new_center)
    }

    fn apply(&self, point: &Point3) -> Point3 {
        let c = self.center.0.coords;
        let mapped = self.matrix * (point.0.coords - c) + c + self.translation.0;
        Point(NaPoint3::from(mapped))
    }
}

impl PointTransform for AffineTransform {
    fn transform_point(&self, point: &Point3) -> Result<Point3> {
        Ok(self.apply(point))
    }

    fn inverse_transform_point(&self, point: &Point3) -> Result<Point3> {
        Ok(self.inverse()?.apply(point))
    }
}

fn compose_homogeneous(matrix: &Matrix3<f64>, column: &NaVector3<f64>) -> Matrix4<f64> {
    let mut h = Matrix4::identity();
    for i in 0..3 {
        for j in 0..3 {
            h[(i, j)] = matrix[(i, j)];
        }
        h[(i, 3)] = column[i];
    }
    h
}

fn split_homogeneous(h: &Matrix4<f64>) -> (Matrix3<f64>, NaVector3<f64>) {
    let mut matrix = Matrix3::zeros();
    let mut column = NaVector3::zeros();
    for i in 0..3 {
        for j in 0..3 {
            matrix[(i, j)] = h[(i, j)];
        }
        column[i] = h[(i, 3)];
    }
    (matrix, column)
}
