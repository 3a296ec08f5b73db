//! Affine decomposition into translation, rotation, zoom and shear.
//!
//! Given `M = R · Z · S` with `R` a proper rotation, `Z = diag(z)` and `S`
//! unit upper triangular, `MᵀM = SᵀZᵀZS`, so the upper Cholesky factor `C` of
//! `MᵀM` equals `|Z|·S` and carries zoom and shear with the rotation removed.
//! This is the only reliable way to get rotation angles out of a sheared or
//! anisotropic matrix; direct Euler extraction only works on orthogonal ones.

use nalgebra::{Matrix3, Vector3 as NaVector3};
use crate::config::Tolerances;
use crate::error::{Result, TransformError};
use crate::spatial::Vector3;
use super::affine::AffineTransform;
use super::rigid::{euler_from_rotation_matrix, rotation_matrix_from_euler, AngleUnit};

/// Result of [`decompose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedTransform {
    /// Stored translation of the decomposed transform.
    pub translation: Vector3,
    /// Euler angles `[x, y, z]` in radians, applied X then Y then Z.
    pub rotation: [f64; 3],
    /// Signed zoom per axis; `zoom[0]` is negative for a reflecting matrix.
    pub zoom: [f64; 3],
    /// Shear terms `[xy, xz, yz]`.
    pub shear: [f64; 3],
}

impl DecomposedTransform {
    /// Rotation angles in the requested unit.
    pub fn rotation_in(&self, unit: AngleUnit) -> [f64; 3] {
        unit.from_radians3(self.rotation)
    }

    /// Rotation matrix `R`.
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        rotation_matrix_from_euler(self.rotation)
    }

    /// Zoom matrix `Z`.
    pub fn zoom_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_diagonal(&NaVector3::from(self.zoom))
    }

    /// Unit upper triangular shear matrix `S`.
    pub fn shear_matrix(&self) -> Matrix3<f64> {
        let [xy, xz, yz] = self.shear;
        Matrix3::new(1.0, xy, xz, 0.0, 1.0, yz, 0.0, 0.0, 1.0)
    }

    /// Reconstructed linear part `R · Z · S`.
    pub fn linear_matrix(&self) -> Matrix3<f64> {
        self.rotation_matrix() * self.zoom_matrix() * self.shear_matrix()
    }
}

/// Decompose the linear part and translation of an affine transform.
///
/// Fails with `SingularTransform` when `|det(M)|` is below the configured
/// epsilon, since neither the Cholesky factor nor the rotation exists then.
pub fn decompose(affine: &AffineTransform, tolerances: &Tolerances) -> Result<DecomposedTransform> {
    let m = *affine.matrix();
    let det = m.determinant();
    if tolerances.is_singular(det) {
        return Err(TransformError::singular(det, tolerances.singular_epsilon));
    }

    let cholesky = (m.transpose() * m)
        .cholesky()
        .ok_or_else(|| TransformError::singular(det, tolerances.singular_epsilon))?;
    let c = cholesky.l().transpose();

    let magnitudes = NaVector3::new(c[(0, 0)], c[(1, 1)], c[(2, 2)]);
    let mut zoom = magnitudes;
    if det < 0.0 {
        zoom[0] = -zoom[0];
    }

    // Normalising by the unsigned diagonal keeps S unit triangular; the sign
    // lives in Z so that R stays a proper rotation.
    let shear_matrix = Matrix3::from_diagonal(&magnitudes.map(|v| 1.0 / v)) * c;
    let shear = [shear_matrix[(0, 1)], shear_matrix[(0, 2)], shear_matrix[(1, 2)]];

    // R = M (Z S)⁻¹  <=>  (Z S)ᵀ Rᵀ = Mᵀ
    let zs = Matrix3::from_diagonal(&zoom) * shear_matrix;
    let rotation_t = zs
        .transpose()
        .lu()
        .solve(&m.transpose())
        .ok_or_else(|| TransformError::singular(det, tolerances.singular_epsilon))?;
    let rotation = euler_from_rotation_matrix(&rotation_t.transpose());

    tracing::trace!(?rotation, ?zoom, ?shear, "decomposed affine matrix");

    Ok(DecomposedTransform {
        translation: affine.translation(),
        rotation,
        zoom: zoom.into(),
        shear,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Point3;

    fn affine(m: Matrix3<f64>) -> AffineTransform {
        AffineTransform::new(m, Vector3::new([1.0, -2.0, 3.0]), Point3::origin())
    }

    #[test]
    fn test_pure_zoom() {
        let m = Matrix3::from_diagonal(&NaVector3::new(2.0, 1.0, 1.0));
        let d = decompose(&affine(m), &Tolerances::default()).unwrap();
        assert_eq!(d.rotation, [0.0, 0.0, 0.0]);
        assert_eq!(d.zoom, [2.0, 1.0, 1.0]);
        assert_eq!(d.shear, [0.0, 0.0, 0.0]);
        assert_eq!(d.translation, Vector3::new([1.0, -2.0, 3.0]));
    }

    #[test]
    fn test_rotation_zoom_shear_recovered() {
        let rotation = [0.3, -0.2, 0.5];
        let expected = DecomposedTransform {
            translation: Vector3::zeros(),
            rotation,
            zoom: [1.5, 0.8, 2.0],
            shear: [0.1, -0.2, 0.3],
        };
        let d = decompose(&affine(expected.linear_matrix()), &Tolerances::default()).unwrap();
        for i in 0..3 {
            assert!((d.rotation[i] - rotation[i]).abs() < 1e-10);
            assert!((d.zoom[i] - expected.zoom[i]).abs() < 1e-10);
            assert!((d.shear[i] - expected.shear[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn test_reflection_negates_first_zoom() {
        let m = Matrix3::from_diagonal(&NaVector3::new(-1.0, 2.0, 3.0));
        let d = decompose(&affine(m), &Tolerances::default()).unwrap();
        assert!((d.zoom[0] + 1.0).abs() < 1e-12);
        assert!((d.linear_matrix() - m).abs().max() < 1e-12);
        assert!((d.rotation_matrix().determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_matrix_fails() {
        let m = Matrix3::from_diagonal(&NaVector3::new(1.0, 0.0, 1.0));
        let err = decompose(&affine(m), &Tolerances::default()).unwrap_err();
        assert!(matches!(err, TransformError::SingularTransform { .. }));
    }

    #[test]
    fn test_rotation_in_degrees() {
        let m = rotation_matrix_from_euler([0.0, 0.0, std::f64::consts::FRAC_PI_6]);
        let d = decompose(&affine(m), &Tolerances::default()).unwrap();
        let degrees = d.rotation_in(AngleUnit::Degrees);
        assert!((degrees[2] - 30.0).abs() < 1e-9);
    }
}
