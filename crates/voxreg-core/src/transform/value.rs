//! The registered transform value.
//!
//! A [`Transform`] is either an affine map about a center of rotation or a
//! reference to a dense displacement field, together with the attributes of
//! the space pair it belongs to.

use std::fmt;
use nalgebra::{Matrix3, Matrix4};
use crate::config::Tolerances;
use crate::error::{Result, TransformError};
use crate::spatial::{Point3, Size3, Spacing3, Vector3};
use super::affine::AffineTransform;
use super::chained::CompositionMode;
use super::decomposition::{decompose, DecomposedTransform};
use super::displacement_field::DisplacementField;
use super::rigid::{euler_from_rotation_matrix, rotation_matrix_from_euler, AngleUnit};
use super::trait_::PointTransform;
use super::versor::{AngleAxis, Versor};

/// The two mutually exclusive representations of a transform.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformKind {
    Affine(AffineTransform),
    DisplacementField(DisplacementField),
}

/// A transform between two spaces.
///
/// `target_space_id` names the other end of the pairwise registration and is
/// the key under which the transform is stored in a registry. `size` and
/// `spacing` describe the space the transform maps into; resampling needs
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    target_space_id: String,
    name: String,
    size: Size3,
    spacing: Spacing3,
    kind: TransformKind,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity("")
    }
}

impl Transform {
    /// Create an identity affine transform targeting `target_space_id`.
    pub fn identity(target_space_id: impl Into<String>) -> Self {
        Self::from_affine(target_space_id, AffineTransform::identity(None))
    }

    /// Wrap an affine transform.
    pub fn from_affine(target_space_id: impl Into<String>, affine: AffineTransform) -> Self {
        Self {
            target_space_id: target_space_id.into(),
            name: String::new(),
            size: [0; 3],
            spacing: Spacing3::uniform(1.0),
            kind: TransformKind::Affine(affine),
        }
    }

    /// Wrap a displacement field reference.
    pub fn from_displacement_field(
        target_space_id: impl Into<String>,
        field: DisplacementField,
    ) -> Self {
        Self {
            kind: TransformKind::DisplacementField(field),
            ..Self::identity(target_space_id)
        }
    }

    /// Create a pure translation.
    pub fn translation(target_space_id: impl Into<String>, translation: Vector3) -> Self {
        Self::from_affine(target_space_id, AffineTransform::from_translation(translation))
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the size and spacing of the space this transform maps into.
    pub fn with_geometry(mut self, size: Size3, spacing: Spacing3) -> Self {
        self.size = size;
        self.spacing = spacing;
        self
    }

    /// Set the target space id.
    pub fn with_target_space(mut self, target_space_id: impl Into<String>) -> Self {
        self.target_space_id = target_space_id.into();
        self
    }

    pub fn target_space_id(&self) -> &str {
        &self.target_space_id
    }

    pub fn set_target_space_id(&mut self, target_space_id: impl Into<String>) {
        self.target_space_id = target_space_id.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn size(&self) -> Size3 {
        self.size
    }

    pub fn spacing(&self) -> Spacing3 {
        self.spacing
    }

    pub fn set_geometry(&mut self, size: Size3, spacing: Spacing3) {
        self.size = size;
        self.spacing = spacing;
    }

    /// Whether size and spacing are set well enough to drive resampling.
    pub fn has_geometry(&self) -> bool {
        self.size.iter().all(|&n| n > 0) && self.spacing.is_valid()
    }

    pub fn kind(&self) -> &TransformKind {
        &self.kind
    }

    pub fn is_affine(&self) -> bool {
        matches!(self.kind, TransformKind::Affine(_))
    }

    pub fn is_displacement_field(&self) -> bool {
        matches!(self.kind, TransformKind::DisplacementField(_))
    }

    /// Affine part, if this is an affine transform.
    pub fn as_affine(&self) -> Option<&AffineTransform> {
        match &self.kind {
            TransformKind::Affine(affine) => Some(affine),
            TransformKind::DisplacementField(_) => None,
        }
    }

    /// Field reference, if this is a displacement field transform.
    pub fn displacement_field(&self) -> Option<&DisplacementField> {
        match &self.kind {
            TransformKind::DisplacementField(field) => Some(field),
            TransformKind::Affine(_) => None,
        }
    }

    /// Affine part or `UnsupportedOperation`.
    pub fn affine(&self) -> Result<&AffineTransform> {
        self.as_affine().ok_or_else(|| {
            TransformError::unsupported(format!(
                "'{}' is a displacement field and has no affine part",
                self.target_space_id
            ))
        })
    }

    fn affine_for_write(&mut self, what: &str) -> Result<&mut AffineTransform> {
        match &mut self.kind {
            TransformKind::Affine(affine) => Ok(affine),
            TransformKind::DisplacementField(_) => Err(TransformError::type_mismatch(format!(
                "cannot set {what} on displacement field transform '{}'",
                self.target_space_id
            ))),
        }
    }

    /// Replace the representation with an affine transform.
    pub fn set_affine(&mut self, affine: AffineTransform) {
        self.kind = TransformKind::Affine(affine);
    }

    /// Replace the representation with a displacement field; the affine
    /// part is discarded.
    pub fn set_displacement_field(&mut self, field: DisplacementField) {
        self.kind = TransformKind::DisplacementField(field);
    }

    /// Reset to identity. The center of rotation of an affine transform is
    /// kept; a displacement field becomes an identity affine transform.
    pub fn set_identity(&mut self) {
        match &mut self.kind {
            TransformKind::Affine(affine) => affine.set_identity(),
            TransformKind::DisplacementField(_) => {
                self.kind = TransformKind::Affine(AffineTransform::identity(None));
            }
        }
    }

    /// Exact identity test. A displacement field is never the identity.
    pub fn is_identity(&self) -> bool {
        self.as_affine().is_some_and(AffineTransform::is_identity)
    }

    /// Rigid classification with the default tolerance; informative only.
    pub fn is_rigid(&self) -> bool {
        self.is_rigid_with(&Tolerances::default())
    }

    pub fn is_rigid_with(&self, tolerances: &Tolerances) -> bool {
        self.as_affine().is_some_and(|a| a.is_rigid_with(tolerances))
    }

    /// Linear part; identity for a displacement field.
    pub fn matrix(&self) -> Matrix3<f64> {
        self.as_affine().map_or_else(Matrix3::identity, |a| *a.matrix())
    }

    /// Center of rotation; the origin for a displacement field.
    pub fn center(&self) -> Point3 {
        self.as_affine().map_or_else(Point3::origin, AffineTransform::center)
    }

    /// Stored translation; zero for a displacement field.
    pub fn translations(&self) -> Vector3 {
        self.as_affine().map_or_else(Vector3::zeros, AffineTransform::translation)
    }

    /// Equivalent translation with the center of rotation at the origin.
    pub fn offsets(&self) -> Vector3 {
        self.as_affine().map_or_else(Vector3::zeros, AffineTransform::offset)
    }

    /// Replace the stored translation.
    pub fn set_translations(&mut self, translation: Vector3) -> Result<()> {
        self.affine_for_write("translation")?.set_translation(translation);
        Ok(())
    }

    /// Replace the linear part.
    pub fn set_matrix(&mut self, matrix: Matrix3<f64>) -> Result<()> {
        self.affine_for_write("matrix")?.set_matrix(matrix);
        Ok(())
    }

    /// Set the center without compensating the translation (changes the mapping).
    pub fn set_center(&mut self, center: Point3) -> Result<()> {
        self.affine_for_write("center of rotation")?.set_center(center);
        Ok(())
    }

    /// Linear part flattened row-major.
    pub fn matrix_flat(&self) -> [f64; 9] {
        let m = self.matrix();
        let mut flat = [0.0; 9];
        for i in 0..3 {
            for j in 0..3 {
                flat[i * 3 + j] = m[(i, j)];
            }
        }
        flat
    }

    /// Replace the linear part from a row-major slice of nine values.
    pub fn set_matrix_flat(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != 9 {
            return Err(TransformError::invalid_parameter(format!(
                "expected 9 matrix values, got {}",
                values.len()
            )));
        }
        self.set_matrix(Matrix3::from_row_slice(values))
    }

    /// Raw homogeneous matrix `[M | t]`, flattened row-major.
    pub fn homogeneous_flat(&self) -> [f64; 16] {
        let h = self
            .as_affine()
            .map_or_else(Matrix4::identity, AffineTransform::raw_homogeneous);
        let mut flat = [0.0; 16];
        for i in 0..4 {
            for j in 0..4 {
                flat[i * 4 + j] = h[(i, j)];
            }
        }
        flat
    }

    /// Replace linear part and translation from a row-major 4×4 `[M | t]`.
    ///
    /// The bottom row must be `[0, 0, 0, 1]`; the center is kept.
    pub fn set_homogeneous_flat(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != 16 {
            return Err(TransformError::invalid_parameter(format!(
                "expected 16 matrix values, got {}",
                values.len()
            )));
        }
        if values[12..] != [0.0, 0.0, 0.0, 1.0] {
            return Err(TransformError::invalid_parameter(
                "homogeneous matrix bottom row must be [0, 0, 0, 1]",
            ));
        }
        let h = Matrix4::from_row_slice(values);
        let affine = self.affine_for_write("homogeneous matrix")?;
        *affine = AffineTransform::from_raw_homogeneous(&h, affine.center());
        Ok(())
    }

    /// Set the linear part to the rotation given by Euler angles (X, then Y, then Z).
    pub fn set_rotations(&mut self, angles: [f64; 3], unit: AngleUnit) -> Result<()> {
        let radians = angles.map(|a| unit.to_radians(a));
        self.affine_for_write("rotation")?
            .set_matrix(rotation_matrix_from_euler(radians));
        Ok(())
    }

    /// Euler angles of the rotation.
    ///
    /// An orthogonal linear part is read directly; any other matrix goes
    /// through [`decompose`] so zoom and shear do not corrupt the angles.
    pub fn rotations_from_euler_decomposition(&self, unit: AngleUnit) -> Result<[f64; 3]> {
        let rotation = self.rotation_matrix()?;
        Ok(unit.from_radians3(euler_from_rotation_matrix(&rotation)))
    }

    /// Set the linear part to the rotation of a versor.
    pub fn set_versor(&mut self, versor: &Versor) -> Result<()> {
        self.affine_for_write("versor")?
            .set_matrix(versor.to_rotation_matrix());
        Ok(())
    }

    /// Versor of the rotation part.
    pub fn versor(&self) -> Result<Versor> {
        Ok(Versor::from_rotation_matrix(&self.rotation_matrix()?))
    }

    /// Set the linear part to a rotation about an axis.
    pub fn set_angle_axis(&mut self, angle: f64, axis: Vector3, unit: AngleUnit) -> Result<()> {
        let rotation = AngleAxis::new(unit.to_radians(angle), axis)?;
        self.affine_for_write("angle-axis rotation")?
            .set_matrix(rotation.to_rotation_matrix());
        Ok(())
    }

    /// Angle (in `unit`) and unit axis of the rotation part.
    pub fn angle_axis(&self, unit: AngleUnit) -> Result<(f64, Vector3)> {
        let aa = AngleAxis::from_rotation_matrix(&self.rotation_matrix()?);
        Ok((unit.from_radians(aa.angle), aa.axis))
    }

    fn rotation_matrix(&self) -> Result<Matrix3<f64>> {
        let affine = self.affine()?;
        if affine.is_rigid() && affine.determinant() > 0.0 {
            Ok(*affine.matrix())
        } else {
            Ok(decompose(affine, &Tolerances::default())?.rotation_matrix())
        }
    }

    /// Translation, rotation, zoom and shear of the affine part.
    pub fn decompose(&self) -> Result<DecomposedTransform> {
        self.decompose_with(&Tolerances::default())
    }

    pub fn decompose_with(&self, tolerances: &Tolerances) -> Result<DecomposedTransform> {
        decompose(self.affine()?, tolerances)
    }

    /// Inverse transform. Metadata (target id, name, geometry) is carried over
    /// unchanged; callers re-label it for the opposite direction.
    ///
    /// Displacement fields have no analytic inverse and fail with
    /// `UnsupportedOperation`.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&Tolerances::default())
    }

    pub fn inverse_with(&self, tolerances: &Tolerances) -> Result<Self> {
        match &self.kind {
            TransformKind::Affine(affine) => Ok(Self {
                kind: TransformKind::Affine(affine.try_inverse(tolerances)?),
                ..self.clone()
            }),
            TransformKind::DisplacementField(_) => Err(TransformError::unsupported(
                "displacement fields cannot be inverted; supply the backward field",
            )),
        }
    }

    /// Equivalent transform about `center`; the mapping is unchanged.
    pub fn with_center_of_rotation(&self, center: Point3) -> Result<Self> {
        let affine = self.affine()?;
        Ok(Self {
            kind: TransformKind::Affine(affine.with_center_of_rotation(center)),
            ..self.clone()
        })
    }

    /// Apply `self` first, then `other`. Metadata stays with `self`.
    pub fn pre_multiply(&mut self, other: &Transform, mode: CompositionMode) -> Result<()> {
        let other = other.composable()?;
        self.composable_mut()?.pre_multiply(other, mode);
        Ok(())
    }

    /// Apply `other` first, then `self`. Metadata stays with `self`.
    pub fn post_multiply(&mut self, other: &Transform, mode: CompositionMode) -> Result<()> {
        let other = other.composable()?;
        self.composable_mut()?.post_multiply(other, mode);
        Ok(())
    }

    fn composable(&self) -> Result<&AffineTransform> {
        self.as_affine().ok_or_else(|| {
            TransformError::unsupported(format!(
                "displacement field '{}' cannot be composed",
                self.target_space_id
            ))
        })
    }

    fn composable_mut(&mut self) -> Result<&mut AffineTransform> {
        match &mut self.kind {
            TransformKind::Affine(affine) => Ok(affine),
            TransformKind::DisplacementField(_) => Err(TransformError::unsupported(format!(
                "displacement field '{}' cannot be composed",
                self.target_space_id
            ))),
        }
    }
}

impl PointTransform for Transform {
    fn transform_point(&self, point: &Point3) -> Result<Point3> {
        self.affine()?.transform_point(point)
    }

    fn inverse_transform_point(&self, point: &Point3) -> Result<Point3> {
        self.affine()?.inverse_transform_point(point)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.name.is_empty() { "<unnamed>" } else { &self.name };
        match &self.kind {
            TransformKind::Affine(affine) => {
                let t = affine.translation();
                let c = affine.center();
                write!(
                    f,
                    "{} -> {}: affine, translation [{}, {}, {}], center [{}, {}, {}]",
                    label, self.target_space_id, t[0], t[1], t[2], c[0], c[1], c[2]
                )
            }
            TransformKind::DisplacementField(field) => {
                write!(f, "{} -> {}: {}", label, self.target_space_id, field)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_6;

    fn field_transform() -> Transform {
        Transform::from_displacement_field("fixed", DisplacementField::new("warp.nii"))
    }

    #[test]
    fn test_identity_defaults() {
        let t = Transform::identity("fixed");
        assert!(t.is_identity());
        assert!(t.is_affine());
        assert_eq!(t.target_space_id(), "fixed");
        assert_eq!(t.center(), Point3::origin());
    }

    #[test]
    fn test_translation_offsets_scenario() {
        let mut t = Transform::translation("fixed", Vector3::new([10.0, 0.0, 0.0]));
        assert_eq!(t.offsets(), Vector3::new([10.0, 0.0, 0.0]));
        assert_eq!(t.translations(), Vector3::new([10.0, 0.0, 0.0]));

        let recentered = t.with_center_of_rotation(Point3::new([5.0, 5.0, 5.0])).unwrap();
        assert_eq!(recentered.center(), Point3::new([5.0, 5.0, 5.0]));
        assert!((recentered.offsets() - Vector3::new([10.0, 0.0, 0.0])).norm() < 1e-12);
        for p in [Point3::origin(), Point3::new([1.0, 2.0, 3.0]), Point3::new([-40.0, 8.0, 0.5])] {
            let a = t.transform_point(&p).unwrap();
            let b = recentered.transform_point(&p).unwrap();
            assert!(a.max_abs_diff(&b) < 1e-12);
        }

        t.set_rotations([0.0, 0.0, 30.0], AngleUnit::Degrees).unwrap();
        let rotated = t.with_center_of_rotation(Point3::new([5.0, 5.0, 5.0])).unwrap();
        assert_ne!(rotated.translations(), t.translations());
        assert!((rotated.offsets() - t.offsets()).norm() < 1e-12);
    }

    #[test]
    fn test_offsets_differ_from_translations_with_center() {
        let mut t = Transform::identity("fixed");
        t.set_center(Point3::new([10.0, 0.0, 0.0])).unwrap();
        t.set_rotations([0.0, 0.0, 90.0], AngleUnit::Degrees).unwrap();
        let offsets = t.offsets();
        assert!((offsets - Vector3::new([10.0, -10.0, 0.0])).norm() < 1e-12);
        assert_eq!(t.translations(), Vector3::zeros());
    }

    #[test]
    fn test_set_identity_preserves_center() {
        let mut t = Transform::identity("fixed");
        t.set_center(Point3::new([1.0, 2.0, 3.0])).unwrap();
        t.set_rotations([10.0, 20.0, 30.0], AngleUnit::Degrees).unwrap();
        t.set_translations(Vector3::new([4.0, 5.0, 6.0])).unwrap();
        t.set_identity();
        assert!(t.is_identity());
        assert_eq!(t.center(), Point3::new([1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_rigid_scenarios() {
        let mut zoom = Transform::identity("fixed");
        zoom.set_matrix_flat(&[2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        assert!(!zoom.is_rigid());

        let mut rotated = Transform::identity("fixed");
        rotated.set_rotations([0.0, 0.0, 30.0], AngleUnit::Degrees).unwrap();
        assert!(rotated.is_rigid());
    }

    #[test]
    fn test_euler_roundtrip_through_getter() {
        let mut t = Transform::identity("fixed");
        t.set_rotations([0.1, -0.2, 0.3], AngleUnit::Radians).unwrap();
        let angles = t.rotations_from_euler_decomposition(AngleUnit::Radians).unwrap();
        assert!((angles[0] - 0.1).abs() < 1e-12);
        assert!((angles[1] + 0.2).abs() < 1e-12);
        assert!((angles[2] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_euler_getter_on_zoomed_matrix_uses_decomposition() {
        let mut t = Transform::identity("fixed");
        t.set_rotations([0.0, 0.0, FRAC_PI_6], AngleUnit::Radians).unwrap();
        let zoomed = t.matrix() * Matrix3::from_diagonal(&nalgebra::Vector3::new(3.0, 1.0, 0.5));
        t.set_matrix(zoomed).unwrap();
        let angles = t.rotations_from_euler_decomposition(AngleUnit::Degrees).unwrap();
        assert!((angles[2] - 30.0).abs() < 1e-9);
        assert!(angles[0].abs() < 1e-9);
        assert!(angles[1].abs() < 1e-9);
    }

    #[test]
    fn test_versor_and_angle_axis_accessors() {
        let mut t = Transform::identity("fixed");
        t.set_angle_axis(90.0, Vector3::new([0.0, 0.0, 2.0]), AngleUnit::Degrees).unwrap();
        let (angle, axis) = t.angle_axis(AngleUnit::Degrees).unwrap();
        assert!((angle - 90.0).abs() < 1e-9);
        assert!((axis - Vector3::z_axis()).norm() < 1e-12);

        let versor = t.versor().unwrap();
        let mut other = Transform::identity("fixed");
        other.set_versor(&versor).unwrap();
        assert!((other.matrix() - t.matrix()).abs().max() < 1e-12);
    }

    #[test]
    fn test_flat_matrix_roundtrip_is_exact() {
        let values = [0.9, 0.1, -0.2, 0.05, 1.1, 0.3, 0.0, -0.7, 1.3];
        let mut t = Transform::identity("fixed");
        t.set_matrix_flat(&values).unwrap();
        assert_eq!(t.matrix_flat(), values);
        assert!(t.set_matrix_flat(&values[..8]).is_err());
    }

    #[test]
    fn test_homogeneous_roundtrip_is_exact() {
        let mut t = Transform::identity("fixed");
        t.set_center(Point3::new([1.0, 1.0, 1.0])).unwrap();
        let values = [
            1.0, 0.2, 0.0, 5.5,
            0.0, 1.0, 0.0, -3.25,
            0.1, 0.0, 2.0, 7.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        t.set_homogeneous_flat(&values).unwrap();
        assert_eq!(t.homogeneous_flat(), values);
        assert_eq!(t.translations(), Vector3::new([5.5, -3.25, 7.0]));
        assert_eq!(t.center(), Point3::new([1.0, 1.0, 1.0]));

        let mut bad = values;
        bad[15] = 2.0;
        assert!(t.set_homogeneous_flat(&bad).is_err());
    }

    #[test]
    fn test_field_rejects_rotation_setters() {
        let mut t = field_transform();
        assert!(matches!(
            t.set_rotations([0.0; 3], AngleUnit::Radians),
            Err(TransformError::TypeMismatch(_))
        ));
        assert!(matches!(t.set_versor(&Versor::identity()), Err(TransformError::TypeMismatch(_))));
        assert!(matches!(
            t.set_angle_axis(1.0, Vector3::z_axis(), AngleUnit::Radians),
            Err(TransformError::TypeMismatch(_))
        ));
        assert!(matches!(t.versor(), Err(TransformError::UnsupportedOperation(_))));
        assert!(matches!(t.inverse(), Err(TransformError::UnsupportedOperation(_))));
        assert!(matches!(
            t.transform_point(&Point3::origin()),
            Err(TransformError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_field_reads_as_identity_affine_part() {
        let t = field_transform();
        assert!(!t.is_identity());
        assert!(!t.is_rigid());
        assert_eq!(t.matrix(), Matrix3::identity());
        assert_eq!(t.translations(), Vector3::zeros());
        assert_eq!(t.center(), Point3::origin());
    }

    #[test]
    fn test_switching_kind_clears_other_representation() {
        let mut t = Transform::translation("fixed", Vector3::new([1.0, 2.0, 3.0]));
        t.set_displacement_field(DisplacementField::new("warp.nii"));
        assert!(t.as_affine().is_none());
        assert_eq!(t.translations(), Vector3::zeros());

        t.set_identity();
        assert!(t.is_identity());
        assert!(t.displacement_field().is_none());
    }

    #[test]
    fn test_inverse_carries_metadata() {
        let t = Transform::translation("fixed", Vector3::new([1.0, 0.0, 0.0]))
            .with_name("reg")
            .with_geometry([10, 20, 30], Spacing3::new([1.0, 2.0, 3.0]));
        let inv = t.inverse().unwrap();
        assert_eq!(inv.name(), "reg");
        assert_eq!(inv.size(), [10, 20, 30]);
        assert_eq!(inv.translations(), Vector3::new([-1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_compose_field_fails() {
        let mut t = Transform::identity("fixed");
        let err = t.post_multiply(&field_transform(), CompositionMode::Homogeneous).unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedOperation(_)));
    }

    #[test]
    fn test_display() {
        let t = Transform::translation("fixed", Vector3::new([1.0, 0.0, 0.0])).with_name("reg");
        assert_eq!(
            t.to_string(),
            "reg -> fixed: affine, translation [1, 0, 0], center [0, 0, 0]"
        );
        assert_eq!(
            field_transform().to_string(),
            "<unnamed> -> fixed: displacement field 'warp.nii'"
        );
    }
}
